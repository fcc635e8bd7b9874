//! Tests for per-cycle address resolution.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AddressResolver, IpVersion, ResolveError, resolve_addresses};

/// Resolver with fixed answers that counts how often each family is queried.
struct FixedResolver {
    ipv4: Option<Ipv4Addr>,
    ipv6: Option<Ipv6Addr>,
    ipv4_calls: AtomicUsize,
    ipv6_calls: AtomicUsize,
}

impl FixedResolver {
    fn new(ipv4: Option<&str>, ipv6: Option<&str>) -> Self {
        Self {
            ipv4: ipv4.map(|s| s.parse().unwrap()),
            ipv6: ipv6.map(|s| s.parse().unwrap()),
            ipv4_calls: AtomicUsize::new(0),
            ipv6_calls: AtomicUsize::new(0),
        }
    }
}

impl AddressResolver for FixedResolver {
    async fn resolve_ipv4(&self) -> Result<Ipv4Addr, ResolveError> {
        self.ipv4_calls.fetch_add(1, Ordering::SeqCst);
        self.ipv4.ok_or(ResolveError::EmptyBody)
    }

    async fn resolve_ipv6(&self) -> Result<Ipv6Addr, ResolveError> {
        self.ipv6_calls.fetch_add(1, Ordering::SeqCst);
        self.ipv6.ok_or(ResolveError::NoAddress)
    }
}

#[tokio::test]
async fn both_resolves_both_families() {
    let resolver = FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1"));
    let set = resolve_addresses(&resolver, IpVersion::Both).await;

    assert_eq!(set.ipv4, Some("203.0.113.5".parse().unwrap()));
    assert_eq!(set.ipv6, Some("2001:db8::1".parse().unwrap()));
}

#[tokio::test]
async fn failed_family_is_omitted() {
    let resolver = FixedResolver::new(Some("203.0.113.5"), None);
    let set = resolve_addresses(&resolver, IpVersion::Both).await;

    assert_eq!(set.ipv4, Some("203.0.113.5".parse().unwrap()));
    assert_eq!(set.ipv6, None);
    assert_eq!(resolver.ipv6_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ipv4_only_never_queries_ipv6() {
    let resolver = FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1"));
    let set = resolve_addresses(&resolver, IpVersion::V4).await;

    assert_eq!(set.ipv6, None);
    assert_eq!(resolver.ipv4_calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.ipv6_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ipv6_only_never_queries_ipv4() {
    let resolver = FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1"));
    let set = resolve_addresses(&resolver, IpVersion::V6).await;

    assert_eq!(set.ipv4, None);
    assert_eq!(resolver.ipv4_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_failures_give_empty_set() {
    let resolver = FixedResolver::new(None, None);
    assert!(resolve_addresses(&resolver, IpVersion::Both).await.is_empty());
}
