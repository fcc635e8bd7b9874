//! Address resolution per cycle.

use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::transport::HttpClient;

use super::{AddressSet, IpVersion, Ipv6Lookup, PublicIpv4Lookup, ResolveError};

/// Resolves the current address of each family.
///
/// # Design
///
/// The two families are resolved independently so that a failure in one
/// never prevents reporting the other. Mock implementations are used to
/// drive the update cycle in tests.
pub trait AddressResolver: Send + Sync {
    /// Resolves the public IPv4 address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when no valid address could be obtained.
    fn resolve_ipv4(&self) -> impl Future<Output = Result<Ipv4Addr, ResolveError>> + Send;

    /// Resolves the global IPv6 address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when no valid address could be obtained.
    fn resolve_ipv6(&self) -> impl Future<Output = Result<Ipv6Addr, ResolveError>> + Send;
}

/// Production resolver: HTTP discovery for IPv4, local lookup for IPv6.
#[derive(Debug)]
pub struct SystemResolver<H> {
    ipv4: PublicIpv4Lookup<H>,
    ipv6: Ipv6Lookup,
}

impl<H> SystemResolver<H> {
    /// Creates a resolver from its two lookups.
    #[must_use]
    pub const fn new(ipv4: PublicIpv4Lookup<H>, ipv6: Ipv6Lookup) -> Self {
        Self { ipv4, ipv6 }
    }
}

impl<H: HttpClient> AddressResolver for SystemResolver<H> {
    async fn resolve_ipv4(&self) -> Result<Ipv4Addr, ResolveError> {
        self.ipv4.lookup().await
    }

    async fn resolve_ipv6(&self) -> Result<Ipv6Addr, ResolveError> {
        self.ipv6.lookup().await
    }
}

/// Resolves every family enabled by `version` into an [`AddressSet`].
///
/// Failures are logged and the family is left empty. Families excluded
/// by `version` are never queried.
pub async fn resolve_addresses<R: AddressResolver>(resolver: &R, version: IpVersion) -> AddressSet {
    let mut addresses = AddressSet::default();

    if version.includes_v4() {
        match resolver.resolve_ipv4().await {
            Ok(addr) => {
                tracing::info!("Got IPv4: {addr}");
                addresses.ipv4 = Some(addr);
            }
            Err(e) => tracing::warn!("Failed to get IPv4: {e}"),
        }
    }

    if version.includes_v6() {
        match resolver.resolve_ipv6().await {
            Ok(addr) => {
                tracing::info!("Got IPv6: {addr}");
                addresses.ipv6 = Some(addr);
            }
            Err(e) => tracing::warn!("Failed to get IPv6: {e}"),
        }
    }

    addresses
}
