//! Address resolution layer.
//!
//! This module provides types and traits for:
//! - The IP version mode ([`IpVersion`])
//! - The per-cycle address set and its canonical encoding ([`AddressSet`])
//! - Public IPv4 discovery over HTTP ([`PublicIpv4Lookup`])
//! - Local IPv6 discovery through a strategy chain ([`Ipv6Lookup`])
//! - The resolver abstraction used by the update cycle ([`AddressResolver`])

mod address;
mod error;
mod ipv4;
mod ipv6;
mod resolver;

#[cfg(test)]
mod resolver_tests;

pub use address::{AddressSet, AddressSetParseError, IPV4_KEY, IPV6_KEY, IpVersion};
pub use error::ResolveError;
pub use ipv4::{PublicIpv4Lookup, parse_ipv4_body};
pub use ipv6::{
    Ipv6Lookup, Ipv6Strategy, is_global_candidate, parse_ip_addr_output, select_global_ipv6,
};
pub use resolver::{AddressResolver, SystemResolver, resolve_addresses};
