//! Global IPv6 discovery from the local host.
//!
//! Addresses are looked up through an ordered chain of strategies; the
//! first strategy that yields a usable address wins.

use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

use tokio::process::Command;

use crate::config::defaults;

use super::ResolveError;

/// A source of locally configured IPv6 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv6Strategy {
    /// `ip -6 addr list scope global` (iproute2).
    IpCommand,
    /// The interface table as reported by the OS.
    InterfaceTable,
}

impl Ipv6Strategy {
    /// The default chain: iproute2 first, interface table as fallback.
    pub const DEFAULT_CHAIN: [Self; 2] = [Self::IpCommand, Self::InterfaceTable];

    /// Short name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IpCommand => "ip command",
            Self::InterfaceTable => "interface table",
        }
    }

    async fn lookup(self, timeout: Duration) -> Result<Ipv6Addr, ResolveError> {
        match self {
            Self::IpCommand => lookup_ip_command(timeout).await,
            Self::InterfaceTable => lookup_interface_table(timeout).await,
        }
    }
}

/// Resolves the host's global IPv6 address through a strategy chain.
#[derive(Debug, Clone)]
pub struct Ipv6Lookup {
    strategies: Vec<Ipv6Strategy>,
    timeout: Duration,
}

impl Default for Ipv6Lookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Ipv6Lookup {
    /// Creates a lookup using [`Ipv6Strategy::DEFAULT_CHAIN`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: Ipv6Strategy::DEFAULT_CHAIN.to_vec(),
            timeout: defaults::local_lookup_timeout(),
        }
    }

    /// Replaces the strategy chain.
    #[must_use]
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Ipv6Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    /// Sets the per-strategy timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured strategy chain.
    #[must_use]
    pub fn strategies(&self) -> &[Ipv6Strategy] {
        &self.strategies
    }

    /// Tries each strategy in order and returns the first usable address.
    ///
    /// # Errors
    ///
    /// Returns the last strategy's error if none yields an address, or
    /// [`ResolveError::NoAddress`] for an empty chain.
    pub async fn lookup(&self) -> Result<Ipv6Addr, ResolveError> {
        first_success(&self.strategies, |strategy| strategy.lookup(self.timeout)).await
    }
}

/// Runs `lookup` for each strategy in order until one succeeds.
///
/// Returns the last error when every strategy fails, and
/// [`ResolveError::NoAddress`] when `strategies` is empty.
pub(super) async fn first_success<F, Fut>(
    strategies: &[Ipv6Strategy],
    mut lookup: F,
) -> Result<Ipv6Addr, ResolveError>
where
    F: FnMut(Ipv6Strategy) -> Fut,
    Fut: Future<Output = Result<Ipv6Addr, ResolveError>>,
{
    let mut last_error = ResolveError::NoAddress;

    for &strategy in strategies {
        match lookup(strategy).await {
            Ok(addr) => {
                tracing::debug!("IPv6 {addr} found via {}", strategy.name());
                return Ok(addr);
            }
            Err(e) => {
                tracing::debug!("IPv6 lookup via {} failed: {e}", strategy.name());
                last_error = e;
            }
        }
    }

    Err(last_error)
}

async fn lookup_ip_command(timeout: Duration) -> Result<Ipv6Addr, ResolveError> {
    const PROGRAM: &str = "ip";

    let output = Command::new(PROGRAM)
        .args(["-6", "addr", "list", "scope", "global"])
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, output)
        .await
        .map_err(|_| ResolveError::Timeout {
            what: Ipv6Strategy::IpCommand.name(),
            after: timeout,
        })?
        .map_err(|error| ResolveError::Command {
            program: PROGRAM,
            error,
        })?;

    if !output.status.success() {
        return Err(ResolveError::CommandFailed {
            program: PROGRAM,
            status: output.status,
        });
    }

    parse_ip_addr_output(&String::from_utf8_lossy(&output.stdout)).ok_or(ResolveError::NoAddress)
}

async fn lookup_interface_table(timeout: Duration) -> Result<Ipv6Addr, ResolveError> {
    let task = tokio::task::spawn_blocking(local_ip_address::list_afinet_netifas);

    let interfaces = tokio::time::timeout(timeout, task)
        .await
        .map_err(|_| ResolveError::Timeout {
            what: Ipv6Strategy::InterfaceTable.name(),
            after: timeout,
        })?
        .map_err(|e| ResolveError::Interfaces(e.to_string()))?
        .map_err(|e| ResolveError::Interfaces(e.to_string()))?;

    select_global_ipv6(interfaces.into_iter().map(|(_, ip)| ip)).ok_or(ResolveError::NoAddress)
}

/// Extracts the first usable address from `ip -6 addr` output.
///
/// Looks at `inet6 <addr>/<prefix> ...` lines and strips the prefix length.
#[must_use]
pub fn parse_ip_addr_output(output: &str) -> Option<Ipv6Addr> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("inet6"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|addr| addr.split('/').next())
        .filter_map(|addr| addr.parse::<Ipv6Addr>().ok())
        .find(is_global_candidate)
}

/// Returns the first usable IPv6 address among `addrs`, skipping IPv4.
#[must_use]
pub fn select_global_ipv6(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv6Addr> {
    addrs
        .into_iter()
        .filter_map(|ip| match ip {
            IpAddr::V6(v6) => Some(v6),
            IpAddr::V4(_) => None,
        })
        .find(is_global_candidate)
}

/// Returns true if `addr` can be published in an AAAA record.
///
/// Rejects loopback, unspecified, multicast, link-local (`fe80::/10`)
/// and IPv4-mapped (`::ffff:0:0/96`) addresses.
#[must_use]
pub const fn is_global_candidate(addr: &Ipv6Addr) -> bool {
    !(addr.is_loopback()
        || addr.is_unspecified()
        || addr.is_multicast()
        || addr.is_unicast_link_local()
        || addr.to_ipv4_mapped().is_some())
}
