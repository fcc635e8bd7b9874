//! Public IPv4 discovery over HTTP.

use std::net::Ipv4Addr;
use std::time::Duration;

use url::Url;

use crate::config::defaults;
use crate::transport::{HttpClient, HttpRequest};

use super::ResolveError;

/// Longest body excerpt kept in [`ResolveError::InvalidAddress`].
const MAX_BODY_EXCERPT: usize = 64;

/// Asks a "what is my IP" service for the caller's public IPv4 address.
///
/// The service must answer `GET <url>` with the address as plain text.
#[derive(Debug)]
pub struct PublicIpv4Lookup<H> {
    client: H,
    url: Url,
    timeout: Duration,
}

impl<H> PublicIpv4Lookup<H> {
    /// Creates a lookup against `url` with the default discovery timeout.
    #[must_use]
    pub const fn new(client: H, url: Url) -> Self {
        Self {
            client,
            url,
            timeout: defaults::discovery_timeout(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the discovery URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl<H: HttpClient> PublicIpv4Lookup<H> {
    /// Fetches and validates the public IPv4 address.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that is not a single IPv4 address.
    pub async fn lookup(&self) -> Result<Ipv4Addr, ResolveError> {
        let request = HttpRequest::get(self.url.clone()).with_timeout(self.timeout);
        let response = self.client.request(request).await?;

        if !response.is_success() {
            return Err(ResolveError::Status {
                status: response.status,
            });
        }

        parse_ipv4_body(&response.body)
    }
}

/// Parses a discovery response body into an IPv4 address.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyBody`] for a blank body and
/// [`ResolveError::InvalidAddress`] for anything that is not IPv4.
pub fn parse_ipv4_body(body: &[u8]) -> Result<Ipv4Addr, ResolveError> {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ResolveError::EmptyBody);
    }

    trimmed
        .parse::<Ipv4Addr>()
        .map_err(|_| ResolveError::InvalidAddress {
            body: trimmed.chars().take(MAX_BODY_EXCERPT).collect(),
        })
}
