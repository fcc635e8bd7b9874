//! dynv6-style update endpoint (`GET /api/update?hostname=..&token=..`).

use std::time::Duration;

use url::Url;

use crate::config::{Secret, defaults};
use crate::network::AddressSet;
use crate::transport::{HttpClient, HttpRequest};

use super::{SubmitError, UpdateSubmitter};

/// Query parameter carrying the hostname.
pub const HOSTNAME_KEY: &str = "hostname";

/// Query parameter carrying the API token.
pub const TOKEN_KEY: &str = "token";

/// Submits address updates to a dynv6-compatible HTTP endpoint.
///
/// The full request URL contains the token and is never logged; use
/// [`Dynv6Provider::endpoint`] for diagnostics.
///
/// # Example
///
/// ```
/// use dyndns_client::config::Secret;
/// use dyndns_client::provider::Dynv6Provider;
/// use dyndns_client::transport::ReqwestClient;
/// use url::Url;
///
/// let provider = Dynv6Provider::new(
///     ReqwestClient::new(),
///     Url::parse("https://dynv6.com/api/update").unwrap(),
///     "myhost.dynv6.net",
///     Secret::new("token"),
/// );
/// assert_eq!(provider.endpoint(), "dynv6.com/api/update");
/// ```
#[derive(Debug)]
pub struct Dynv6Provider<H> {
    client: H,
    url: Url,
    hostname: String,
    token: Secret,
    timeout: Duration,
}

impl<H> Dynv6Provider<H> {
    /// Creates a provider with the default 30 second timeout.
    #[must_use]
    pub fn new(client: H, url: Url, hostname: impl Into<String>, token: Secret) -> Self {
        Self {
            client,
            url,
            hostname: hostname.into(),
            token,
            timeout: defaults::update_timeout(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `host/path` of the update endpoint, safe to log.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.url.host_str().unwrap_or_default(), self.url.path())
    }

    /// Builds the full update URL for `addresses`.
    ///
    /// Parameters already present in the configured URL are kept; the
    /// hostname, token and address fields are appended in that order.
    #[must_use]
    pub fn build_url(&self, addresses: &AddressSet) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(HOSTNAME_KEY, &self.hostname);
            query.append_pair(TOKEN_KEY, self.token.expose());
            for (key, value) in addresses.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url
    }
}

impl<H: HttpClient> UpdateSubmitter for Dynv6Provider<H> {
    async fn submit(&self, addresses: &AddressSet) -> Result<String, SubmitError> {
        let request = HttpRequest::get(self.build_url(addresses)).with_timeout(self.timeout);

        tracing::debug!(
            endpoint = %self.endpoint(),
            hostname = %self.hostname,
            "Submitting update: {addresses}"
        );

        let response = self.client.request(request).await?;
        let body = response.body_lossy();

        if !response.is_success() {
            return Err(SubmitError::Rejected {
                status: response.status,
                body: body.trim().to_string(),
            });
        }

        Ok(body.trim().to_string())
    }
}
