//! Production HTTP client implementation using reqwest.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`HttpClient`].
/// Per-request timeouts come from [`HttpRequest::timeout`].
///
/// # Example
///
/// ```no_run
/// use dyndns_client::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.ipify.org")?;
/// let request = HttpRequest::get(url).with_timeout(Duration::from_secs(10));
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with the crate's user agent.
    ///
    /// Falls back to reqwest's default client if the builder fails.
    #[must_use]
    pub fn new() -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { inner }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a reqwest error, dropping the URL so query-string credentials
/// never reach log output.
fn classify(e: reqwest::Error) -> HttpError {
    let e = e.without_url();
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse::new(status, body))
    }
}
