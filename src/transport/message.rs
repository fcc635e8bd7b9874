//! HTTP request/response types and client trait.

use std::time::Duration;

use super::HttpError;

/// An HTTP request to be sent.
///
/// Every request issued by this crate is bounded; `timeout` is applied
/// on top of whatever the client itself is configured with.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL, including the query string
    pub url: url::Url,
    /// Upper bound for the whole exchange (connect, send, read body)
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL and no timeout.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            timeout: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An HTTP response received from a server.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the HTTP library so the resolver and submitter can be
/// exercised against mock clients.
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the buffered response.
    ///
    /// Non-2xx statuses are returned as `Ok`; interpreting the status is
    /// the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
