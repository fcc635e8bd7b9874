//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Every caller in this crate treats these as soft failures for the
/// current cycle.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and body read errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
