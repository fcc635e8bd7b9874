//! Error types for update submission.

use thiserror::Error;

use crate::transport::HttpError;

/// Error returned when the provider did not accept an update.
///
/// The baseline is left untouched for every variant.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request did not complete (connection failure, timeout).
    #[error("update request failed: {0}")]
    Http(#[from] HttpError),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {body}")]
    Rejected {
        /// The HTTP status received
        status: http::StatusCode,
        /// The response body, lossily decoded
        body: String,
    },
}
