//! Error types for address resolution.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for resolving a single address family.
///
/// All variants are soft failures: the family is omitted for the
/// current cycle and resolution is attempted again on the next one.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The discovery request failed at the transport level.
    #[error("discovery request failed: {0}")]
    Http(#[from] HttpError),

    /// The discovery service answered with a non-2xx status.
    #[error("discovery service returned {status}")]
    Status {
        /// The HTTP status received
        status: http::StatusCode,
    },

    /// The discovery service answered with an empty body.
    #[error("discovery service returned an empty body")]
    EmptyBody,

    /// The body was not a valid address of the expected family.
    #[error("discovery service returned an invalid address: '{body}'")]
    InvalidAddress {
        /// The (truncated) response body
        body: String,
    },

    /// An external command could not be started.
    #[error("failed to run '{program}': {error}")]
    Command {
        /// The program that failed to start
        program: &'static str,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// An external command exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    CommandFailed {
        /// The program that failed
        program: &'static str,
        /// Its exit status
        status: ExitStatus,
    },

    /// The local interface table could not be read.
    #[error("failed to enumerate interfaces: {0}")]
    Interfaces(String),

    /// A lookup did not finish in time.
    #[error("{what} timed out after {}s", after.as_secs())]
    Timeout {
        /// Which lookup timed out
        what: &'static str,
        /// The bound that was exceeded
        after: Duration,
    },

    /// No usable address was found.
    #[error("no usable address found")]
    NoAddress,
}
