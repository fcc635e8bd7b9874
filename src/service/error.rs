//! Error types for service management.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::transport::HttpError;

/// Errors from the setup, install, service and self-update subcommands.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The operation needs root privileges.
    #[error("This operation requires root privileges. Use sudo")]
    NotRoot,

    /// A filesystem operation failed.
    #[error("Failed to {action} '{path}': {error}")]
    Io {
        /// What was being done
        action: &'static str,
        /// The path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// `systemctl` could not be started.
    #[error("Failed to run 'systemctl {command}': {error}")]
    Spawn {
        /// The systemctl arguments
        command: String,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// `systemctl` exited unsuccessfully.
    #[error("'systemctl {command}' exited with {status}")]
    CommandFailed {
        /// The systemctl arguments
        command: String,
        /// Its exit status
        status: ExitStatus,
    },

    /// The path of the running executable could not be determined.
    #[error("Failed to get executable path: {0}")]
    CurrentExe(#[source] std::io::Error),

    /// A required wizard answer was empty.
    #[error("{0} is required")]
    MissingInput(&'static str),

    /// Reading the wizard input or writing its prompts failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),

    /// The release download failed at the transport level.
    #[error("Failed to download binary: {0}")]
    Download(#[from] HttpError),

    /// The release download returned a non-2xx status.
    #[error("Failed to download binary: status {status}")]
    DownloadStatus {
        /// The HTTP status received
        status: http::StatusCode,
    },

    /// The release download returned no bytes.
    #[error("Downloaded file is empty")]
    EmptyDownload,

    /// The download URL is not valid.
    #[error("Invalid download URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

impl ServiceError {
    pub(super) fn io(action: &'static str, path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            error,
        }
    }
}
