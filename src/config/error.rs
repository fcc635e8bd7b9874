//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal at startup: the update loop never starts with
/// an invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the configuration file (init/setup).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the field
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid update interval.
    #[error("Invalid interval '{value}': {reason}")]
    InvalidInterval {
        /// The invalid value provided
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid IP version value.
    #[error("Invalid IP version '{value}': expected 4, 6, 46, ipv4, ipv6, or both")]
    InvalidIpVersion {
        /// The invalid value provided
        value: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The DNS hostname to update.
    pub const HOSTNAME: &str = "hostname";
    /// The provider API token.
    pub const TOKEN: &str = "token";
    /// The IP version mode.
    pub const IP_VERSION: &str = "ip_version";
    /// The update interval.
    pub const INTERVAL: &str = "interval";
    /// The provider update endpoint.
    pub const UPDATE_URL: &str = "update_url";
    /// The IPv4 discovery endpoint.
    pub const IPV4_URL: &str = "ipv4_url";
    /// The baseline cache path.
    pub const STATE_FILE: &str = "state_file";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
