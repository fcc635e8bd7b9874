//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use dyndns_client::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable file, missing hostname or token, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - failed `--once` cycle, systemctl or download failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns the hint printed after a configuration error, if any.
#[must_use]
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. }
            if *f == field::HOSTNAME || *f == field::TOKEN =>
        {
            Some("Run 'dyndns-client setup' to create the configuration interactively.")
        }
        ConfigError::FileRead { .. } => Some(
            "Run 'dyndns-client setup' or 'dyndns-client init' to create a configuration file.",
        ),
        _ => None,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_hostname_suggests_setup() {
        let error = ConfigError::missing(field::HOSTNAME, "set it");
        assert!(config_hint(&error).unwrap().contains("setup"));
    }

    #[test]
    fn unreadable_file_suggests_init() {
        let error = ConfigError::FileRead {
            path: PathBuf::from("/etc/dyndns-client.conf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(config_hint(&error).unwrap().contains("init"));
    }

    #[test]
    fn invalid_interval_has_no_hint() {
        let error = ConfigError::InvalidInterval {
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        assert!(config_hint(&error).is_none());
    }
}
