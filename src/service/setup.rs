//! Interactive setup wizard.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{ConfigFile, defaults};
use crate::network::IpVersion;

use super::ServiceError;

/// Answers collected by [`run_wizard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    /// Configuration to write
    pub config: ConfigFile,
    /// Whether the user asked to install the systemd service
    pub install: bool,
}

/// Prompts for the configuration on `output` and reads answers from `input`.
///
/// Hostname and token are required. The IP version menu defaults to both
/// families and the interval to 300 seconds when left blank or invalid.
///
/// # Errors
///
/// Returns [`ServiceError::MissingInput`] for an empty hostname or token,
/// and [`ServiceError::Terminal`] if reading or writing fails.
pub fn run_wizard<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<SetupAnswers, ServiceError> {
    let mut prompt = |text: &str| -> Result<String, ServiceError> {
        write!(output, "{text}").map_err(ServiceError::Terminal)?;
        output.flush().map_err(ServiceError::Terminal)?;
        let mut line = String::new();
        input.read_line(&mut line).map_err(ServiceError::Terminal)?;
        Ok(line.trim().to_string())
    };

    let hostname = prompt("=== DynDNS Client Setup ===\n\nEnter hostname (e.g., myhost.dynv6.net): ")?;
    if hostname.is_empty() {
        return Err(ServiceError::MissingInput("hostname"));
    }

    let token = prompt("Enter API token: ")?;
    if token.is_empty() {
        return Err(ServiceError::MissingInput("API token"));
    }

    let choice = prompt(
        "\nSelect IP version:\n1. IPv4 only\n2. IPv6 only\n3. Both IPv4 and IPv6\nEnter choice (1-3): ",
    )?;
    let ip_version = match choice.as_str() {
        "1" => IpVersion::V4,
        "2" => IpVersion::V6,
        _ => IpVersion::Both,
    };

    let interval = prompt(&format!(
        "Enter update interval in seconds (default {}): ",
        defaults::INTERVAL_SECS
    ))?;
    let interval = interval
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults::INTERVAL_SECS);

    let install = prompt("\nDo you want to install as a systemd service? (y/n) ")?;

    Ok(SetupAnswers {
        config: ConfigFile {
            hostname: Some(hostname),
            token: Some(token),
            ip_version: Some(ip_version.as_config_value().to_string()),
            interval: Some(interval.to_string()),
            ..ConfigFile::default()
        },
        install: install.eq_ignore_ascii_case("y"),
    })
}

/// Writes `config` to `path`, readable by the owner only.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_config(path: &Path, config: &ConfigFile) -> Result<(), ServiceError> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| ServiceError::io("write config", path, e))?;

    // An existing file keeps its mode on open; tighten it explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|e| ServiceError::io("set permissions on", path, e))?;
    }

    file.write_all(config.render().as_bytes())
        .map_err(|e| ServiceError::io("write config", path, e))
}
