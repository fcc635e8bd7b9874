//! `key=value` configuration file parsing.
//!
//! The format is line based: blank lines, `#` comments, lines without `=`
//! and unknown keys are ignored. Later occurrences of a key win.

use std::path::Path;

use super::ConfigError;
use super::field;

/// Raw values read from the configuration file.
///
/// All fields are optional so the file can be merged with CLI arguments;
/// empty values are treated as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// DNS hostname to update
    pub hostname: Option<String>,
    /// Provider API token
    pub token: Option<String>,
    /// IP version mode: `4`, `6` or `46`
    pub ip_version: Option<String>,
    /// Update interval in seconds
    pub interval: Option<String>,
    /// Provider update endpoint
    pub update_url: Option<String>,
    /// IPv4 discovery endpoint
    pub ipv4_url: Option<String>,
    /// Baseline cache path
    pub state_file: Option<String>,
}

impl ConfigFile {
    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::parse(&content))
    }

    /// Parses configuration from file contents.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let slot = match key.trim() {
                field::HOSTNAME => &mut config.hostname,
                field::TOKEN => &mut config.token,
                field::IP_VERSION => &mut config.ip_version,
                field::INTERVAL => &mut config.interval,
                field::UPDATE_URL => &mut config.update_url,
                field::IPV4_URL => &mut config.ipv4_url,
                field::STATE_FILE => &mut config.state_file,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }

        config
    }

    /// Renders the present fields back into file form.
    #[must_use]
    pub fn render(&self) -> String {
        let entries = [
            (field::HOSTNAME, &self.hostname),
            (field::TOKEN, &self.token),
            (field::IP_VERSION, &self.ip_version),
            (field::INTERVAL, &self.interval),
            (field::UPDATE_URL, &self.update_url),
            (field::IPV4_URL, &self.ipv4_url),
            (field::STATE_FILE, &self.state_file),
        ];

        entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}\n")))
            .collect()
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r"# dyndns-client configuration
# Lines are key=value; blank lines and lines starting with # are ignored.

# DNS hostname to keep updated (required)
# hostname=myhost.dynv6.net

# Provider API token (required)
# token=your-token-here

# Address families to report: 4 (IPv4 only), 6 (IPv6 only) or 46 (both, default)
ip_version=46

# Seconds between update cycles (default: 300)
interval=300

# Provider update endpoint (default: https://dynv6.com/api/update)
# update_url=https://dynv6.com/api/update

# Public IPv4 discovery service (default: https://api.ipify.org)
# ipv4_url=https://api.ipify.org

# Last submitted addresses cache (default: ~/.dyndns-client.addr)
# state_file=/var/lib/dyndns-client/last.addr
"
    .to_string()
}
