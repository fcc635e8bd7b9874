//! Validated configuration after merging CLI and file sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::network::IpVersion;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::file::ConfigFile;
use super::secret::Secret;

/// Fully validated configuration ready for use by the application.
///
/// Immutable for the lifetime of the process.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional
/// file contents, or [`ValidatedConfig::load`] to read the file as well.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// DNS hostname to update (required)
    pub hostname: String,

    /// Provider API token (required)
    pub token: Secret,

    /// Address families to report
    pub ip_version: IpVersion,

    /// Time between update cycles
    pub interval: Duration,

    /// Provider update endpoint
    pub update_url: Url,

    /// Public IPv4 discovery service
    pub ipv4_url: Url,

    /// Baseline cache path
    pub state_file: PathBuf,

    /// Run a single cycle and exit
    pub once: bool,

    /// Dry-run mode (resolve and compare without contacting the provider)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ hostname: {}, ip_version: {}, interval: {}s, update_url: {}, \
             ipv4_url: {}, state_file: {}, once: {}, dry_run: {} }}",
            self.hostname,
            self.ip_version,
            self.interval.as_secs(),
            self.update_url,
            self.ipv4_url,
            self.state_file.display(),
            self.once,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional file contents.
    ///
    /// CLI arguments take precedence over file values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`hostname`, `token`)
    /// - `ip_version` is not a recognised value
    /// - `interval` is zero or not a number
    /// - A URL is invalid or not HTTP(S)
    /// - No state file is given and the home directory is unknown
    pub fn from_raw(cli: &Cli, file: Option<&ConfigFile>) -> Result<Self, ConfigError> {
        let hostname = Self::resolve_hostname(cli, file)?;
        let token = Self::resolve_token(cli, file)?;
        let ip_version = Self::resolve_ip_version(cli, file)?;
        let interval = Self::resolve_interval(cli, file)?;

        let update_url = resolve_url(
            field::UPDATE_URL,
            file.and_then(|f| f.update_url.as_deref()),
            defaults::UPDATE_URL,
        )?;
        let ipv4_url = resolve_url(
            field::IPV4_URL,
            file.and_then(|f| f.ipv4_url.as_deref()),
            defaults::IPV4_URL,
        )?;

        let state_file = Self::resolve_state_file(cli, file)?;

        Ok(Self {
            hostname,
            token,
            ip_version,
            interval,
            update_url,
            ipv4_url,
            state_file,
            once: cli.once,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads the configuration file named by `cli.config` and merges it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(&cli.config)?;
        Self::from_raw(cli, Some(&file))
    }

    fn resolve_hostname(cli: &Cli, file: Option<&ConfigFile>) -> Result<String, ConfigError> {
        cli.hostname
            .as_deref()
            .or_else(|| file.and_then(|f| f.hostname.as_deref()))
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::HOSTNAME,
                    "Use --hostname or set hostname= in the config file",
                )
            })
    }

    fn resolve_token(cli: &Cli, file: Option<&ConfigFile>) -> Result<Secret, ConfigError> {
        cli.token
            .as_deref()
            .or_else(|| file.and_then(|f| f.token.as_deref()))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Secret::new)
            .ok_or_else(|| {
                ConfigError::missing(field::TOKEN, "Use --token or set token= in the config file")
            })
    }

    fn resolve_ip_version(
        cli: &Cli,
        file: Option<&ConfigFile>,
    ) -> Result<IpVersion, ConfigError> {
        // CLI takes precedence
        if let Some(version) = cli.ip_version {
            return Ok(version.into());
        }

        // A file value of 0 means unset, as written by older setup runs
        match file.and_then(|f| f.ip_version.as_deref()) {
            Some("0") | None => Ok(IpVersion::default()),
            Some(value) => parse_ip_version(value),
        }
    }

    fn resolve_interval(cli: &Cli, file: Option<&ConfigFile>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > file > default
        let seconds = match (cli.interval, file.and_then(|f| f.interval.as_deref())) {
            (Some(secs), _) => secs,
            (None, Some(raw)) => match raw.parse::<u64>() {
                // A file value of 0 means unset, as written by older setup runs
                Ok(0) => defaults::INTERVAL_SECS,
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError::InvalidInterval {
                        value: raw.to_string(),
                        reason: e.to_string(),
                    });
                }
            },
            (None, None) => defaults::INTERVAL_SECS,
        };

        if seconds == 0 {
            return Err(ConfigError::InvalidInterval {
                value: seconds.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_state_file(cli: &Cli, file: Option<&ConfigFile>) -> Result<PathBuf, ConfigError> {
        // CLI takes precedence
        if let Some(ref path) = cli.state_file {
            return Ok(path.clone());
        }

        if let Some(path) = file.and_then(|f| f.state_file.as_deref()) {
            return Ok(PathBuf::from(path));
        }

        defaults::state_file().ok_or_else(|| {
            ConfigError::missing(
                field::STATE_FILE,
                "Home directory unknown; use --state-file or set state_file= in the config file",
            )
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::file::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Parses an IP version from its config-file or CLI spelling.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidIpVersion`] for unrecognised values.
pub fn parse_ip_version(s: &str) -> Result<IpVersion, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "4" | "ipv4" | "v4" => Ok(IpVersion::V4),
        "6" | "ipv6" | "v6" => Ok(IpVersion::V6),
        "46" | "both" | "all" | "dual" => Ok(IpVersion::Both),
        _ => Err(ConfigError::InvalidIpVersion {
            value: s.to_string(),
        }),
    }
}

fn resolve_url(
    field: &'static str,
    configured: Option<&str>,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = configured.unwrap_or(default);
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }

    Ok(url)
}
