//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::defaults;

/// dyndns-client: Dynamic DNS update client
///
/// Periodically discovers the host's public IPv4/IPv6 addresses and
/// updates a dynv6-style DNS record when they change.
#[derive(Debug, Parser)]
#[command(name = "dyndns-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (omit to run the update daemon)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true, default_value = defaults::CONFIG_PATH)]
    pub config: PathBuf,

    /// DNS hostname to update (overrides config file)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Provider API token (overrides config file; visible in process lists)
    #[arg(long)]
    pub token: Option<String>,

    /// Address families to report
    #[arg(long = "ip-version", value_enum)]
    pub ip_version: Option<IpVersionArg>,

    /// Seconds between update cycles
    #[arg(long)]
    pub interval: Option<u64>,

    /// Path to the last-submitted-address cache
    #[arg(long = "state-file")]
    pub state_file: Option<PathBuf>,

    /// Run a single update cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Test mode - resolve and compare addresses without contacting the provider
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for dyndns-client
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively create the configuration file
    Setup,

    /// Install and start the systemd service (requires root)
    Install,

    /// Stop and remove the systemd service and configuration (requires root)
    Uninstall,

    /// Start, stop, restart or show the status of the systemd service
    Service {
        /// Action to relay to systemctl
        #[arg(value_enum)]
        action: ServiceActionArg,
    },

    /// Replace the installed binary with the latest release (requires root)
    SelfUpdate {
        /// Download location of the release binary
        #[arg(long, default_value = defaults::BINARY_URL)]
        url: String,

        /// Path of the installed binary to replace
        #[arg(long = "install-path", default_value = defaults::INSTALL_PATH)]
        install_path: PathBuf,
    },

    /// Generate a commented configuration template
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "dyndns-client.conf")]
        output: PathBuf,
    },
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// Report IPv4 addresses only
    #[value(name = "ipv4", alias = "4")]
    V4,
    /// Report IPv6 addresses only
    #[value(name = "ipv6", alias = "6")]
    V6,
    /// Report both IPv4 and IPv6 addresses
    #[value(name = "both", alias = "46")]
    Both,
}

impl From<IpVersionArg> for crate::network::IpVersion {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => Self::V4,
            IpVersionArg::V6 => Self::V6,
            IpVersionArg::Both => Self::Both,
        }
    }
}

/// Service action argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceActionArg {
    /// Start the service
    Start,
    /// Stop the service
    Stop,
    /// Restart the service
    Restart,
    /// Show the service status
    Status,
}

impl From<ServiceActionArg> for crate::service::ServiceAction {
    fn from(arg: ServiceActionArg) -> Self {
        match arg {
            ServiceActionArg::Start => Self::Start,
            ServiceActionArg::Stop => Self::Stop,
            ServiceActionArg::Restart => Self::Restart,
            ServiceActionArg::Status => Self::Status,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
