//! Configuration layer for dyndns-client.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - `key=value` configuration file parsing ([`ConfigFile`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--hostname`, `--token`, `--ip-version`,
//!    `--interval`, `--state-file`
//! 2. **Config file** - `/etc/dyndns-client.conf` or the `--config` path
//! 3. **Built-in defaults** - `ip_version=46`, `interval=300`, dynv6 and
//!    ipify endpoints, `~/.dyndns-client.addr`
//!
//! `hostname` and `token` have no defaults. The endpoints are file-only.

mod cli;
pub mod defaults;
mod error;
mod file;
mod secret;
mod validated;

#[cfg(test)]
mod file_tests;

pub use cli::{Cli, Command, IpVersionArg, ServiceActionArg};
pub use error::{ConfigError, field};
pub use file::{ConfigFile, default_config_template};
pub use secret::Secret;
pub use validated::{ValidatedConfig, parse_ip_version, write_default_config};
