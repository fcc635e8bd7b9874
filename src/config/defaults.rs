//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default configuration file path.
pub const CONFIG_PATH: &str = "/etc/dyndns-client.conf";

/// Default provider update endpoint.
pub const UPDATE_URL: &str = "https://dynv6.com/api/update";

/// Default public IPv4 discovery service.
pub const IPV4_URL: &str = "https://api.ipify.org";

/// Baseline cache file name, relative to the user's home directory.
pub const STATE_FILE_NAME: &str = ".dyndns-client.addr";

/// Release binary fetched by `self-update`.
pub const BINARY_URL: &str =
    "https://raw.githubusercontent.com/LucazPlays/dyndnsclient/refs/heads/main/dyndns-client-linux";

/// Installed binary replaced by `self-update`.
pub const INSTALL_PATH: &str = "/usr/local/bin/dyndns-client";

/// systemd unit name.
pub const UNIT_NAME: &str = "dyndns-client";

/// systemd unit file location.
pub const UNIT_PATH: &str = "/etc/systemd/system/dyndns-client.service";

/// Default update interval in seconds.
pub const INTERVAL_SECS: u64 = 300;

/// Timeout for the provider update request in seconds.
pub const UPDATE_TIMEOUT_SECS: u64 = 30;

/// Timeout for the IPv4 discovery request in seconds.
pub const DISCOVERY_TIMEOUT_SECS: u64 = 10;

/// Timeout for each local IPv6 lookup strategy in seconds.
pub const LOCAL_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Timeout for the `self-update` download in seconds.
pub const SELF_UPDATE_TIMEOUT_SECS: u64 = 120;

/// Provider update timeout as Duration.
#[must_use]
pub const fn update_timeout() -> Duration {
    Duration::from_secs(UPDATE_TIMEOUT_SECS)
}

/// IPv4 discovery timeout as Duration.
#[must_use]
pub const fn discovery_timeout() -> Duration {
    Duration::from_secs(DISCOVERY_TIMEOUT_SECS)
}

/// Local IPv6 lookup timeout as Duration.
#[must_use]
pub const fn local_lookup_timeout() -> Duration {
    Duration::from_secs(LOCAL_LOOKUP_TIMEOUT_SECS)
}

/// `self-update` download timeout as Duration.
#[must_use]
pub const fn self_update_timeout() -> Duration {
    Duration::from_secs(SELF_UPDATE_TIMEOUT_SECS)
}

/// Default baseline cache path: `~/.dyndns-client.addr`.
///
/// Returns `None` if the home directory cannot be determined.
#[must_use]
pub fn state_file() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|home| home.join(STATE_FILE_NAME))
}
