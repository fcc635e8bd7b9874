//! systemd unit installation and `systemctl` relaying.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::config::defaults;

use super::ServiceError;

/// Actions relayed to `systemctl` by the `service` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    /// `systemctl start`
    Start,
    /// `systemctl stop`
    Stop,
    /// `systemctl restart`
    Restart,
    /// `systemctl status`
    Status,
}

impl ServiceAction {
    /// Returns the `systemctl` verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over invoking `systemctl`.
///
/// Allows the install/uninstall sequences to be tested without systemd.
pub trait SystemCtl: Send + Sync {
    /// Runs `systemctl <args>` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits
    /// unsuccessfully.
    fn run(&self, args: &[&str]) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Production [`SystemCtl`] running the real binary.
///
/// Output is inherited so `status` prints straight to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemctlCommand;

impl SystemCtl for SystemctlCommand {
    async fn run(&self, args: &[&str]) -> Result<(), ServiceError> {
        let command = args.join(" ");
        let status = tokio::process::Command::new("systemctl")
            .args(args)
            .status()
            .await
            .map_err(|error| ServiceError::Spawn {
                command: command.clone(),
                error,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ServiceError::CommandFailed { command, status })
        }
    }
}

/// Renders the systemd unit for `exe`.
///
/// `--config` is only added when `config_path` differs from the default
/// location, so a default installation keeps a plain `ExecStart` line.
#[must_use]
pub fn render_unit(exe: &Path, config_path: &Path) -> String {
    let mut exec_start = quote_arg(&exe.display().to_string());
    if config_path != Path::new(defaults::CONFIG_PATH) {
        exec_start.push_str(" --config ");
        exec_start.push_str(&quote_arg(&config_path.display().to_string()));
    }

    format!(
        "[Unit]
Description=DynDNS Client
After=network-online.target
Wants=network-online.target

[Service]
Type=simple
ExecStart={exec_start}
Restart=always
RestartSec=10
StandardOutput=journal
StandardError=journal

[Install]
WantedBy=multi-user.target
"
    )
}

fn quote_arg(arg: &str) -> String {
    if arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Installs, removes and controls the `dyndns-client` systemd unit.
///
/// Privilege checks are the caller's job (see [`super::require_root`]).
#[derive(Debug)]
pub struct ServiceManager<C> {
    systemctl: C,
    unit_path: PathBuf,
    unit_name: String,
    config_path: PathBuf,
}

impl<C> ServiceManager<C> {
    /// Creates a manager for the default unit, running with `config_path`.
    #[must_use]
    pub fn new(systemctl: C, config_path: impl Into<PathBuf>) -> Self {
        Self {
            systemctl,
            unit_path: PathBuf::from(defaults::UNIT_PATH),
            unit_name: defaults::UNIT_NAME.to_string(),
            config_path: config_path.into(),
        }
    }

    /// Overrides the unit file location.
    #[must_use]
    pub fn with_unit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.unit_path = path.into();
        self
    }

    /// Returns the unit file location.
    #[must_use]
    pub fn unit_path(&self) -> &Path {
        &self.unit_path
    }

    /// Returns the systemctl runner.
    #[must_use]
    pub const fn systemctl(&self) -> &C {
        &self.systemctl
    }
}

impl<C: SystemCtl> ServiceManager<C> {
    /// Writes the unit for `exe`, then reloads, enables and starts it.
    ///
    /// # Errors
    ///
    /// Returns the first failing step; later steps are not attempted.
    pub async fn install(&self, exe: &Path) -> Result<(), ServiceError> {
        if let Some(dir) = self.unit_path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ServiceError::io("create directory", dir, e))?;
        }

        let unit = render_unit(exe, &self.config_path);
        std::fs::write(&self.unit_path, unit)
            .map_err(|e| ServiceError::io("write service file", &self.unit_path, e))?;
        tracing::debug!("Wrote {}", self.unit_path.display());

        self.systemctl.run(&["daemon-reload"]).await?;
        self.systemctl.run(&["enable", self.unit_name.as_str()]).await?;
        self.systemctl.run(&["start", self.unit_name.as_str()]).await?;

        Ok(())
    }

    /// Stops and removes the service and its configuration file.
    ///
    /// Every step is attempted; failures are logged and do not stop the
    /// sequence.
    pub async fn uninstall(&self) {
        self.best_effort(&["stop", self.unit_name.as_str()]).await;
        self.best_effort(&["disable", self.unit_name.as_str()]).await;
        remove_if_present(&self.unit_path);
        self.best_effort(&["daemon-reload"]).await;
        remove_if_present(&self.config_path);
    }

    /// Relays `action` to `systemctl`.
    ///
    /// # Errors
    ///
    /// Returns an error if `systemctl` fails; `status` of an inactive
    /// unit counts as a failure.
    pub async fn action(&self, action: ServiceAction) -> Result<(), ServiceError> {
        self.systemctl.run(&[action.as_str(), self.unit_name.as_str()]).await
    }

    async fn best_effort(&self, args: &[&str]) {
        if let Err(e) = self.systemctl.run(args).await {
            tracing::warn!("{e}");
        }
    }
}

fn remove_if_present(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {e}", path.display()),
    }
}
