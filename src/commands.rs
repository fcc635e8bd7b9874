//! Service-management subcommands.
//!
//! Each handler is a thin wrapper that wires the library's service
//! collaborators to the real terminal, `systemctl` and HTTP client.

use std::path::Path;

use thiserror::Error;

use dyndns_client::config::{Command, ConfigError};
use dyndns_client::service::{
    SelfUpdater, ServiceError, ServiceManager, SystemctlCommand, require_root, run_wizard, write_config,
};
use dyndns_client::transport::ReqwestClient;

/// Error type for subcommand failures.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid or unwritable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A service-management step failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl CommandError {
    /// Returns true if the failure is the user's input rather than the system.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Service(
                    ServiceError::NotRoot
                        | ServiceError::MissingInput(_)
                        | ServiceError::InvalidUrl { .. }
                )
        )
    }
}

/// Executes a subcommand other than `init`.
///
/// Excluded from coverage - requires a terminal, root and systemd.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, config_path: &Path) -> Result<(), CommandError> {
    match command {
        Command::Setup => setup(config_path).await,
        Command::Install => {
            install(config_path).await?;
            println!("Service installed and started successfully!");
            Ok(())
        }
        Command::Uninstall => {
            require_root()?;
            ServiceManager::new(SystemctlCommand, config_path).uninstall().await;
            println!("DynDNS client uninstalled successfully");
            Ok(())
        }
        Command::Service { action } => {
            ServiceManager::new(SystemctlCommand, config_path)
                .action((*action).into())
                .await?;
            Ok(())
        }
        Command::SelfUpdate { url, install_path } => {
            require_root()?;
            let updater = SelfUpdater::from_str_url(ReqwestClient::new(), url, install_path)?;
            let size = updater.run().await?;
            println!(
                "Updated {} ({size} bytes). Run 'dyndns-client service restart' to use it.",
                updater.install_path().display()
            );
            Ok(())
        }
        Command::Init { .. } => Ok(()),
    }
}

#[cfg(not(tarpaulin_include))]
async fn setup(config_path: &Path) -> Result<(), CommandError> {
    let answers = tokio::task::spawn_blocking(|| {
        run_wizard(std::io::stdin().lock(), std::io::stdout())
    })
    .await
    .map_err(|e| ServiceError::Task(e.to_string()))??;

    write_config(config_path, &answers.config)?;
    println!("\nConfiguration saved to {}", config_path.display());

    if answers.install {
        install(config_path).await?;
        println!("Service installed and started successfully!");
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
async fn install(config_path: &Path) -> Result<(), CommandError> {
    require_root()?;
    let exe = std::env::current_exe().map_err(ServiceError::CurrentExe)?;
    ServiceManager::new(SystemctlCommand, config_path)
        .install(&exe)
        .await?;
    Ok(())
}
