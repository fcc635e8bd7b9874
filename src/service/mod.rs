//! Operational tooling around the update daemon.
//!
//! This module provides:
//! - systemd unit management ([`ServiceManager`], [`SystemCtl`])
//! - The interactive setup wizard ([`run_wizard`])
//! - Binary self-update ([`SelfUpdater`])
//! - Privilege checks ([`require_root`])
//!
//! Everything here is a thin collaborator of the binary's subcommands; the
//! update loop itself never depends on it.

mod error;
mod privilege;
mod setup;
mod systemd;
mod update;

#[cfg(test)]
mod setup_tests;

pub use error::ServiceError;
pub use privilege::{is_root, require_root};
pub use setup::{SetupAnswers, run_wizard, write_config};
pub use systemd::{ServiceAction, ServiceManager, SystemCtl, SystemctlCommand, render_unit};
pub use update::SelfUpdater;
