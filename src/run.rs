//! Application execution logic.
//!
//! This module contains the loop driver that runs an update cycle on a
//! fixed interval until a shutdown signal arrives.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use dyndns_client::config::ValidatedConfig;
use dyndns_client::cycle::{CycleFailure, CycleOutcome, UpdateCycle};
use dyndns_client::network::{Ipv6Lookup, PublicIpv4Lookup, SystemResolver};
use dyndns_client::provider::Dynv6Provider;
use dyndns_client::state::FileBaselineStore;
use dyndns_client::transport::ReqwestClient;

/// Type alias for the application's fully wired update cycle.
type AppCycle = UpdateCycle<
    SystemResolver<ReqwestClient>,
    Dynv6Provider<ReqwestClient>,
    FileBaselineStore,
>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The single cycle requested with `--once` failed.
    #[error("Update cycle failed: {0}")]
    CycleFailed(#[source] CycleFailure),
}

/// Executes the update daemon.
///
/// Runs one cycle immediately, then one per interval until Ctrl+C or
/// SIGTERM. With `--once` a single cycle runs and its failure is returned.
///
/// # Errors
///
/// Returns an error only in `--once` mode when the cycle failed.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Real network access
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let cycle = create_cycle(&config);

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - updates will be logged but not sent");
    }
    tracing::debug!("Baseline file: {}", cycle.store().path().display());

    if config.once {
        return match cycle.run().await {
            CycleOutcome::Failed(reason) => Err(RunError::CycleFailed(reason)),
            outcome => {
                tracing::debug!("Cycle {outcome}");
                Ok(())
            }
        };
    }

    tracing::info!(
        "Checking for address changes every {}s",
        config.interval.as_secs()
    );
    let cycles = run_loop(|| cycle.run(), config.interval, shutdown_signal()).await;
    tracing::debug!("Stopped after {cycles} cycle(s)");

    Ok(())
}

/// Creates the update cycle from configuration.
fn create_cycle(config: &ValidatedConfig) -> AppCycle {
    let client = ReqwestClient::new();

    let resolver = SystemResolver::new(
        PublicIpv4Lookup::new(client.clone(), config.ipv4_url.clone()),
        Ipv6Lookup::new(),
    );
    let provider = Dynv6Provider::new(
        client,
        config.update_url.clone(),
        config.hostname.clone(),
        config.token.clone(),
    );
    let store = FileBaselineStore::new(&config.state_file);

    UpdateCycle::new(resolver, provider, store)
        .with_ip_version(config.ip_version)
        .with_dry_run(config.dry_run)
}

/// Runs `run_cycle` now and then once per `interval` until `shutdown` completes.
///
/// A cycle in progress always runs to completion; shutdown only interrupts
/// the wait between cycles. Returns the number of cycles run.
async fn run_loop<F, Fut, S>(mut run_cycle: F, interval: Duration, shutdown: S) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CycleOutcome>,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        let outcome = run_cycle().await;
        cycles += 1;
        tracing::debug!("Cycle {cycles}: {outcome}");

        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return cycles;
            }

            () = tokio::time::sleep(interval) => {}
        }
    }
}

/// Returns a future that completes when SIGINT or SIGTERM is received.
///
/// Handlers are installed before the future is first polled, so a signal
/// arriving during a cycle is observed at the next wait.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(all(unix, not(tarpaulin_include)))]
fn shutdown_signal() -> impl Future<Output = ()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt =
        signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");
    let mut terminate =
        signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

    async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    }
}

/// Returns a future that completes when Ctrl+C is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(all(not(unix), not(tarpaulin_include)))]
fn shutdown_signal() -> impl Future<Output = ()> {
    async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}
