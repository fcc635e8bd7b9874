//! The update cycle orchestrator.

use crate::network::{AddressResolver, AddressSet, IpVersion, resolve_addresses};
use crate::provider::UpdateSubmitter;
use crate::state::{BaselineStore, LoadResult};

use super::{Change, CycleFailure, CycleOutcome, detect_change};

/// Runs one resolve/compare/submit/persist pass.
///
/// # Type Parameters
///
/// - `R`: Address resolver
/// - `S`: Update submitter
/// - `B`: Baseline store
///
/// The baseline is re-read from the store at the start of every cycle and
/// written only after the provider confirmed the update, so a failed or
/// skipped cycle never changes it.
#[derive(Debug)]
pub struct UpdateCycle<R, S, B> {
    resolver: R,
    submitter: S,
    store: B,
    ip_version: IpVersion,
    dry_run: bool,
}

impl<R, S, B> UpdateCycle<R, S, B> {
    /// Creates a cycle reporting both families.
    #[must_use]
    pub const fn new(resolver: R, submitter: S, store: B) -> Self {
        Self {
            resolver,
            submitter,
            store,
            ip_version: IpVersion::Both,
            dry_run: false,
        }
    }

    /// Restricts the families that are resolved and reported.
    #[must_use]
    pub const fn with_ip_version(mut self, ip_version: IpVersion) -> Self {
        self.ip_version = ip_version;
        self
    }

    /// Enables dry-run mode: changes are logged but never submitted.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the configured IP version.
    #[must_use]
    pub const fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    /// Returns the baseline store.
    #[must_use]
    pub const fn store(&self) -> &B {
        &self.store
    }
}

impl<R, S, B> UpdateCycle<R, S, B>
where
    R: AddressResolver,
    S: UpdateSubmitter,
    B: BaselineStore,
{
    /// Executes one cycle.
    ///
    /// Never returns an error: every failure is folded into
    /// [`CycleOutcome::Failed`] so the loop keeps running.
    pub async fn run(&self) -> CycleOutcome {
        let loaded = self.store.load();
        match &loaded {
            LoadResult::Loaded(_) => {}
            LoadResult::NotFound => tracing::debug!("No previous baseline found"),
            LoadResult::Corrupted { reason } => {
                tracing::warn!("Baseline unreadable ({reason}), will overwrite on next update");
            }
        }
        let baseline = loaded.into_baseline();

        let current = resolve_addresses(&self.resolver, self.ip_version).await;

        match detect_change(baseline, current) {
            Change::NoAddresses => {
                tracing::warn!("No IP addresses available, skipping update");
                CycleOutcome::Failed(CycleFailure::NoAddresses)
            }
            Change::Unchanged => {
                tracing::info!("IP address unchanged, skipping update");
                CycleOutcome::Skipped
            }
            Change::Changed { previous, current } if self.dry_run => {
                tracing::info!("[DRY-RUN] Would update {previous} -> {current}");
                CycleOutcome::Skipped
            }
            Change::Changed { previous, current } => {
                tracing::debug!("Address change detected: {previous} -> {current}");
                self.submit(current).await
            }
        }
    }

    async fn submit(&self, current: AddressSet) -> CycleOutcome {
        match self.submitter.submit(&current).await {
            Ok(body) => {
                tracing::info!("Update successful: {body}");
                if let Err(e) = self.store.save(&current).await {
                    tracing::error!("Failed to save baseline: {e}");
                }
                CycleOutcome::Updated(current)
            }
            Err(e) => {
                tracing::error!("Update failed: {e}");
                CycleOutcome::Failed(CycleFailure::Submission(e))
            }
        }
    }
}
