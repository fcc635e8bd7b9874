//! Result of a single update cycle.

use std::fmt;

use thiserror::Error;

use crate::network::AddressSet;
use crate::provider::SubmitError;

/// What a cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The provider accepted the set; it is the new baseline.
    Updated(AddressSet),

    /// Nothing was submitted because the addresses did not change
    /// (or dry-run mode suppressed the submission).
    Skipped,

    /// The cycle ended without a successful submission.
    Failed(CycleFailure),
}

impl CycleOutcome {
    /// Short label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Updated(_) => "updated",
            Self::Skipped => "skipped",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label();
        match self {
            Self::Updated(addresses) => write!(f, "{label} ({addresses})"),
            Self::Skipped => f.write_str(label),
            Self::Failed(reason) => write!(f, "{label} ({reason})"),
        }
    }
}

/// Why a cycle failed.
#[derive(Debug, Error)]
pub enum CycleFailure {
    /// No address of any enabled family could be resolved.
    #[error("no IP addresses available")]
    NoAddresses,

    /// The provider did not accept the update.
    #[error(transparent)]
    Submission(#[from] SubmitError),
}
