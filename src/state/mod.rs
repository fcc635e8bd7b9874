//! Baseline persistence for detecting changes across cycles and restarts.
//!
//! The baseline is the last address set the provider confirmed. It is
//! stored as the canonical [`AddressSet`] encoding in a small text file.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileBaselineStore;

use std::io;

use thiserror::Error;

use crate::network::AddressSet;

/// Result of loading the baseline from persistent storage.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - Successfully loaded previous baseline
/// - No previous baseline exists (first run, or an empty file)
/// - A baseline exists but is unreadable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// Successfully loaded the previously submitted addresses.
    Loaded(AddressSet),

    /// No baseline exists.
    NotFound,

    /// The baseline file exists but could not be read or decoded.
    /// The cycle continues with an empty baseline and overwrites it on
    /// the next successful submission.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded baseline, or an empty set for `NotFound`/`Corrupted`.
    #[must_use]
    pub fn into_baseline(self) -> AddressSet {
        match self {
            Self::Loaded(addresses) => addresses,
            Self::NotFound | Self::Corrupted { .. } => AddressSet::new(None, None),
        }
    }
}

/// Errors that can occur while persisting the baseline.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants to allow graceful degradation.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the baseline file.
    #[error("Failed to write baseline file: {0}")]
    Write(#[source] io::Error),
}

/// Abstraction for persisting the baseline between cycles and runs.
///
/// Implementations should:
/// - Use atomic writes so a crash never leaves a half-written baseline
/// - Handle missing files gracefully (return `LoadResult::NotFound`)
/// - Degrade gracefully on read errors (return `LoadResult::Corrupted`)
pub trait BaselineStore: Send + Sync {
    /// Loads the last submitted addresses.
    fn load(&self) -> LoadResult;

    /// Replaces the baseline with `addresses`.
    ///
    /// # Errors
    ///
    /// Returns an error if the baseline cannot be written.
    fn save(
        &self,
        addresses: &AddressSet,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}
