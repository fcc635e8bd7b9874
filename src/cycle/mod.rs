//! One update cycle: resolve, compare against the baseline, submit, persist.
//!
//! This module provides:
//! - Pure change detection between a baseline and a resolved set ([`detect_change`])
//! - The cycle orchestrator ([`UpdateCycle`]) and its result ([`CycleOutcome`])

mod detector;
mod outcome;
mod update;

#[cfg(test)]
mod detector_tests;
#[cfg(test)]
mod update_tests;

pub use detector::{Change, detect_change};
pub use outcome::{CycleFailure, CycleOutcome};
pub use update::UpdateCycle;
