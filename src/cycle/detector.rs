//! Change detection between the baseline and freshly resolved addresses.

use crate::network::AddressSet;

/// Decision produced by comparing a resolved set with the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing was resolved; the cycle must abort without side effects.
    NoAddresses,

    /// The resolved set equals the non-empty baseline.
    Unchanged,

    /// The resolved set differs and should be submitted.
    Changed {
        /// The baseline the set was compared against
        previous: AddressSet,
        /// The candidate baseline, persisted only after a successful submission
        current: AddressSet,
    },
}

/// Compares `current` with `baseline`.
///
/// Comparison is structural. An empty baseline never matches, so the
/// first successful resolution after a fresh start is always submitted.
#[must_use]
pub fn detect_change(baseline: AddressSet, current: AddressSet) -> Change {
    if current.is_empty() {
        return Change::NoAddresses;
    }

    if !baseline.is_empty() && baseline == current {
        return Change::Unchanged;
    }

    Change::Changed {
        previous: baseline,
        current,
    }
}
