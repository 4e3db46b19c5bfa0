//! Removal of features nobody owns.

extern crate alloc;

use alloc::vec::Vec;

use crate::matrix;
use crate::state::FeatureState;

/// Number of features removed by [`prune_inactive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PruneReport {
    /// Features dropped.
    pub removed: usize,
    /// Features left.
    pub remaining: usize,
}

/// Drop every feature whose ownership column sums to zero.
///
/// Columns of `Z` and the matching rows of `Y` are removed together,
/// preserving the order of the survivors. Applying it twice is the same as
/// applying it once. All features may be removed, leaving K = 0.
pub fn prune_inactive(state: FeatureState) -> (FeatureState, PruneReport) {
    let sums = matrix::column_sums(state.z());
    let active: Vec<usize> = sums
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s > 0)
        .map(|(k, _)| k)
        .collect();

    let removed = sums.len() - active.len();
    if removed == 0 {
        let report = PruneReport {
            removed,
            remaining: active.len(),
        };
        return (state, report);
    }

    let z = state.z().select_columns(active.iter());
    let y = state.y().select_rows(active.iter());
    let report = PruneReport {
        removed,
        remaining: active.len(),
    };
    (FeatureState::from_parts(y, z), report)
}
