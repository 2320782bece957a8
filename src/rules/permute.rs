//! Permutation expander: stacked word tiles into concrete sequences.
//!
//! Word tiles stacked on one cell are independent grammatical candidates, so
//! each run expands to the cartesian product across its slots. Runs expand
//! independently; they are never crossed with each other.

use crate::core::EntityId;

use super::scanner::Run;

/// Expand every run into its concrete entity sequences.
#[must_use]
pub fn expand_all(runs: &[Run]) -> Vec<Vec<EntityId>> {
    let mut sequences = Vec::new();
    for run in runs {
        expand_into(run, &mut Vec::with_capacity(run.len()), &mut sequences);
    }
    sequences
}

fn expand_into(run: &Run, current: &mut Vec<EntityId>, out: &mut Vec<Vec<EntityId>>) {
    if current.len() == run.len() {
        out.push(current.clone());
        return;
    }
    for &entity in &run[current.len()] {
        current.push(entity);
        expand_into(run, current, out);
        current.pop();
    }
}
