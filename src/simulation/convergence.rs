//! Stability test on consecutive strategy pairs.

use crate::mechanics::l1_distance;
use crate::simulation::history::History;

/// Fixed bound on Σ|Δ| for each player between consecutive steps.
///
/// This is an absolute sum, not a per-entry average: larger spaces need
/// proportionally more movement to stay unconverged.
pub const TOLERANCE: f64 = 0.01;

/// (Σ|Δsender|, Σ|Δreceiver|) between the newest step and the one before.
pub fn deltas(history: &History) -> Option<(f64, f64)> {
    let (prev_sender, prev_receiver) = history.previous()?;
    let (sender, receiver) = history.current();
    Some((
        l1_distance(sender.values(), prev_sender.values()),
        l1_distance(receiver.values(), prev_receiver.values()),
    ))
}

/// False at step 0; afterwards both deltas must be below [`TOLERANCE`].
pub fn converged(history: &History) -> bool {
    deltas(history).is_some_and(|(ds, dr)| ds < TOLERANCE && dr < TOLERANCE)
}
