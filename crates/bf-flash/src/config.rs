//! Scheduler configuration and per-pass statistics.

use crate::state::PhaseState;
use bf_core::numeric::Real;
use serde::{Deserialize, Serialize};

/// Flash scheduler configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlashConfig {
    /// Maximum objects per solver batch.
    pub max_slice_len: usize,
    /// Lowest phase code accepted as a storable result. Partially
    /// converged codes above this are kept rather than ditched.
    pub success_threshold: PhaseState,
    /// On a below-threshold result, drop the object back to
    /// `SinglePhaseNeedsCheck` (retried later) instead of leaving its
    /// previous state.
    pub reset_on_failure: bool,
    /// Pressure floor applied when staging [Pa].
    pub min_pressure: Real,
    /// Large-number scale; `-1/enorm` seeds the classification sums.
    pub enorm: Real,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            max_slice_len: 32,
            success_threshold: PhaseState::SinglePhaseConfirmed,
            reset_on_failure: true,
            min_pressure: 1.0,
            enorm: 1.0e80,
        }
    }
}

/// Accounting for one scheduler pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashStats {
    /// Population size.
    pub objects: usize,
    /// Objects resolved without a solver call (no hydrocarbon, or a
    /// single component only).
    pub trivial: usize,
    /// Objects staged into solver batches.
    pub dispatched: usize,
    /// Solver batch invocations.
    pub solver_calls: usize,
    /// Outcomes stored at or above the success threshold.
    pub accepted: usize,
    /// Outcomes below the success threshold.
    pub failed: usize,
    /// Objects re-dispatched one at a time after a bucket flip.
    pub redispatched: usize,
}

impl FlashStats {
    /// Fold a sub-population's stats into this one.
    pub fn absorb(&mut self, other: &FlashStats) {
        self.objects += other.objects;
        self.trivial += other.trivial;
        self.dispatched += other.dispatched;
        self.solver_calls += other.solver_calls;
        self.accepted += other.accepted;
        self.failed += other.failed;
        self.redispatched += other.redispatched;
    }
}
