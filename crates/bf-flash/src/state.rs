//! Per-object phase resolution state.

use bf_core::numeric::Real;
use serde::{Deserialize, Serialize};

/// Resolution state of one object, least to most resolved.
///
/// The discriminant ordering is load-bearing: solver phase codes are the
/// same enumeration, and a returned code counts as a success when it
/// compares `>=` the configured threshold (partially converged results
/// are better kept than discarded).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PhaseState {
    /// Nothing to flash; terminal for the timestep.
    NoHydrocarbon = 0,
    /// Believed single-phase, must be (re-)verified.
    SinglePhaseNeedsCheck = 1,
    /// Verified single-phase this step; skipped by the scheduler.
    SinglePhaseConfirmed = 2,
    /// Two-phase, flash not yet converged.
    TwoPhaseNeedsCheck = 3,
    /// Converged two-phase flash.
    TwoPhaseConfirmed = 4,
    /// Single-phase with a remembered bubble/dew pressure to re-test.
    BubbleNeedsCheck = 5,
    /// Converged bubble/dew point.
    BubbleConfirmed = 6,
}

impl PhaseState {
    pub fn is_confirmed(self) -> bool {
        matches!(
            self,
            PhaseState::SinglePhaseConfirmed
                | PhaseState::TwoPhaseConfirmed
                | PhaseState::BubbleConfirmed
        )
    }

    pub fn needs_check(self) -> bool {
        matches!(
            self,
            PhaseState::SinglePhaseNeedsCheck
                | PhaseState::TwoPhaseNeedsCheck
                | PhaseState::BubbleNeedsCheck
        )
    }

    /// The needs-check counterpart of a confirmed state; needs-check and
    /// terminal states map to themselves.
    pub fn demoted(self) -> PhaseState {
        match self {
            PhaseState::SinglePhaseConfirmed => PhaseState::SinglePhaseNeedsCheck,
            PhaseState::TwoPhaseConfirmed => PhaseState::TwoPhaseNeedsCheck,
            PhaseState::BubbleConfirmed => PhaseState::BubbleNeedsCheck,
            other => other,
        }
    }
}

/// Cached split knowledge carried between solves.
///
/// The solver either produced a phase-split fraction or, for a
/// single-phase object, a bubble/dew pressure to test future pressures
/// against. Keeping the two meanings in one tagged value replaces the
/// sign convention the storage would otherwise need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SavedSplit {
    /// No split knowledge cached.
    None,
    /// Vapour fraction of the last converged flash.
    Split(Real),
    /// Bubble/dew pressure of a single-phase object [Pa].
    BubblePressure(Real),
}

impl Default for SavedSplit {
    fn default() -> Self {
        SavedSplit::None
    }
}

impl SavedSplit {
    /// Split fraction if one is cached, zero otherwise; warm-start value
    /// for the solver.
    pub fn split_or_zero(self) -> Real {
        match self {
            SavedSplit::Split(split) => split,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_order_by_resolution() {
        assert!(PhaseState::NoHydrocarbon < PhaseState::SinglePhaseNeedsCheck);
        assert!(PhaseState::SinglePhaseNeedsCheck < PhaseState::SinglePhaseConfirmed);
        assert!(PhaseState::TwoPhaseNeedsCheck < PhaseState::TwoPhaseConfirmed);
        assert!(PhaseState::BubbleConfirmed > PhaseState::TwoPhaseConfirmed);
    }

    #[test]
    fn demotion_strips_the_confirmed_distinction() {
        assert_eq!(
            PhaseState::SinglePhaseConfirmed.demoted(),
            PhaseState::SinglePhaseNeedsCheck
        );
        assert_eq!(
            PhaseState::TwoPhaseConfirmed.demoted(),
            PhaseState::TwoPhaseNeedsCheck
        );
        assert_eq!(
            PhaseState::BubbleConfirmed.demoted(),
            PhaseState::BubbleNeedsCheck
        );
        assert_eq!(PhaseState::NoHydrocarbon.demoted(), PhaseState::NoHydrocarbon);
        assert_eq!(
            PhaseState::TwoPhaseNeedsCheck.demoted(),
            PhaseState::TwoPhaseNeedsCheck
        );
    }

    #[test]
    fn saved_split_warm_start() {
        assert_eq!(SavedSplit::Split(0.4).split_or_zero(), 0.4);
        assert_eq!(SavedSplit::BubblePressure(2.0e7).split_or_zero(), 0.0);
        assert_eq!(SavedSplit::None.split_or_zero(), 0.0);
    }
}
