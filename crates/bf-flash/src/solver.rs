//! Boundary with the equation-of-state flash solver.
//!
//! The solver is a Newton-type iterative code that, given pressure,
//! temperature and composition, returns the phase split together with
//! per-phase compositions, densities and viscosities. It is consumed
//! here as an injected trait object; its internals (stability test,
//! successive substitution, fugacity models) are not this crate's
//! concern.

use crate::error::FlashResult;
use crate::state::{PhaseState, SavedSplit};
use bf_composition::Components;
use bf_core::numeric::Real;

/// One object staged for a solver batch.
///
/// All staging clamps have been applied: pressure is at or above the
/// scheduler's minimum, the composition copy is non-negative. The
/// previous state, split and K-values warm-start the solver's
/// iteration.
#[derive(Debug, Clone, Copy)]
pub struct StagedObject {
    /// Population index of this object.
    pub index: usize,
    /// Pressure [Pa].
    pub pressure: Real,
    /// Temperature [K].
    pub temperature: Real,
    /// Staged (clamped) per-component accumulation.
    pub composition: Components,
    /// Warm-start equilibrium ratios from the previous solve.
    pub k_values: Components,
    /// State the object was dispatched under.
    pub state: PhaseState,
    /// Cached split knowledge from the previous solve.
    pub saved: SavedSplit,
}

/// Per-phase solver output for one object.
#[derive(Debug, Clone, Copy)]
pub struct PhaseResult {
    /// Per-component amounts in this phase.
    pub composition: Components,
    /// Total amount in this phase.
    pub total: Real,
    /// Phase density [kg/m³].
    pub density: Real,
    /// Phase viscosity [Pa·s].
    pub viscosity: Real,
}

/// Which physical identity the solver assigned to its local phase A.
///
/// Solver output is phase-A/phase-B indexed with no fixed mapping to
/// oil and gas; this per-object flag is the only authority for the
/// reconciliation. Phase B is always the complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseLabel {
    /// Phase A is the liquid-like phase.
    LiquidLike,
    /// Phase A is the vapour-like phase.
    VapourLike,
}

/// Solver result for one staged object.
///
/// `state` is the solver's phase code; it compares against the
/// scheduler's success threshold to decide whether the split, K-values
/// and phase data are kept. Non-convergence is expressed here, never as
/// an `Err`.
#[derive(Debug, Clone, Copy)]
pub struct FlashOutcome {
    pub state: PhaseState,
    pub saved: SavedSplit,
    pub k_values: Components,
    pub label: PhaseLabel,
    /// Solver-local phase A; `None` when absent.
    pub phase_a: Option<PhaseResult>,
    /// Solver-local phase B; `None` when absent.
    pub phase_b: Option<PhaseResult>,
}

impl FlashOutcome {
    /// A wholly failed solve: object keeps nothing, both phases absent.
    pub fn non_converged(label: PhaseLabel) -> Self {
        Self {
            state: PhaseState::SinglePhaseNeedsCheck,
            saved: SavedSplit::None,
            k_values: Components::ZERO,
            label,
            phase_a: None,
            phase_b: None,
        }
    }
}

/// The equation-of-state flash boundary.
///
/// Implementations must return exactly one outcome per staged object,
/// in order. A failed per-object solve is a below-threshold `state` in
/// its outcome; `Err` is reserved for broken contracts.
pub trait FlashSolver: Send + Sync {
    fn flash_batch(&self, batch: &[StagedObject]) -> FlashResult<Vec<FlashOutcome>>;
}
