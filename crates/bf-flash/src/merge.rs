//! Result merge and phase-identity reconciliation.
//!
//! The solver's output is phase-A/phase-B indexed; only its per-object
//! [`PhaseLabel`](crate::solver::PhaseLabel) says which of the two is
//! liquid-like. This module maps solver-local phases onto the physical
//! Liquid/Vapour storage slots and guarantees that absent phases leave
//! defined sentinel values behind, never stale data from a previous
//! timestep.

use crate::solver::{FlashOutcome, PhaseLabel, PhaseResult};
use bf_composition::{Phase, PhaseComponents, PhaseValues};
use bf_core::numeric::Real;

/// Density written for an absent phase [kg/m³].
pub const DEFAULT_DENSITY: Real = 1000.0;

/// Viscosity written for an absent phase [Pa·s].
pub const DEFAULT_VISCOSITY: Real = 0.001;

/// Mutable per-object output storage, indexed consistently with the
/// scheduler's population ordering.
#[derive(Debug)]
pub struct PhaseOutputs<'a> {
    /// Per-phase, per-component amounts.
    pub composition: &'a mut [PhaseComponents],
    /// Per-phase totals.
    pub totals: &'a mut [PhaseValues],
    /// Per-phase densities [kg/m³].
    pub densities: &'a mut [PhaseValues],
    /// Per-phase viscosities [Pa·s].
    pub viscosities: &'a mut [PhaseValues],
}

impl PhaseOutputs<'_> {
    pub fn len(&self) -> usize {
        self.composition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }
}

/// Write one batch of solver outcomes into physical-phase storage.
pub fn write_outcomes(indices: &[usize], outcomes: &[FlashOutcome], out: &mut PhaseOutputs) {
    debug_assert_eq!(indices.len(), outcomes.len());

    for (&index, outcome) in indices.iter().zip(outcomes.iter()) {
        let (phase_a, phase_b) = match outcome.label {
            PhaseLabel::LiquidLike => (Phase::Liquid, Phase::Vapour),
            PhaseLabel::VapourLike => (Phase::Vapour, Phase::Liquid),
        };
        write_phase(out, index, phase_a, outcome.phase_a.as_ref());
        write_phase(out, index, phase_b, outcome.phase_b.as_ref());
    }
}

/// Write one physical phase slot for one object; `None` writes the
/// absent-phase sentinels.
pub fn write_phase(
    out: &mut PhaseOutputs,
    index: usize,
    phase: Phase,
    result: Option<&PhaseResult>,
) {
    match result {
        Some(result) => {
            out.composition[index].set_phase(phase, &result.composition);
            out.totals[index][phase] = result.total;
            out.densities[index][phase] = result.density;
            out.viscosities[index][phase] = result.viscosity;
        }
        None => {
            out.composition[index].set_phase(phase, &bf_composition::Components::ZERO);
            out.totals[index][phase] = 0.0;
            out.densities[index][phase] = DEFAULT_DENSITY;
            out.viscosities[index][phase] = DEFAULT_VISCOSITY;
        }
    }
}

/// Sentinel-fill both phases of one object (nothing present).
pub fn write_absent(out: &mut PhaseOutputs, index: usize) {
    write_phase(out, index, Phase::Vapour, None);
    write_phase(out, index, Phase::Liquid, None);
}
