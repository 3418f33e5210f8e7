//! Pore-saturation derivation from flashed phase data.

use bf_composition::{Components, Phase, PhaseComponents, PhaseValues, Saturation, SaturationPhase};
use bf_core::numeric::Real;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Saturation derivation options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaturationOptions {
    /// Cap on the combined hydrocarbon saturation; phase saturations are
    /// rescaled proportionally when the cap is exceeded.
    pub max_hc_saturation: Real,
    /// Per-phase concentration below which a phase contributes no
    /// saturation (guards the division by the phase composition sum).
    pub concentration_floor: Real,
    /// Count the immobile fraction into the capped hydrocarbon total
    /// and the water complement.
    pub use_immobile_saturation: bool,
}

impl Default for SaturationOptions {
    fn default() -> Self {
        Self {
            max_hc_saturation: 0.95,
            concentration_floor: 1.0e-20,
            use_immobile_saturation: false,
        }
    }
}

/// Derive one cell's saturation vector from its flashed phase data.
///
/// Phase saturations follow mass over density: the per-phase molar mass
/// is the composition weighted by the default component masses, and
/// each phase occupies `total · fraction · molar_mass / (composition
/// sum · density)` of the pore space. Water is the complement.
pub fn compute_saturation(
    molar_masses: &Components,
    phase_composition: &PhaseComponents,
    density: &PhaseValues,
    immobile: Real,
    opts: &SaturationOptions,
) -> Saturation {
    let vapour_sum = phase_composition.sum(Phase::Vapour);
    let liquid_sum = phase_composition.sum(Phase::Liquid);
    let concentration_sum = vapour_sum + liquid_sum;

    let vapour_fraction = if concentration_sum != 0.0 {
        vapour_sum / concentration_sum
    } else {
        0.0
    };

    let molar_mass = phase_composition.sum_product(molar_masses);

    let mut vapour_saturation = 0.0;
    if vapour_sum > opts.concentration_floor {
        vapour_saturation = concentration_sum * vapour_fraction * molar_mass[Phase::Vapour]
            / vapour_sum
            / density[Phase::Vapour];
    }

    let mut liquid_saturation = 0.0;
    if liquid_sum > opts.concentration_floor {
        liquid_saturation = concentration_sum * (1.0 - vapour_fraction)
            * molar_mass[Phase::Liquid]
            / liquid_sum
            / density[Phase::Liquid];
    }

    let mut immobile_saturation = if immobile > opts.concentration_floor {
        immobile
    } else {
        0.0
    };

    let hc_saturation = if opts.use_immobile_saturation {
        liquid_saturation + vapour_saturation + immobile_saturation
    } else {
        liquid_saturation + vapour_saturation
    };

    if hc_saturation > opts.max_hc_saturation {
        let scale = opts.max_hc_saturation / hc_saturation;
        liquid_saturation *= scale;
        vapour_saturation *= scale;
        if opts.use_immobile_saturation {
            immobile_saturation *= scale;
        }
    }

    let mut saturation = Saturation::water_filled();
    if opts.use_immobile_saturation {
        saturation.set_with_immobile(liquid_saturation, vapour_saturation, immobile_saturation);
    } else {
        saturation.set(liquid_saturation, vapour_saturation);
        // water saturation stays unaffected by the immobile fraction
        saturation[SaturationPhase::Immobile] = immobile_saturation;
    }

    if !saturation.is_finite() {
        warn!(
            vapour_sum,
            liquid_sum, "non-finite saturation derived from phase data"
        );
    }

    saturation
}

/// Derive saturations for a run of cells.
pub fn update_saturations(
    molar_masses: &Components,
    phase_composition: &[PhaseComponents],
    densities: &[PhaseValues],
    immobile: &[Real],
    opts: &SaturationOptions,
    out: &mut [Saturation],
) {
    debug_assert_eq!(phase_composition.len(), out.len());
    debug_assert_eq!(densities.len(), out.len());
    debug_assert_eq!(immobile.len(), out.len());

    for (i, saturation) in out.iter_mut().enumerate() {
        *saturation = compute_saturation(
            molar_masses,
            &phase_composition[i],
            &densities[i],
            immobile[i],
            opts,
        );
    }
}
