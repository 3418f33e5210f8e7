//! Mixing rules: gas/oil-mass ratio and critical-property mixtures.
//!
//! These derive the scalar parameters the flash solver needs from a
//! composition without doing any phase-equilibrium work themselves.

use crate::component::Component;
use crate::components::Components;
use crate::phase::{Phase, PhaseComponents, PhaseValues};
use crate::properties::PropertyTable;
use bf_core::numeric::Real;

/// Returned by the gorm calculations when the oil-like mass is exactly
/// zero: all gas, no oil reference available. Downstream code tests for
/// this value, so it must be preserved bit for bit.
pub const GORM_SENTINEL: Real = 1.0e80;

/// Gas/oil-mass ratio of a single composition.
///
/// The oil side sums the heavy fractions including the sulphur-bearing
/// tail species; the gas side sums the light alkanes plus H₂S. Carbon
/// oxides and nitrogen count toward neither.
pub fn gorm(weights: &Components) -> Real {
    let mut denom = 0.0;
    let mut num = 0.0;
    for (component, value) in weights.iter() {
        if component.is_oil_like() {
            denom += value;
        } else if component.is_gas_like() {
            num += value;
        }
    }

    if denom == 0.0 {
        return GORM_SENTINEL;
    }
    num / denom
}

/// Gas/oil-mass ratio from an already-split pair of compositions.
///
/// Both phases contribute to both sides of the ratio, except H₂S which
/// is only counted from the vapour side. Same sentinel policy as
/// [`gorm`].
pub fn gorm_of_phases(vapour: &Components, liquid: &Components) -> Real {
    let mut oil_mass = 0.0;
    for component in Component::ALL {
        if component.is_oil_like() {
            oil_mass += vapour[component] + liquid[component];
        }
    }

    if oil_mass == 0.0 {
        return GORM_SENTINEL;
    }

    let mut gas_mass = 0.0;
    for component in [
        Component::C5,
        Component::C4,
        Component::C3,
        Component::C2,
        Component::C1,
    ] {
        gas_mass += vapour[component] + liquid[component];
    }
    gas_mass += vapour[Component::H2S];

    gas_mass / oil_mass
}

/// [`gorm_of_phases`] applied to a two-phase container.
pub fn gorm_of(phases: &PhaseComponents) -> Real {
    gorm_of_phases(&phases.phase(Phase::Vapour), &phases.phase(Phase::Liquid))
}

/// Critical temperature of a mixture [K], critical-volume weighted.
///
/// Components with zero presence are skipped rather than zero-weighted,
/// so no property lookups happen for them. The division by the weight
/// norm is unguarded: a composition with no detectable components
/// yields NaN, which is accepted behavior the caller must screen for.
pub fn critical_temperature(
    table: &dyn PropertyTable,
    composition: &Components,
    prescribed_gorm: Option<Real>,
) -> Real {
    let g = prescribed_gorm.unwrap_or_else(|| gorm(composition));

    let mut weighted = 0.0;
    let mut norm = 0.0;
    for (component, amount) in composition.iter() {
        if amount == 0.0 {
            continue;
        }

        let lambda = amount * table.critical_volume(component, g) / table.molar_mass(component, g);
        weighted += lambda * table.critical_temperature(component, g);
        norm += lambda;
    }

    weighted / norm
}

/// Per-phase critical temperatures of a split mixture [K].
///
/// Components absent from both phases are skipped entirely; a phase
/// with no components at all yields NaN in its slot (see
/// [`critical_temperature`]).
pub fn critical_temperature_of(
    table: &dyn PropertyTable,
    phases: &PhaseComponents,
    prescribed_gorm: Option<Real>,
) -> PhaseValues {
    let g = prescribed_gorm.unwrap_or_else(|| gorm_of(phases));

    let mut weighted = PhaseValues::ZERO;
    let mut norm = PhaseValues::ZERO;
    for component in Component::ALL {
        let vapour = phases[(Phase::Vapour, component)];
        let liquid = phases[(Phase::Liquid, component)];
        if vapour == 0.0 && liquid == 0.0 {
            continue;
        }

        let volume_per_mass =
            table.critical_volume(component, g) / table.molar_mass(component, g);
        let critical_t = table.critical_temperature(component, g);

        let lambda = vapour * volume_per_mass;
        weighted[Phase::Vapour] += lambda * critical_t;
        norm[Phase::Vapour] += lambda;

        let lambda = liquid * volume_per_mass;
        weighted[Phase::Liquid] += lambda * critical_t;
        norm[Phase::Liquid] += lambda;
    }

    weighted /= &norm;
    weighted
}

/// Per-component lumped molar masses at the gorm of the given mixture.
///
/// Molar mass depends on the gorm because heavy fractions lump
/// differently in gas-rich mixtures.
pub fn molar_masses(table: &dyn PropertyTable, weights: &Components) -> Components {
    let g = gorm(weights);
    let mut out = Components::ZERO;
    for component in Component::ALL {
        out[component] = table.molar_mass(component, g);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::component::COMPONENT_COUNT;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn gorm_is_finite_or_sentinel(values in prop::collection::vec(0.0_f64..1.0e6_f64, COMPONENT_COUNT)) {
            let weights = Components::try_from_slice(&values).unwrap();
            let g = gorm(&weights);
            prop_assert!(g.is_finite());
            prop_assert!(g >= 0.0);
        }

        #[test]
        fn gorm_scale_invariant(values in prop::collection::vec(0.0_f64..1.0e3_f64, COMPONENT_COUNT), scale in 0.5_f64..100.0_f64) {
            let weights = Components::try_from_slice(&values).unwrap();
            let scaled = weights * scale;
            let a = gorm(&weights);
            let b = gorm(&scaled);
            if a == GORM_SENTINEL {
                prop_assert_eq!(b, GORM_SENTINEL);
            } else {
                prop_assert!((a - b).abs() <= 1.0e-9 * a.abs().max(1.0));
            }
        }
    }
}
