//! Two-phase containers: per-phase scalars and per-phase compositions.

use crate::component::{Component, COMPONENT_COUNT};
use crate::components::Components;
use bf_core::numeric::Real;
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign};

/// Number of hydrocarbon phases.
pub const PHASE_COUNT: usize = 2;

/// Physical hydrocarbon phase identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Vapour,
    Liquid,
}

impl Phase {
    pub const ALL: [Phase; PHASE_COUNT] = [Phase::Vapour, Phase::Liquid];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Phase::Vapour => 0,
            Phase::Liquid => 1,
        }
    }

    /// The other phase.
    #[inline]
    pub fn opposite(self) -> Phase {
        match self {
            Phase::Vapour => Phase::Liquid,
            Phase::Liquid => Phase::Vapour,
        }
    }
}

/// One scalar per phase (total mass, density, viscosity, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseValues([Real; PHASE_COUNT]);

impl PhaseValues {
    pub const ZERO: PhaseValues = PhaseValues([0.0; PHASE_COUNT]);

    pub fn new(vapour: Real, liquid: Real) -> Self {
        let mut out = Self::ZERO;
        out[Phase::Vapour] = vapour;
        out[Phase::Liquid] = liquid;
        out
    }

    pub fn zero(&mut self) {
        self.0 = [0.0; PHASE_COUNT];
    }

    pub fn sum(&self) -> Real {
        self.0.iter().sum()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Elementwise maximum against a scalar.
    pub fn max_scalar(&self, scalar: Real) -> PhaseValues {
        let mut out = *self;
        for v in out.0.iter_mut() {
            *v = v.max(scalar);
        }
        out
    }

    /// Elementwise maximum against another pair.
    pub fn max(&self, other: &PhaseValues) -> PhaseValues {
        let mut out = *self;
        for (v, o) in out.0.iter_mut().zip(other.0.iter()) {
            *v = v.max(*o);
        }
        out
    }
}

impl Index<Phase> for PhaseValues {
    type Output = Real;

    fn index(&self, phase: Phase) -> &Real {
        &self.0[phase.index()]
    }
}

impl IndexMut<Phase> for PhaseValues {
    fn index_mut(&mut self, phase: Phase) -> &mut Real {
        &mut self.0[phase.index()]
    }
}

impl AddAssign<&PhaseValues> for PhaseValues {
    fn add_assign(&mut self, rhs: &PhaseValues) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl MulAssign<Real> for PhaseValues {
    fn mul_assign(&mut self, rhs: Real) {
        for a in self.0.iter_mut() {
            *a *= rhs;
        }
    }
}

impl DivAssign<&PhaseValues> for PhaseValues {
    fn div_assign(&mut self, rhs: &PhaseValues) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a /= b;
        }
    }
}

/// Per-phase, per-component amounts: a 2×N matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseComponents([[Real; COMPONENT_COUNT]; PHASE_COUNT]);

impl PhaseComponents {
    pub const ZERO: PhaseComponents = PhaseComponents([[0.0; COMPONENT_COUNT]; PHASE_COUNT]);

    pub fn zero(&mut self) {
        self.0 = [[0.0; COMPONENT_COUNT]; PHASE_COUNT];
    }

    /// Overwrite one phase row from a component vector.
    pub fn set_phase(&mut self, phase: Phase, components: &Components) {
        self.0[phase.index()] = *components.as_array();
    }

    /// Extract one phase row as a component vector.
    pub fn phase(&self, phase: Phase) -> Components {
        Components::new(self.0[phase.index()])
    }

    /// Total amount in one phase.
    pub fn sum(&self, phase: Phase) -> Real {
        self.0[phase.index()].iter().sum()
    }

    /// Per-phase totals as a pair.
    pub fn sums(&self) -> PhaseValues {
        PhaseValues::new(self.sum(Phase::Vapour), self.sum(Phase::Liquid))
    }

    /// Per-phase totals weighted by a per-component scalar vector.
    pub fn sum_product(&self, scalars: &Components) -> PhaseValues {
        let mut out = PhaseValues::ZERO;
        for phase in Phase::ALL {
            let row = &self.0[phase.index()];
            out[phase] = row
                .iter()
                .zip(scalars.as_array().iter())
                .map(|(a, b)| a * b)
                .sum();
        }
        out
    }

    /// Vapour + liquid, slot by slot; the mass-conservation complement of
    /// a phase split.
    pub fn total(&self) -> Components {
        let mut out = Components::ZERO;
        for component in Component::ALL {
            out[component] =
                self[(Phase::Vapour, component)] + self[(Phase::Liquid, component)];
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }

    /// Smallest entry across both phases.
    pub fn min_value(&self) -> Real {
        self.0
            .iter()
            .flatten()
            .copied()
            .fold(Real::INFINITY, Real::min)
    }
}

impl Default for PhaseComponents {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Index<(Phase, Component)> for PhaseComponents {
    type Output = Real;

    fn index(&self, (phase, component): (Phase, Component)) -> &Real {
        &self.0[phase.index()][component.index()]
    }
}

impl IndexMut<(Phase, Component)> for PhaseComponents {
    fn index_mut(&mut self, (phase, component): (Phase, Component)) -> &mut Real {
        &mut self.0[phase.index()][component.index()]
    }
}

impl AddAssign<&PhaseComponents> for PhaseComponents {
    fn add_assign(&mut self, rhs: &PhaseComponents) {
        for (row, other) in self.0.iter_mut().zip(rhs.0.iter()) {
            for (a, b) in row.iter_mut().zip(other.iter()) {
                *a += b;
            }
        }
    }
}

impl MulAssign<&Components> for PhaseComponents {
    fn mul_assign(&mut self, rhs: &Components) {
        for row in self.0.iter_mut() {
            for (a, b) in row.iter_mut().zip(rhs.as_array().iter()) {
                *a *= b;
            }
        }
    }
}

impl MulAssign<Real> for PhaseComponents {
    fn mul_assign(&mut self, rhs: Real) {
        for row in self.0.iter_mut() {
            for a in row.iter_mut() {
                *a *= rhs;
            }
        }
    }
}

impl DivAssign<&Components> for PhaseComponents {
    fn div_assign(&mut self, rhs: &Components) {
        for row in self.0.iter_mut() {
            for (a, b) in row.iter_mut().zip(rhs.as_array().iter()) {
                *a /= b;
            }
        }
    }
}

impl DivAssign<&PhaseValues> for PhaseComponents {
    fn div_assign(&mut self, rhs: &PhaseValues) {
        for phase in Phase::ALL {
            let divisor = rhs[phase];
            for a in self.0[phase.index()].iter_mut() {
                *a /= divisor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split() -> PhaseComponents {
        let mut pc = PhaseComponents::ZERO;
        pc[(Phase::Vapour, Component::C1)] = 6.0;
        pc[(Phase::Vapour, Component::C2)] = 1.0;
        pc[(Phase::Liquid, Component::C15PlusSat)] = 2.0;
        pc[(Phase::Liquid, Component::C1)] = 1.0;
        pc
    }

    #[test]
    fn phase_rows_roundtrip() {
        let mut pc = PhaseComponents::ZERO;
        let mut row = Components::ZERO;
        row[Component::C3] = 5.0;
        pc.set_phase(Phase::Liquid, &row);
        assert_eq!(pc.phase(Phase::Liquid), row);
        assert_eq!(pc.phase(Phase::Vapour), Components::ZERO);
    }

    #[test]
    fn sums_per_phase() {
        let pc = split();
        assert_eq!(pc.sum(Phase::Vapour), 7.0);
        assert_eq!(pc.sum(Phase::Liquid), 3.0);
        let pair = pc.sums();
        assert_eq!(pair[Phase::Vapour], 7.0);
        assert_eq!(pair[Phase::Liquid], 3.0);
    }

    #[test]
    fn total_conserves_mass() {
        let pc = split();
        let total = pc.total();
        assert_eq!(total.sum(), pc.sum(Phase::Vapour) + pc.sum(Phase::Liquid));
        assert_eq!(total[Component::C1], 7.0);
    }

    #[test]
    fn sum_product_weights_each_slot() {
        let pc = split();
        let mut weights = Components::ZERO;
        weights.fill(2.0);
        let weighted = pc.sum_product(&weights);
        assert_eq!(weighted[Phase::Vapour], 14.0);
        assert_eq!(weighted[Phase::Liquid], 6.0);
    }

    #[test]
    fn scale_by_phase_values() {
        let mut pc = split();
        pc /= &PhaseValues::new(7.0, 3.0);
        assert!((pc.sum(Phase::Vapour) - 1.0).abs() < 1e-12);
        assert!((pc.sum(Phase::Liquid) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn phase_values_max() {
        let pair = PhaseValues::new(-1.0, 2.0);
        let floored = pair.max_scalar(0.0);
        assert_eq!(floored[Phase::Vapour], 0.0);
        assert_eq!(floored[Phase::Liquid], 2.0);

        let other = PhaseValues::new(1.5, 1.5);
        let merged = pair.max(&other);
        assert_eq!(merged[Phase::Vapour], 1.5);
        assert_eq!(merged[Phase::Liquid], 2.0);
    }

    #[test]
    fn opposite_phase() {
        assert_eq!(Phase::Vapour.opposite(), Phase::Liquid);
        assert_eq!(Phase::Liquid.opposite(), Phase::Vapour);
    }
}
