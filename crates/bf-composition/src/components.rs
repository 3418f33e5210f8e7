//! Fixed-width per-component amount vectors.

use crate::component::{Component, COMPONENT_COUNT};
use crate::error::{CompositionError, CompositionResult};
use crate::phase::Phase;
use bf_core::numeric::Real;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// Per-component amounts (mass or moles), one slot per [`Component`].
///
/// The width is fixed at [`COMPONENT_COUNT`]; there is no resizing.
/// Arithmetic is plain elementwise arithmetic with no guards: dividing
/// by a vector with zero slots propagates `inf`/`NaN` to the caller,
/// who is expected to test with [`Components::is_finite`] before
/// trusting a derived value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components([Real; COMPONENT_COUNT]);

impl Components {
    /// All-zero vector.
    pub const ZERO: Components = Components([0.0; COMPONENT_COUNT]);

    pub fn new(values: [Real; COMPONENT_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a runtime slice; the length must be exactly
    /// [`COMPONENT_COUNT`].
    pub fn try_from_slice(values: &[Real]) -> CompositionResult<Self> {
        if values.len() != COMPONENT_COUNT {
            return Err(CompositionError::InvalidArg {
                what: "component slice has wrong length",
            });
        }
        let mut out = Components::ZERO;
        out.0.copy_from_slice(values);
        Ok(out)
    }

    pub fn zero(&mut self) {
        self.fill(0.0);
    }

    pub fn fill(&mut self, value: Real) {
        self.0 = [value; COMPONENT_COUNT];
    }

    /// Total amount over all components.
    pub fn sum(&self) -> Real {
        self.0.iter().sum()
    }

    /// Total amount over the base subrange associated with a phase:
    /// the light alkanes (C5..C1) for vapour, the heavy base fractions
    /// (asphaltenes..C6-14 saturates) for liquid.
    pub fn sum_phase(&self, phase: Phase) -> Real {
        let range = match phase {
            Phase::Vapour => Component::C5.index()..=Component::C1.index(),
            Phase::Liquid => Component::Asphaltene.index()..=Component::C6Minus14Sat.index(),
        };
        self.0[range].iter().sum()
    }

    pub fn dot(&self, other: &Components) -> Real {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn min_value(&self) -> Real {
        self.0.iter().copied().fold(Real::INFINITY, Real::min)
    }

    pub fn max_value(&self) -> Real {
        self.0.iter().copied().fold(Real::NEG_INFINITY, Real::max)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn is_non_negative(&self) -> bool {
        self.0.iter().all(|v| *v >= 0.0)
    }

    /// Copy with every negative slot clamped to zero.
    ///
    /// Upstream transport can leave small negative amounts behind; the
    /// clamp is applied to the staged copy only, never to the stored
    /// accumulation.
    pub fn clamped_non_negative(&self) -> Components {
        let mut out = *self;
        for v in out.0.iter_mut() {
            if *v < 0.0 {
                *v = 0.0;
            }
        }
        out
    }

    /// Elementwise maximum against a scalar.
    pub fn max_scalar(&self, scalar: Real) -> Components {
        let mut out = *self;
        for v in out.0.iter_mut() {
            *v = v.max(scalar);
        }
        out
    }

    /// Elementwise maximum against another vector.
    pub fn max(&self, other: &Components) -> Components {
        let mut out = *self;
        for (v, o) in out.0.iter_mut().zip(other.0.iter()) {
            *v = v.max(*o);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, Real)> + '_ {
        Component::ALL.iter().map(move |c| (*c, self.0[c.index()]))
    }

    pub(crate) fn as_array(&self) -> &[Real; COMPONENT_COUNT] {
        &self.0
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Index<Component> for Components {
    type Output = Real;

    fn index(&self, component: Component) -> &Real {
        &self.0[component.index()]
    }
}

impl IndexMut<Component> for Components {
    fn index_mut(&mut self, component: Component) -> &mut Real {
        &mut self.0[component.index()]
    }
}

impl AddAssign<&Components> for Components {
    fn add_assign(&mut self, rhs: &Components) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl SubAssign<&Components> for Components {
    fn sub_assign(&mut self, rhs: &Components) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= b;
        }
    }
}

impl MulAssign<&Components> for Components {
    fn mul_assign(&mut self, rhs: &Components) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a *= b;
        }
    }
}

impl DivAssign<&Components> for Components {
    fn div_assign(&mut self, rhs: &Components) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a /= b;
        }
    }
}

impl MulAssign<Real> for Components {
    fn mul_assign(&mut self, rhs: Real) {
        for a in self.0.iter_mut() {
            *a *= rhs;
        }
    }
}

impl AddAssign<Real> for Components {
    fn add_assign(&mut self, rhs: Real) {
        for a in self.0.iter_mut() {
            *a += rhs;
        }
    }
}

impl Add for Components {
    type Output = Components;

    fn add(mut self, rhs: Components) -> Components {
        self += &rhs;
        self
    }
}

impl Sub for Components {
    type Output = Components;

    fn sub(mut self, rhs: Components) -> Components {
        self -= &rhs;
        self
    }
}

impl Mul for Components {
    type Output = Components;

    fn mul(mut self, rhs: Components) -> Components {
        self *= &rhs;
        self
    }
}

impl Div for Components {
    type Output = Components;

    fn div(mut self, rhs: Components) -> Components {
        self /= &rhs;
        self
    }
}

impl Mul<Real> for Components {
    type Output = Components;

    fn mul(mut self, rhs: Real) -> Components {
        self *= rhs;
        self
    }
}

impl Mul<Components> for Real {
    type Output = Components;

    fn mul(self, mut rhs: Components) -> Components {
        rhs *= self;
        rhs
    }
}

impl Div<Real> for Components {
    type Output = Components;

    fn div(mut self, rhs: Real) -> Components {
        self *= 1.0 / rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Components {
        let mut c = Components::ZERO;
        c[Component::C1] = 4.0;
        c[Component::C2] = 2.0;
        c[Component::C6Minus14Sat] = 3.0;
        c[Component::Asphaltene] = 1.0;
        c
    }

    #[test]
    fn sum_totals_all_slots() {
        assert_eq!(sample().sum(), 10.0);
    }

    #[test]
    fn phase_subrange_sums() {
        let c = sample();
        assert_eq!(c.sum_phase(Phase::Vapour), 6.0);
        assert_eq!(c.sum_phase(Phase::Liquid), 4.0);
    }

    #[test]
    fn arithmetic_is_elementwise() {
        let c = sample();
        let doubled = c + c;
        assert_eq!(doubled[Component::C1], 8.0);
        assert_eq!((doubled - c), c);
        assert_eq!((c * 2.0)[Component::C2], 4.0);
        assert_eq!((2.0 * c)[Component::C2], 4.0);
        assert_eq!((c / 2.0)[Component::C1], 2.0);
    }

    #[test]
    fn division_by_zero_slot_propagates() {
        let c = sample();
        let quotient = c / Components::ZERO;
        assert!(!quotient.is_finite());
    }

    #[test]
    fn clamp_leaves_original_untouched() {
        let mut c = sample();
        c[Component::C3] = -1.0e-12;
        let clamped = c.clamped_non_negative();
        assert_eq!(clamped[Component::C3], 0.0);
        assert_eq!(c[Component::C3], -1.0e-12);
        assert!(clamped.is_non_negative());
        assert!(!c.is_non_negative());
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert!(Components::try_from_slice(&[0.0; COMPONENT_COUNT]).is_ok());
        assert!(Components::try_from_slice(&[0.0; 5]).is_err());
    }

    #[test]
    fn reductions() {
        let c = sample();
        assert_eq!(c.min_value(), 0.0);
        assert_eq!(c.max_value(), 4.0);
        assert_eq!(c.dot(&c), 16.0 + 4.0 + 9.0 + 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_components() -> impl Strategy<Value = Components> {
        prop::collection::vec(-1.0e6_f64..1.0e6_f64, COMPONENT_COUNT)
            .prop_map(|v| Components::try_from_slice(&v).unwrap())
    }

    proptest! {
        #[test]
        fn add_then_sub_roundtrips(a in arb_components(), b in arb_components()) {
            let back = (a + b) - b;
            for (component, value) in back.iter() {
                prop_assert!((value - a[component]).abs() <= 1.0e-6);
            }
        }

        #[test]
        fn clamped_is_always_non_negative(a in arb_components()) {
            prop_assert!(a.clamped_non_negative().is_non_negative());
        }

        #[test]
        fn sum_splits_over_subranges(a in arb_components()) {
            // Phase subranges plus the remaining slots must cover the total.
            let rest: Real = a
                .iter()
                .filter(|(c, _)| {
                    let i = c.index();
                    !(i <= Component::C6Minus14Sat.index()
                        || (i >= Component::C5.index() && i <= Component::C1.index()))
                })
                .map(|(_, v)| v)
                .sum();
            let recomposed = a.sum_phase(Phase::Vapour) + a.sum_phase(Phase::Liquid) + rest;
            prop_assert!((recomposed - a.sum()).abs() <= 1.0e-6 * a.sum().abs().max(1.0));
        }
    }
}
