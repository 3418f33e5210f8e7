//! Pore-space saturation vector.

use bf_core::numeric::Real;
use std::ops::{Index, IndexMut};

/// Saturation slots tracked per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaturationPhase {
    Water,
    Liquid,
    Vapour,
    Immobile,
}

impl SaturationPhase {
    pub const COUNT: usize = 4;

    #[inline]
    fn index(self) -> usize {
        match self {
            SaturationPhase::Water => 0,
            SaturationPhase::Liquid => 1,
            SaturationPhase::Vapour => 2,
            SaturationPhase::Immobile => 3,
        }
    }
}

/// Pore saturations {water, liquid HC, vapour HC, immobile HC}.
///
/// When derived from a phase split the water slot is the complement of
/// the hydrocarbon slots, so all four sum to one. Slots are also directly
/// settable from raw phase saturations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation([Real; SaturationPhase::COUNT]);

impl Saturation {
    /// Water-filled pore space, no hydrocarbons.
    pub fn water_filled() -> Self {
        let mut out = Self([0.0; SaturationPhase::COUNT]);
        out[SaturationPhase::Water] = 1.0;
        out
    }

    /// Set hydrocarbon phase saturations; water becomes the complement.
    ///
    /// The immobile slot is left untouched so it can be assigned
    /// independently without shifting the water balance.
    pub fn set(&mut self, liquid: Real, vapour: Real) {
        self[SaturationPhase::Liquid] = liquid;
        self[SaturationPhase::Vapour] = vapour;
        self[SaturationPhase::Water] = 1.0 - liquid - vapour;
    }

    /// Set all hydrocarbon slots including the immobile fraction; water
    /// is the complement of all three.
    pub fn set_with_immobile(&mut self, liquid: Real, vapour: Real, immobile: Real) {
        self[SaturationPhase::Liquid] = liquid;
        self[SaturationPhase::Vapour] = vapour;
        self[SaturationPhase::Immobile] = immobile;
        self[SaturationPhase::Water] = 1.0 - liquid - vapour - immobile;
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn sum(&self) -> Real {
        self.0.iter().sum()
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self::water_filled()
    }
}

impl Index<SaturationPhase> for Saturation {
    type Output = Real;

    fn index(&self, slot: SaturationPhase) -> &Real {
        &self.0[slot.index()]
    }
}

impl IndexMut<SaturationPhase> for Saturation {
    fn index_mut(&mut self, slot: SaturationPhase) -> &mut Real {
        &mut self.0[slot.index()]
    }
}
