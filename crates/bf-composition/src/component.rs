//! Hydrocarbon component definitions.

use serde::{Deserialize, Serialize};

/// Number of tracked components; every composition container is exactly
/// this wide.
pub const COMPONENT_COUNT: usize = 23;

/// Chemical components of the basin model, heaviest fractions first.
///
/// The ordering is load-bearing: mixing-rule summations run over fixed
/// index subranges of this enumeration (heavy oil-like fractions at the
/// front, light gas-like species in the middle, sulphur-bearing species
/// at the tail) and the storage layout of [`crate::Components`] follows
/// it slot for slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    /// Asphaltenes
    Asphaltene,
    /// Resins
    Resin,
    /// C15+ aromatics
    C15PlusAro,
    /// C15+ saturates
    C15PlusSat,
    /// C6-14 aromatics
    C6Minus14Aro,
    /// C6-14 saturates
    C6Minus14Sat,
    /// Pentane
    C5,
    /// Butane
    C4,
    /// Propane
    C3,
    /// Ethane
    C2,
    /// Methane
    C1,
    /// Carbon oxides (CO₂)
    Cox,
    /// Nitrogen (N₂)
    N2,
    /// Hydrogen sulphide (H₂S)
    H2S,
    /// Late sulphur-rich condensate
    LsC,
    /// C15+ aromatic thiophenes
    C15PlusAT,
    /// C6-14 benzothiophenes
    C6Minus14BT,
    /// C6-14 dibenzothiophenes
    C6Minus14DBT,
    /// C6-14 biphenyls
    C6Minus14BP,
    /// C15+ aromatics, sulphur-rich
    C15PlusAroS,
    /// C15+ saturates, sulphur-rich
    C15PlusSatS,
    /// C6-14 saturates, sulphur-rich
    C6Minus14SatS,
    /// C6-14 aromatics, sulphur-rich
    C6Minus14AroS,
}

impl Component {
    pub const ALL: [Component; COMPONENT_COUNT] = [
        Component::Asphaltene,
        Component::Resin,
        Component::C15PlusAro,
        Component::C15PlusSat,
        Component::C6Minus14Aro,
        Component::C6Minus14Sat,
        Component::C5,
        Component::C4,
        Component::C3,
        Component::C2,
        Component::C1,
        Component::Cox,
        Component::N2,
        Component::H2S,
        Component::LsC,
        Component::C15PlusAT,
        Component::C6Minus14BT,
        Component::C6Minus14DBT,
        Component::C6Minus14BP,
        Component::C15PlusAroS,
        Component::C15PlusSatS,
        Component::C6Minus14SatS,
        Component::C6Minus14AroS,
    ];

    /// Position in the canonical ordering, usable as an array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Component::index`].
    pub fn from_index(index: usize) -> Option<Component> {
        Component::ALL.get(index).copied()
    }

    pub fn key(&self) -> &'static str {
        match self {
            Component::Asphaltene => "ASPHALTENE",
            Component::Resin => "RESIN",
            Component::C15PlusAro => "C15+_ARO",
            Component::C15PlusSat => "C15+_SAT",
            Component::C6Minus14Aro => "C6-14_ARO",
            Component::C6Minus14Sat => "C6-14_SAT",
            Component::C5 => "C5",
            Component::C4 => "C4",
            Component::C3 => "C3",
            Component::C2 => "C2",
            Component::C1 => "C1",
            Component::Cox => "COX",
            Component::N2 => "N2",
            Component::H2S => "H2S",
            Component::LsC => "LSC",
            Component::C15PlusAT => "C15+_AT",
            Component::C6Minus14BT => "C6-14_BT",
            Component::C6Minus14DBT => "C6-14_DBT",
            Component::C6Minus14BP => "C6-14_BP",
            Component::C15PlusAroS => "C15+_ARO_S",
            Component::C15PlusSatS => "C15+_SAT_S",
            Component::C6Minus14SatS => "C6-14_SAT_S",
            Component::C6Minus14AroS => "C6-14_ARO_S",
        }
    }

    /// Whether this component counts toward the gas side of the
    /// gas/oil-mass ratio (light alkanes plus H₂S).
    ///
    /// Carbon oxides and nitrogen belong to neither side of the ratio.
    #[inline]
    pub fn is_gas_like(self) -> bool {
        matches!(
            self,
            Component::C5
                | Component::C4
                | Component::C3
                | Component::C2
                | Component::C1
                | Component::H2S
        )
    }

    /// Whether this component counts toward the oil side of the
    /// gas/oil-mass ratio (heavy fractions, including the sulphur-rich
    /// tail species).
    #[inline]
    pub fn is_oil_like(self) -> bool {
        matches!(
            self,
            Component::Asphaltene
                | Component::Resin
                | Component::C15PlusAro
                | Component::C15PlusSat
                | Component::C6Minus14Aro
                | Component::C6Minus14Sat
                | Component::LsC
                | Component::C15PlusAT
                | Component::C6Minus14BT
                | Component::C6Minus14DBT
                | Component::C6Minus14BP
                | Component::C15PlusAroS
                | Component::C15PlusSatS
                | Component::C6Minus14SatS
                | Component::C6Minus14AroS
        )
    }

    /// Whether this species partitions preferentially into the vapour
    /// phase when present on its own (light alkanes and inorganic gases).
    #[inline]
    pub fn is_volatile(self) -> bool {
        matches!(
            self,
            Component::C5
                | Component::C4
                | Component::C3
                | Component::C2
                | Component::C1
                | Component::Cox
                | Component::N2
                | Component::H2S
        )
    }

    /// Base component carrying the reference properties for this species.
    ///
    /// The sulphur-bearing tail species are lumped onto a base fraction
    /// for property lookups: the C15+ group maps onto [`Component::C15PlusSat`]
    /// and the C6-14 group onto [`Component::C6Minus14Aro`]. Base
    /// components map to themselves.
    pub fn lumped_base(self) -> Component {
        match self {
            Component::LsC
            | Component::C15PlusAT
            | Component::C15PlusAroS
            | Component::C15PlusSatS => Component::C15PlusSat,
            Component::C6Minus14BT
            | Component::C6Minus14DBT
            | Component::C6Minus14BP
            | Component::C6Minus14SatS
            | Component::C6Minus14AroS => Component::C6Minus14Aro,
            other => other,
        }
    }
}
