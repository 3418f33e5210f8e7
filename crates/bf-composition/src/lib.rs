//! bf-composition: composition data model and mixing rules for basinflash.
//!
//! Provides:
//! - the closed, ordered component set ([`Component`])
//! - fixed-width composition vectors ([`Components`]) and two-phase
//!   containers ([`PhaseComponents`], [`PhaseValues`])
//! - pore saturation vectors ([`Saturation`])
//! - the component property boundary ([`PropertyTable`]) with a constant
//!   reference implementation
//! - mixing rules (gorm, critical temperature, molar masses) in
//!   [`mixing`]
//!
//! # Architecture
//!
//! Property lookups go through the injected [`PropertyTable`] trait, so
//! the flash scheduler and the mixing rules never reach for a global
//! table. Arithmetic degeneracies (all-gas gorm, empty mixtures) are
//! reported through sentinels and NaN rather than errors; see the
//! individual function docs.

pub mod component;
pub mod components;
pub mod error;
pub mod mixing;
pub mod phase;
pub mod properties;
pub mod saturation;

// Re-exports for ergonomics
pub use component::{Component, COMPONENT_COUNT};
pub use components::Components;
pub use error::{CompositionError, CompositionResult};
pub use mixing::GORM_SENTINEL;
pub use phase::{Phase, PhaseComponents, PhaseValues, PHASE_COUNT};
pub use properties::{LumpedPropertyTable, PropertyTable};
pub use saturation::{Saturation, SaturationPhase};
