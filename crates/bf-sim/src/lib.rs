//! bf-sim: timestep drivers for basinflash.
//!
//! Ties the flash scheduler to per-cell field storage:
//! - [`Domain`]: flattened per-cell fields, the grid boundary stand-in
//! - [`Simulator`]: serial classify/slice/solve/merge stepping, plus
//!   saturation derivation
//! - [`PartitionedSimulator`]: the same pass over disjoint contiguous
//!   sub-populations on rayon workers, each with its own scheduler and
//!   cache (the flash subsystem itself never threads)
//! - [`saturation`]: pore-saturation derivation from flashed phases

pub mod domain;
pub mod error;
pub mod saturation;
pub mod sim;

// Re-exports for ergonomics
pub use domain::{Domain, DomainChunk};
pub use error::{SimError, SimResult};
pub use saturation::{compute_saturation, update_saturations, SaturationOptions};
pub use sim::{PartitionedSimulator, SimOptions, Simulator};
