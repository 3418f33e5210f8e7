//! bf-core: stable foundation for basinflash.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors for boundary values)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
