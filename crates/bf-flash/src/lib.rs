//! bf-flash: batched flash scheduling for basinflash.
//!
//! Provides:
//! - the per-object phase state machine ([`PhaseState`], [`SavedSplit`])
//! - the object population with cursor-based slice extraction
//!   ([`Population`])
//! - the stability short-circuit classifier (solver-free trivial-object
//!   pass)
//! - the equation-of-state solver boundary ([`FlashSolver`])
//! - result merge with phase-identity reconciliation ([`merge`])
//! - the batch orchestrator ([`FlashScheduler`])
//!
//! # Architecture
//!
//! The expensive nonlinear flash lives behind the [`FlashSolver`] trait
//! and is injected into the scheduler, so the whole state machine tests
//! against a scripted mock. Everything here is single-threaded and
//! synchronous; callers parallelize by partitioning the population into
//! disjoint sub-populations, each with its own scheduler.
//!
//! Solver non-convergence is a per-object data outcome (the object
//! stays in a needs-check state), never an error; see the module docs
//! in [`population`].

pub mod config;
pub mod error;
pub mod merge;
pub mod population;
pub mod scheduler;
pub mod solver;
pub mod state;

// Re-exports for ergonomics
pub use config::{FlashConfig, FlashStats};
pub use error::{FlashError, FlashResult};
pub use merge::{PhaseOutputs, DEFAULT_DENSITY, DEFAULT_VISCOSITY};
pub use population::Population;
pub use scheduler::{FieldView, FlashScheduler};
pub use solver::{FlashOutcome, FlashSolver, PhaseLabel, PhaseResult, StagedObject};
pub use state::{PhaseState, SavedSplit};
