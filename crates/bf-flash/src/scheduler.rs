//! Batch orchestration: classify, slice, stage, solve, merge, apply.

use crate::config::{FlashConfig, FlashStats};
use crate::error::{FlashError, FlashResult};
use crate::merge::{self, PhaseOutputs};
use crate::population::Population;
use crate::solver::{FlashSolver, StagedObject};
use crate::state::PhaseState;
use bf_composition::{Components, Phase};
use bf_core::numeric::Real;
use tracing::{debug, trace};

/// Read-only grid fields for one population, indexed consistently with
/// the scheduler's object ordering.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    /// Pressure per object [Pa].
    pub pressure: &'a [Real],
    /// Temperature per object [K].
    pub temperature: &'a [Real],
    /// Per-component accumulation per object; read-only here, clamps
    /// are applied to staged copies only.
    pub accumulation: &'a [Components],
}

/// The flash scheduler: owns one population's state machine and drives
/// homogeneous solver batches through an injected [`FlashSolver`].
///
/// Strictly sequential per slice (extract → solve → merge → apply);
/// nothing here suspends, and the per-object arrays are exclusively
/// owned for the duration of a timestep.
#[derive(Debug)]
pub struct FlashScheduler {
    config: FlashConfig,
    population: Population,
}

impl FlashScheduler {
    pub fn new(config: FlashConfig, population_len: usize) -> Self {
        Self {
            config,
            population: Population::new(population_len),
        }
    }

    pub fn config(&self) -> &FlashConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Stability short-circuit pass; must run before any slice is built.
    pub fn classify(&mut self, accumulation: &[Components]) {
        self.population.classify(accumulation, self.config.enorm);
    }

    /// Revalidate previously confirmed objects against updated fields at
    /// the start of a new outer coupling iteration; caches survive as
    /// warm starts.
    pub fn begin_outer_iteration(&mut self) {
        self.population.demote_confirmed_to_needs_check();
    }

    /// Bulk reset on simulation restart.
    pub fn reset(&mut self) {
        self.population.reset();
    }

    /// Run the flash pass for one timestep (or one outer iteration).
    ///
    /// Trivially classified objects are written out without a solver
    /// call; each needs-check bucket is then drained in bounded slices.
    /// Bubble checks that reveal a crossed phase boundary come back as
    /// `TwoPhaseNeedsCheck` behind the cursor and are re-dispatched one
    /// object at a time.
    pub fn run_pass(
        &mut self,
        solver: &dyn FlashSolver,
        fields: &FieldView<'_>,
        out: &mut PhaseOutputs<'_>,
    ) -> FlashResult<FlashStats> {
        let len = self.population.len();
        if fields.pressure.len() != len
            || fields.temperature.len() != len
            || fields.accumulation.len() != len
            || out.len() != len
        {
            return Err(FlashError::InvalidArg {
                what: "field and output storage must match the population size",
            });
        }

        let mut stats = FlashStats {
            objects: len,
            ..FlashStats::default()
        };

        self.write_trivial(fields, out, &mut stats);

        for target in [
            PhaseState::SinglePhaseNeedsCheck,
            PhaseState::TwoPhaseNeedsCheck,
            PhaseState::BubbleNeedsCheck,
        ] {
            self.population.reset_cursor();
            loop {
                let count = self
                    .population
                    .take_slice(target, self.config.max_slice_len);
                if count == 0 {
                    break;
                }
                debug!(?target, count, "dispatching flash slice");
                self.dispatch(solver, fields, out, &mut stats)?;
            }
        }

        // A bubble check may have revealed a crossed boundary for an
        // object the two-phase bucket has already passed; pick those up
        // one at a time.
        self.population.reset_cursor();
        while let Some(index) = self.population.advance_one(PhaseState::TwoPhaseNeedsCheck) {
            trace!(index, "single-object re-dispatch");
            self.dispatch_single(solver, fields, out, index, &mut stats)?;
            stats.redispatched += 1;
        }

        debug!(
            objects = stats.objects,
            trivial = stats.trivial,
            dispatched = stats.dispatched,
            accepted = stats.accepted,
            failed = stats.failed,
            "flash pass complete"
        );
        Ok(stats)
    }

    /// Write outputs for objects the classifier resolved without a
    /// solve: no-hydrocarbon objects get the absent-phase sentinels;
    /// single-component objects carry their whole (clamped) mass in the
    /// phase their component favours, with default phase properties.
    fn write_trivial(
        &self,
        fields: &FieldView<'_>,
        out: &mut PhaseOutputs<'_>,
        stats: &mut FlashStats,
    ) {
        for index in 0..self.population.len() {
            match self.population.state(index) {
                PhaseState::NoHydrocarbon => {
                    merge::write_absent(out, index);
                    stats.trivial += 1;
                }
                PhaseState::SinglePhaseConfirmed => {
                    let staged = fields.accumulation[index].clamped_non_negative();
                    let phase = dominant_phase(&staged);
                    let result = crate::solver::PhaseResult {
                        composition: staged,
                        total: staged.sum(),
                        density: merge::DEFAULT_DENSITY,
                        viscosity: merge::DEFAULT_VISCOSITY,
                    };
                    merge::write_phase(out, index, phase, Some(&result));
                    merge::write_phase(out, index, phase.opposite(), None);
                    stats.trivial += 1;
                }
                _ => {}
            }
        }
    }

    fn dispatch(
        &mut self,
        solver: &dyn FlashSolver,
        fields: &FieldView<'_>,
        out: &mut PhaseOutputs<'_>,
        stats: &mut FlashStats,
    ) -> FlashResult<()> {
        let batch: Vec<StagedObject> = self
            .population
            .slice()
            .iter()
            .map(|&index| stage(fields, &self.population, index, self.config.min_pressure))
            .collect();
        self.solve_and_apply(solver, out, batch, stats)
    }

    fn dispatch_single(
        &mut self,
        solver: &dyn FlashSolver,
        fields: &FieldView<'_>,
        out: &mut PhaseOutputs<'_>,
        index: usize,
        stats: &mut FlashStats,
    ) -> FlashResult<()> {
        let batch = vec![stage(
            fields,
            &self.population,
            index,
            self.config.min_pressure,
        )];
        self.solve_and_apply(solver, out, batch, stats)
    }

    fn solve_and_apply(
        &mut self,
        solver: &dyn FlashSolver,
        out: &mut PhaseOutputs<'_>,
        batch: Vec<StagedObject>,
        stats: &mut FlashStats,
    ) -> FlashResult<()> {
        let outcomes = solver.flash_batch(&batch)?;
        if outcomes.len() != batch.len() {
            return Err(FlashError::SolverContract {
                what: "solver returned a different number of outcomes than staged objects",
            });
        }
        stats.solver_calls += 1;
        stats.dispatched += batch.len();

        let indices: Vec<usize> = batch.iter().map(|staged| staged.index).collect();
        merge::write_outcomes(&indices, &outcomes, out);

        for outcome in &outcomes {
            if outcome.state >= self.config.success_threshold {
                stats.accepted += 1;
            } else {
                stats.failed += 1;
            }
        }

        self.population.apply_results(
            &indices,
            self.config.success_threshold,
            self.config.reset_on_failure,
            &outcomes,
        );
        Ok(())
    }
}

/// Build one staged solver input from grid fields and cached state.
fn stage(
    fields: &FieldView<'_>,
    population: &Population,
    index: usize,
    min_pressure: Real,
) -> StagedObject {
    StagedObject {
        index,
        pressure: fields.pressure[index].max(min_pressure),
        temperature: fields.temperature[index],
        composition: fields.accumulation[index].clamped_non_negative(),
        k_values: *population.k_values(index),
        state: population.state(index),
        saved: population.saved(index),
    }
}

/// The phase a single-component mixture sits in: volatile species in
/// the vapour slot, heavy fractions in the liquid slot.
fn dominant_phase(composition: &Components) -> Phase {
    let mut best = None;
    let mut best_value = 0.0;
    for (component, value) in composition.iter() {
        if value > best_value {
            best = Some(component);
            best_value = value;
        }
    }
    match best {
        Some(component) if component.is_volatile() => Phase::Vapour,
        _ => Phase::Liquid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_composition::Component;

    #[test]
    fn dominant_phase_follows_volatility() {
        let mut gas = Components::ZERO;
        gas[Component::C1] = 1.0;
        assert_eq!(dominant_phase(&gas), Phase::Vapour);

        let mut oil = Components::ZERO;
        oil[Component::C15PlusSat] = 1.0;
        assert_eq!(dominant_phase(&oil), Phase::Liquid);

        assert_eq!(dominant_phase(&Components::ZERO), Phase::Liquid);
    }

    #[test]
    fn staging_applies_clamps() {
        let mut accumulation = Components::ZERO;
        accumulation[Component::C1] = 2.0;
        accumulation[Component::C3] = -1.0;
        let accumulation = [accumulation];
        let pressure = [0.25];
        let temperature = [400.0];

        let fields = FieldView {
            pressure: &pressure,
            temperature: &temperature,
            accumulation: &accumulation,
        };
        let population = Population::new(1);
        let staged = stage(&fields, &population, 0, 1.0);

        assert_eq!(staged.pressure, 1.0);
        assert_eq!(staged.composition[Component::C3], 0.0);
        assert_eq!(staged.composition[Component::C1], 2.0);
        // the stored field is untouched
        assert_eq!(fields.accumulation[0][Component::C3], -1.0);
    }
}
