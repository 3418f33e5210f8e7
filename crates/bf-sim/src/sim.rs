//! Timestep drivers: serial and partitioned flash stepping.

use crate::domain::Domain;
use crate::error::{SimError, SimResult};
use crate::saturation::{update_saturations, SaturationOptions};
use bf_composition::{Components, LumpedPropertyTable};
use bf_flash::{FlashConfig, FlashScheduler, FlashSolver, FlashStats};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for flash stepping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimOptions {
    pub flash: FlashConfig,
    pub saturation: SaturationOptions,
}

/// Serial timestep driver for one population.
///
/// Owns the scheduler (and thereby the per-object caches) across
/// timesteps; the domain storage is borrowed per step.
#[derive(Debug)]
pub struct Simulator {
    options: SimOptions,
    scheduler: FlashScheduler,
    molar_masses: Components,
}

impl Simulator {
    pub fn new(options: SimOptions, population_len: usize) -> Self {
        Self {
            scheduler: FlashScheduler::new(options.flash, population_len),
            molar_masses: LumpedPropertyTable::default_molar_masses(),
            options,
        }
    }

    pub fn scheduler(&self) -> &FlashScheduler {
        &self.scheduler
    }

    /// One full flash step: classify the whole population, drain the
    /// needs-check buckets through the solver, then derive saturations.
    pub fn step(
        &mut self,
        domain: &mut Domain,
        solver: &dyn FlashSolver,
    ) -> SimResult<FlashStats> {
        if domain.len() != self.scheduler.population().len() {
            return Err(SimError::InvalidArg {
                what: "domain size does not match the scheduler population",
            });
        }

        self.scheduler.classify(&domain.accumulation);

        let stats = {
            let (fields, mut outputs) = domain.flash_views();
            self.scheduler.run_pass(solver, &fields, &mut outputs)?
        };

        update_saturations(
            &self.molar_masses,
            &domain.phase_composition,
            &domain.densities,
            &domain.immobile,
            &self.options.saturation,
            &mut domain.saturations,
        );

        debug!(
            objects = stats.objects,
            solver_calls = stats.solver_calls,
            "flash step complete"
        );
        Ok(stats)
    }

    /// Revalidate confirmed objects at the start of a new outer coupling
    /// iteration, keeping caches as warm starts.
    pub fn begin_outer_iteration(&mut self) {
        self.scheduler.begin_outer_iteration();
    }

    /// One outer coupling iteration within a timestep: demote confirmed
    /// objects and re-run the flash pass against the updated fields,
    /// without re-running the classification (states and caches carry
    /// over as warm starts).
    pub fn iterate(
        &mut self,
        domain: &mut Domain,
        solver: &dyn FlashSolver,
    ) -> SimResult<FlashStats> {
        if domain.len() != self.scheduler.population().len() {
            return Err(SimError::InvalidArg {
                what: "domain size does not match the scheduler population",
            });
        }

        self.scheduler.begin_outer_iteration();

        let stats = {
            let (fields, mut outputs) = domain.flash_views();
            self.scheduler.run_pass(solver, &fields, &mut outputs)?
        };

        update_saturations(
            &self.molar_masses,
            &domain.phase_composition,
            &domain.densities,
            &domain.immobile,
            &self.options.saturation,
            &mut domain.saturations,
        );

        Ok(stats)
    }

    /// Bulk reset on simulation restart.
    pub fn reset(&mut self) {
        self.scheduler.reset();
    }
}

/// Partitioned timestep driver.
///
/// The population is split into contiguous disjoint ranges, each with
/// its own scheduler, cursor and cache; workers run the ordinary serial
/// pass on their range. The flash subsystem itself stays
/// single-threaded; parallelism lives entirely out here.
#[derive(Debug)]
pub struct PartitionedSimulator {
    options: SimOptions,
    chunk_len: usize,
    schedulers: Vec<FlashScheduler>,
    molar_masses: Components,
}

impl PartitionedSimulator {
    pub fn new(options: SimOptions, population_len: usize, partitions: usize) -> SimResult<Self> {
        if partitions == 0 {
            return Err(SimError::InvalidArg {
                what: "partitions must be positive",
            });
        }

        let chunk_len = population_len.div_ceil(partitions).max(1);
        let schedulers = (0..population_len)
            .step_by(chunk_len)
            .map(|start| {
                let len = chunk_len.min(population_len - start);
                FlashScheduler::new(options.flash, len)
            })
            .collect();

        Ok(Self {
            options,
            chunk_len,
            schedulers,
            molar_masses: LumpedPropertyTable::default_molar_masses(),
        })
    }

    /// One partitioned flash step; per-cell results are identical to the
    /// serial driver's, since partitions are disjoint.
    pub fn step(
        &mut self,
        domain: &mut Domain,
        solver: &(dyn FlashSolver + Sync),
    ) -> SimResult<FlashStats> {
        let expected: usize = self
            .schedulers
            .iter()
            .map(|s| s.population().len())
            .sum();
        if domain.len() != expected {
            return Err(SimError::InvalidArg {
                what: "domain size does not match the partitioned population",
            });
        }

        let chunks = domain.chunks_mut(self.chunk_len);
        let options = self.options;
        let molar_masses = self.molar_masses;

        chunks
            .into_par_iter()
            .zip(self.schedulers.par_iter_mut())
            .map(|(mut chunk, scheduler)| -> SimResult<FlashStats> {
                scheduler.classify(chunk.fields.accumulation);
                let stats = scheduler.run_pass(solver, &chunk.fields, &mut chunk.outputs)?;
                update_saturations(
                    &molar_masses,
                    &*chunk.outputs.composition,
                    &*chunk.outputs.densities,
                    chunk.immobile,
                    &options.saturation,
                    chunk.saturations,
                );
                Ok(stats)
            })
            .try_reduce(FlashStats::default, |mut a, b| {
                a.absorb(&b);
                Ok(a)
            })
    }

    pub fn begin_outer_iteration(&mut self) {
        for scheduler in self.schedulers.iter_mut() {
            scheduler.begin_outer_iteration();
        }
    }

    pub fn reset(&mut self) {
        for scheduler in self.schedulers.iter_mut() {
            scheduler.reset();
        }
    }
}
