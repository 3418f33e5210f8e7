//! Flattened per-cell field storage.
//!
//! Stands in for the grid layer at this subsystem's boundary: one slot
//! per cell, indexed consistently with the scheduler's object ordering.
//! Pressure, temperature and accumulation are supplied by the outer
//! simulation each timestep; the phase-indexed slots are (re)written by
//! the flash pass.

use bf_composition::{Components, PhaseComponents, PhaseValues, Saturation};
use bf_core::numeric::Real;
use bf_flash::{FieldView, PhaseOutputs};

/// Per-cell storage for one (sub-)population.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Pore pressure per cell [Pa].
    pub pressure: Vec<Real>,
    /// Temperature per cell [K].
    pub temperature: Vec<Real>,
    /// Per-component accumulation per cell; read-only for the flash.
    pub accumulation: Vec<Components>,
    /// Retained immobile-species volume fraction per cell.
    pub immobile: Vec<Real>,
    /// Flashed per-phase, per-component amounts.
    pub phase_composition: Vec<PhaseComponents>,
    /// Flashed per-phase totals.
    pub phase_totals: Vec<PhaseValues>,
    /// Flashed per-phase densities [kg/m³].
    pub densities: Vec<PhaseValues>,
    /// Flashed per-phase viscosities [Pa·s].
    pub viscosities: Vec<PhaseValues>,
    /// Derived pore saturations.
    pub saturations: Vec<Saturation>,
}

impl Domain {
    pub fn new(len: usize) -> Self {
        Self {
            pressure: vec![0.0; len],
            temperature: vec![0.0; len],
            accumulation: vec![Components::ZERO; len],
            immobile: vec![0.0; len],
            phase_composition: vec![PhaseComponents::ZERO; len],
            phase_totals: vec![PhaseValues::ZERO; len],
            densities: vec![PhaseValues::ZERO; len],
            viscosities: vec![PhaseValues::ZERO; len],
            saturations: vec![Saturation::water_filled(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Split borrows for one flash pass: read-only input fields plus
    /// mutable phase-indexed outputs.
    pub fn flash_views(&mut self) -> (FieldView<'_>, PhaseOutputs<'_>) {
        let Domain {
            pressure,
            temperature,
            accumulation,
            phase_composition,
            phase_totals,
            densities,
            viscosities,
            ..
        } = self;
        (
            FieldView {
                pressure: pressure.as_slice(),
                temperature: temperature.as_slice(),
                accumulation: accumulation.as_slice(),
            },
            PhaseOutputs {
                composition: phase_composition.as_mut_slice(),
                totals: phase_totals.as_mut_slice(),
                densities: densities.as_mut_slice(),
                viscosities: viscosities.as_mut_slice(),
            },
        )
    }

    /// Disjoint contiguous sub-domains of at most `chunk_len` cells,
    /// for partitioned stepping. Each chunk carries its own input and
    /// output borrows plus the saturation slots.
    pub fn chunks_mut(&mut self, chunk_len: usize) -> Vec<DomainChunk<'_>> {
        assert!(chunk_len > 0, "chunk_len must be positive");

        let Domain {
            pressure,
            temperature,
            accumulation,
            immobile,
            phase_composition,
            phase_totals,
            densities,
            viscosities,
            saturations,
        } = self;

        let iter = pressure
            .chunks(chunk_len)
            .zip(temperature.chunks(chunk_len))
            .zip(accumulation.chunks(chunk_len))
            .zip(immobile.chunks(chunk_len))
            .zip(phase_composition.chunks_mut(chunk_len))
            .zip(phase_totals.chunks_mut(chunk_len))
            .zip(densities.chunks_mut(chunk_len))
            .zip(viscosities.chunks_mut(chunk_len))
            .zip(saturations.chunks_mut(chunk_len));

        iter.map(
            |((((((((pressure, temperature), accumulation), immobile), composition), totals), densities), viscosities), saturations)| {
                DomainChunk {
                    fields: FieldView {
                        pressure,
                        temperature,
                        accumulation,
                    },
                    outputs: PhaseOutputs {
                        composition,
                        totals,
                        densities,
                        viscosities,
                    },
                    immobile,
                    saturations,
                }
            },
        )
        .collect()
    }
}

/// One contiguous sub-domain handed to a partition worker.
#[derive(Debug)]
pub struct DomainChunk<'a> {
    pub fields: FieldView<'a>,
    pub outputs: PhaseOutputs<'a>,
    pub immobile: &'a [Real],
    pub saturations: &'a mut [Saturation],
}

impl DomainChunk<'_> {
    pub fn len(&self) -> usize {
        self.fields.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.pressure.is_empty()
    }
}
