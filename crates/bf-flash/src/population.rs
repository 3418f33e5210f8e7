//! Object population: per-object state, caches and slice extraction.

use crate::solver::FlashOutcome;
use crate::state::{PhaseState, SavedSplit};
use bf_composition::Components;
use bf_core::numeric::Real;

/// The scheduler's per-object bookkeeping.
///
/// Owns the phase state, the cached split and K-values of every object,
/// plus the cursor and index buffer used to build homogeneous work
/// slices. The population persists across timesteps; caches are only
/// reset in bulk.
///
/// Index arguments must be below `len()`; violations are programming
/// errors caught by debug assertions, not recoverable conditions.
#[derive(Debug, Clone)]
pub struct Population {
    states: Vec<PhaseState>,
    saved: Vec<SavedSplit>,
    k_values: Vec<Components>,
    cursor: usize,
    slice: Vec<usize>,
}

impl Population {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![PhaseState::SinglePhaseNeedsCheck; len],
            saved: vec![SavedSplit::None; len],
            k_values: vec![Components::ZERO; len],
            cursor: 0,
            slice: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> PhaseState {
        self.states[index]
    }

    pub fn saved(&self, index: usize) -> SavedSplit {
        self.saved[index]
    }

    pub fn k_values(&self, index: usize) -> &Components {
        &self.k_values[index]
    }

    pub fn count_in(&self, state: PhaseState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }

    /// Stability short-circuit pass over the whole population.
    ///
    /// For each object the clamped component masses are summed and the
    /// largest single-component mass found. No mass at all means there
    /// is nothing to flash; a total carried by a single component is
    /// trivially single-phase and needs no solve; everything else is
    /// conservatively marked for a stability check. Previous two-phase
    /// or bubble-point knowledge is deliberately not consulted, and
    /// every K-value cache is zeroed.
    pub fn classify(&mut self, accumulation: &[Components], enorm: Real) {
        debug_assert_eq!(accumulation.len(), self.len());

        // Seeded slightly negative so an all-zero object lands in the
        // no-mass branch.
        let very_tiny = -1.0 / enorm;

        for (i, amounts) in accumulation.iter().enumerate() {
            let mut mass = very_tiny;
            let mut max_mass = very_tiny;
            for (_, value) in amounts.iter() {
                let clamped = value.max(0.0);
                mass += clamped;
                max_mass = max_mass.max(clamped);
            }
            self.k_values[i].zero();
            self.saved[i] = SavedSplit::None;

            self.states[i] = if mass <= 0.0 {
                PhaseState::NoHydrocarbon
            } else if mass <= max_mass {
                PhaseState::SinglePhaseConfirmed
            } else {
                PhaseState::SinglePhaseNeedsCheck
            };
        }

        self.cursor = 0;
    }

    /// Collect up to `max_len` object indices in `target` state, scanning
    /// forward from the cursor. Returns the count collected; the indices
    /// are available through [`Population::slice`]. The cursor only ever
    /// advances, so no object is returned twice in one pass.
    pub fn take_slice(&mut self, target: PhaseState, max_len: usize) -> usize {
        self.slice.clear();
        while self.slice.len() < max_len && self.cursor < self.states.len() {
            let j = self.cursor;
            self.cursor += 1;
            if self.states[j] == target {
                self.slice.push(j);
            }
        }
        self.slice.len()
    }

    /// Index buffer filled by the last [`Population::take_slice`] call.
    pub fn slice(&self) -> &[usize] {
        &self.slice
    }

    /// Pull the next single object in `target` state from the cursor
    /// position, for one-at-a-time re-dispatch.
    pub fn advance_one(&mut self, target: PhaseState) -> Option<usize> {
        while self.cursor < self.states.len() {
            let j = self.cursor;
            self.cursor += 1;
            if self.states[j] == target {
                return Some(j);
            }
        }
        None
    }

    /// Rewind the cursor to the start of the population for a new pass.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Classify solver results back into the population.
    ///
    /// Per object: a returned phase code at or above `threshold` is
    /// stored verbatim together with the returned split and K-values
    /// (partially converged results are kept rather than ditched).
    /// Below the threshold the object either drops back to
    /// `SinglePhaseNeedsCheck` (when `reset_on_failure` is set, to be
    /// re-tested later) or keeps its previous unresolved state. Always a
    /// per-object outcome; a mixed batch raises nothing.
    pub fn apply_results(
        &mut self,
        indices: &[usize],
        threshold: PhaseState,
        reset_on_failure: bool,
        outcomes: &[FlashOutcome],
    ) {
        debug_assert_eq!(indices.len(), outcomes.len());

        for (&i, outcome) in indices.iter().zip(outcomes.iter()) {
            if outcome.state >= threshold {
                self.states[i] = outcome.state;
                self.saved[i] = outcome.saved;
                self.k_values[i] = outcome.k_values;
            } else if reset_on_failure {
                self.states[i] = PhaseState::SinglePhaseNeedsCheck;
            }
        }
    }

    /// Drop every confirmed state back to its needs-check counterpart,
    /// keeping the cached splits and K-values as warm starts. Used when
    /// a new outer iteration must revalidate previous results against
    /// updated pressure and temperature.
    pub fn demote_confirmed_to_needs_check(&mut self) {
        for state in self.states.iter_mut() {
            *state = state.demoted();
        }
        self.cursor = 0;
    }

    /// Bulk re-initialization on simulation reset.
    pub fn reset(&mut self) {
        for state in self.states.iter_mut() {
            *state = PhaseState::SinglePhaseNeedsCheck;
        }
        for saved in self.saved.iter_mut() {
            *saved = SavedSplit::None;
        }
        for k in self.k_values.iter_mut() {
            k.zero();
        }
        self.cursor = 0;
        self.slice.clear();
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, index: usize, state: PhaseState) {
        self.states[index] = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::PhaseLabel;
    use bf_composition::Component;

    const ENORM: Real = 1.0e80;

    fn acc(pairs: &[(Component, Real)]) -> Components {
        let mut c = Components::ZERO;
        for (component, value) in pairs {
            c[*component] = *value;
        }
        c
    }

    fn outcome(state: PhaseState, split: Real) -> FlashOutcome {
        let mut k = Components::ZERO;
        k.fill(1.5);
        FlashOutcome {
            state,
            saved: SavedSplit::Split(split),
            k_values: k,
            label: PhaseLabel::LiquidLike,
            phase_a: None,
            phase_b: None,
        }
    }

    #[test]
    fn classification_buckets() {
        let mut population = Population::new(3);
        let accumulation = [
            acc(&[]),
            acc(&[(Component::C1, 10.0)]),
            acc(&[(Component::C1, 5.0), (Component::C15PlusSat, 5.0)]),
        ];
        population.classify(&accumulation, ENORM);

        assert_eq!(population.state(0), PhaseState::NoHydrocarbon);
        assert_eq!(population.state(1), PhaseState::SinglePhaseConfirmed);
        assert_eq!(population.state(2), PhaseState::SinglePhaseNeedsCheck);
    }

    #[test]
    fn classification_clamps_negative_noise() {
        let mut population = Population::new(1);
        let accumulation = [acc(&[(Component::C1, -1.0e-9), (Component::C2, -2.0)])];
        population.classify(&accumulation, ENORM);
        assert_eq!(population.state(0), PhaseState::NoHydrocarbon);
        // the stored accumulation itself is untouched
        assert_eq!(accumulation[0][Component::C2], -2.0);
    }

    #[test]
    fn classification_is_idempotent() {
        let accumulation = [
            acc(&[(Component::C1, 1.0)]),
            acc(&[(Component::C1, 1.0), (Component::C3, 1.0)]),
            acc(&[]),
        ];
        let mut population = Population::new(3);
        population.classify(&accumulation, ENORM);
        let first: Vec<_> = (0..3).map(|i| population.state(i)).collect();
        population.classify(&accumulation, ENORM);
        let second: Vec<_> = (0..3).map(|i| population.state(i)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn classification_zeroes_caches() {
        let mut population = Population::new(1);
        let accumulation = [acc(&[(Component::C1, 1.0), (Component::C3, 1.0)])];
        population.classify(&accumulation, ENORM);
        population.apply_results(
            &[0],
            PhaseState::SinglePhaseConfirmed,
            false,
            &[outcome(PhaseState::TwoPhaseConfirmed, 0.5)],
        );
        assert_ne!(*population.k_values(0), Components::ZERO);

        population.classify(&accumulation, ENORM);
        assert_eq!(*population.k_values(0), Components::ZERO);
        assert_eq!(population.saved(0), SavedSplit::None);
    }

    #[test]
    fn slices_never_repeat_objects() {
        let mut population = Population::new(10);
        let accumulation: Vec<Components> = (0..10)
            .map(|_| acc(&[(Component::C1, 1.0), (Component::C4, 1.0)]))
            .collect();
        population.classify(&accumulation, ENORM);

        let mut seen = Vec::new();
        loop {
            let n = population.take_slice(PhaseState::SinglePhaseNeedsCheck, 3);
            if n == 0 {
                break;
            }
            assert!(n <= 3);
            for &i in population.slice() {
                assert!(!seen.contains(&i), "object {i} returned twice");
                seen.push(i);
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn take_slice_filters_by_state() {
        let mut population = Population::new(4);
        population.set_state(0, PhaseState::TwoPhaseNeedsCheck);
        population.set_state(2, PhaseState::TwoPhaseNeedsCheck);

        let n = population.take_slice(PhaseState::TwoPhaseNeedsCheck, 8);
        assert_eq!(n, 2);
        assert_eq!(population.slice(), &[0, 2]);
    }

    #[test]
    fn advance_one_walks_matching_objects() {
        let mut population = Population::new(5);
        population.set_state(1, PhaseState::BubbleNeedsCheck);
        population.set_state(4, PhaseState::BubbleNeedsCheck);

        assert_eq!(population.advance_one(PhaseState::BubbleNeedsCheck), Some(1));
        assert_eq!(population.advance_one(PhaseState::BubbleNeedsCheck), Some(4));
        assert_eq!(population.advance_one(PhaseState::BubbleNeedsCheck), None);
    }

    #[test]
    fn partial_success_is_per_object() {
        let mut population = Population::new(3);
        for i in 0..3 {
            population.set_state(i, PhaseState::TwoPhaseNeedsCheck);
        }

        // object 0 converged, object 1 failed with reset
        population.apply_results(
            &[0, 1],
            PhaseState::SinglePhaseConfirmed,
            true,
            &[
                outcome(PhaseState::TwoPhaseConfirmed, 0.5),
                outcome(PhaseState::SinglePhaseNeedsCheck, 0.0),
            ],
        );
        // object 2 failed without reset
        population.apply_results(
            &[2],
            PhaseState::SinglePhaseConfirmed,
            false,
            &[outcome(PhaseState::SinglePhaseNeedsCheck, 0.0)],
        );

        assert_eq!(population.state(0), PhaseState::TwoPhaseConfirmed);
        assert_eq!(population.saved(0), SavedSplit::Split(0.5));
        assert_eq!(population.state(1), PhaseState::SinglePhaseNeedsCheck);
        assert_eq!(population.state(2), PhaseState::TwoPhaseNeedsCheck);
    }

    #[test]
    fn demotion_keeps_caches() {
        let mut population = Population::new(2);
        population.set_state(0, PhaseState::TwoPhaseNeedsCheck);
        population.set_state(1, PhaseState::TwoPhaseNeedsCheck);
        population.apply_results(
            &[0, 1],
            PhaseState::SinglePhaseConfirmed,
            false,
            &[
                outcome(PhaseState::TwoPhaseConfirmed, 0.25),
                outcome(PhaseState::TwoPhaseConfirmed, 0.75),
            ],
        );

        population.demote_confirmed_to_needs_check();

        for i in 0..2 {
            assert_eq!(population.state(i), PhaseState::TwoPhaseNeedsCheck);
        }
        assert_eq!(population.saved(0), SavedSplit::Split(0.25));
        assert_eq!(population.saved(1), SavedSplit::Split(0.75));
        assert_ne!(*population.k_values(0), Components::ZERO);
    }

    #[test]
    fn empty_population_is_a_noop() {
        let mut population = Population::new(0);
        population.classify(&[], ENORM);
        assert_eq!(population.take_slice(PhaseState::SinglePhaseNeedsCheck, 8), 0);
        assert_eq!(population.advance_one(PhaseState::SinglePhaseNeedsCheck), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cursor_is_monotonic_across_mixed_calls(
            states in prop::collection::vec(0u8..7u8, 0..64),
            max_len in 1usize..8usize,
        ) {
            let mut population = Population::new(states.len());
            for (i, s) in states.iter().enumerate() {
                let state = match s {
                    0 => PhaseState::NoHydrocarbon,
                    1 => PhaseState::SinglePhaseNeedsCheck,
                    2 => PhaseState::SinglePhaseConfirmed,
                    3 => PhaseState::TwoPhaseNeedsCheck,
                    4 => PhaseState::TwoPhaseConfirmed,
                    5 => PhaseState::BubbleNeedsCheck,
                    _ => PhaseState::BubbleConfirmed,
                };
                population.set_state(i, state);
            }

            let target = PhaseState::SinglePhaseNeedsCheck;
            let expected = population.count_in(target);

            let mut seen = std::collections::HashSet::new();
            loop {
                let n = population.take_slice(target, max_len);
                if n == 0 {
                    break;
                }
                for &i in population.slice() {
                    prop_assert!(seen.insert(i), "duplicate index {}", i);
                    prop_assert!(i < states.len());
                }
            }
            prop_assert_eq!(seen.len(), expected);
        }
    }
}
