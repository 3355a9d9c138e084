//! Fixed-size population of individuals.

use super::config::GaConfig;
use super::types::Individual;
use crate::error::GaError;
use rand::Rng;
use std::cmp::Reverse;

/// The population owned by a run.
///
/// Its length never changes between generations. After
/// [`rank`](Self::rank) the individuals are ordered best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Builds `config.population_size` random individuals.
    ///
    /// Allocation failure aborts construction; no partial population is
    /// returned.
    pub fn random<R: Rng>(config: &GaConfig, rng: &mut R) -> Result<Self, GaError> {
        let mut individuals = Vec::new();
        individuals.try_reserve_exact(config.population_size)?;
        for _ in 0..config.population_size {
            individuals.push(Individual::random(config.board_size, rng)?);
        }
        Ok(Self { individuals })
    }

    /// Wraps an existing set of individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// `true` if the population holds nobody.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in their current order, ranked after [`rank`](Self::rank).
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable view for in-place mutation; fitness stays consistent
    /// through [`Individual::set_gene`].
    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Sorts by fitness, closest to zero first. Tie order is unspecified.
    pub fn rank(&mut self) {
        self.individuals
            .sort_unstable_by_key(|ind| Reverse(ind.fitness()));
    }

    /// Number of solutions at the head of the ranking.
    ///
    /// Only meaningful right after [`rank`](Self::rank).
    pub fn leading_solutions(&self) -> usize {
        self.individuals
            .iter()
            .take_while(|ind| ind.is_solution())
            .count()
    }

    /// The best individual found by a linear scan.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().max_by_key(|ind| ind.fitness())
    }

    /// Turns the population into slots that can be vacated and refilled.
    pub(crate) fn into_slots(self) -> Vec<Option<Individual>> {
        self.individuals.into_iter().map(Some).collect()
    }

    /// Rebuilds the population from fully refilled slots.
    pub(crate) fn from_slots(slots: Vec<Option<Individual>>) -> Self {
        let expected = slots.len();
        let individuals: Vec<Individual> = slots.into_iter().flatten().collect();
        debug_assert_eq!(individuals.len(), expected, "unfilled population slot");
        Self { individuals }
    }
}
