//! GA generation loop.
//!
//! [`GaRunner`] drives one run:
//! initialization → ranking → termination check → survival → crossover
//! refill → mutation → ranking ...
//!
//! The run ends as [`Termination::Solved`] once `max_solutions`
//! solutions head any ranking, including the one after the last evolve
//! step, or as [`Termination::Exhausted`] after `max_generations` evolve
//! steps.

use super::config::{DegeneratePolicy, GaConfig};
use super::operators;
use super::population::Population;
use super::selection;
use super::types::{Fitness, Individual};
use crate::error::GaError;
use crate::random::{create_rng, random_seed};
use rand::Rng;
use tracing::{debug, info, warn};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Termination {
    /// The solution cap was reached.
    Solved,
    /// The generation budget ran out first.
    Exhausted,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GaResult {
    /// Zero-conflict individuals from the head of the final ranking, at
    /// most `max_solutions` of them. May be empty when exhausted.
    pub solutions: Vec<Individual>,

    /// Best individual of the final ranking.
    pub best: Individual,

    /// For a solved run, the number of rankings performed, so the final
    /// ranking after the last evolve step gives `max_generations + 1`.
    /// For an exhausted run, the generation budget.
    pub generations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Seed the run was started from.
    pub seed: u64,

    /// Best fitness of every ranked generation, in order.
    pub fitness_history: Vec<Fitness>,

    /// Vacancies filled without crossover because fewer than two parents
    /// were left.
    pub fallbacks: usize,
}

impl GaResult {
    /// Whether the solution cap was reached.
    pub fn is_solved(&self) -> bool {
        self.termination == Termination::Solved
    }
}

/// Statistics for one evolve step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenerationStats {
    /// 0-based index of the generation that was replaced.
    pub generation: usize,
    /// Individuals that survived unchanged.
    pub copied: usize,
    /// Individuals created to fill vacancies.
    pub born: usize,
    /// Individuals that took a mutation.
    pub mutated: usize,
    /// Vacancies filled by the degenerate fallback.
    pub fallbacks: usize,
    /// Head of the new, not yet ranked, population.
    pub best: Individual,
}

impl GenerationStats {
    /// Share of the population mutated in this step, in percent.
    pub fn mutation_percent(&self) -> f64 {
        let size = self.copied + self.born;
        if size == 0 {
            return 0.0;
        }
        self.mutated as f64 / size as f64 * 100.0
    }
}

/// Receives per-generation statistics of a verbose run.
///
/// Observers only see copies of the state; they cannot influence the run.
pub trait GenerationObserver {
    /// Called once per evolve step, after mutation.
    fn on_generation(&mut self, stats: &GenerationStats);
}

impl<F: FnMut(&GenerationStats)> GenerationObserver for F {
    fn on_generation(&mut self, stats: &GenerationStats) {
        self(stats)
    }
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```
/// use queens_ga::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_board_size(6)
///     .with_population_size(100)
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::run(&config).unwrap();
/// assert_eq!(result.seed, 42);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA without progress reporting.
    pub fn run(config: &GaConfig) -> Result<GaResult, GaError> {
        Self::run_with_observer(config, &mut |_: &GenerationStats| {})
    }

    /// Runs the GA, passing statistics to `observer` after every evolve
    /// step when `config.verbose` is set.
    pub fn run_with_observer<O: GenerationObserver>(
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult, GaError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(random_seed);
        let mut rng = create_rng(seed);
        info!(
            board_size = config.board_size,
            population_size = config.population_size,
            max_generations = config.max_generations,
            max_solutions = config.max_solutions,
            seed,
            "starting N-queens GA"
        );

        let mut population = Population::random(config, &mut rng)?;
        // grows one entry per ranking; the budget may be far larger than
        // the generations a run actually needs
        let mut fitness_history = Vec::new();
        let mut fallbacks = 0;

        for gen in 0..=config.max_generations {
            population.rank();
            fitness_history.push(head_fitness(&population));

            if population.leading_solutions() >= config.max_solutions {
                info!(generation = gen, "solution cap reached");
                return Ok(finish(
                    population,
                    config,
                    gen + 1,
                    Termination::Solved,
                    seed,
                    fitness_history,
                    fallbacks,
                ));
            }
            if gen == config.max_generations {
                break;
            }

            let (next, stats) = next_generation(population, config, gen, &mut rng)?;
            population = next;
            fallbacks += stats.fallbacks;

            debug!(
                generation = stats.generation,
                best_fitness = stats.best.fitness(),
                copied = stats.copied,
                born = stats.born,
                mutated = stats.mutated,
                "generation evolved"
            );
            if config.verbose {
                observer.on_generation(&stats);
            }
        }

        info!(
            generations = config.max_generations,
            solutions = population.leading_solutions(),
            "generation budget exhausted"
        );
        Ok(finish(
            population,
            config,
            config.max_generations,
            Termination::Exhausted,
            seed,
            fitness_history,
            fallbacks,
        ))
    }
}

/// Replaces `population` with the next generation.
///
/// Survival vacates slots, crossover refills them from the occupied slots
/// (including slots refilled earlier in the same pass), then every
/// individual gets its mutation chance.
pub fn next_generation<R: Rng>(
    population: Population,
    config: &GaConfig,
    generation: usize,
    rng: &mut R,
) -> Result<(Population, GenerationStats), GaError> {
    let size = population.len();
    let mut slots = population.into_slots();
    let vacant = selection::cull(&mut slots, rng);

    let mut occupied: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| slot.as_ref().map(|_| idx))
        .collect();
    let survivors = occupied.len();

    if survivors < 2 && !vacant.is_empty() {
        if config.degenerate_policy == DegeneratePolicy::Abort {
            return Err(GaError::DegenerateSelection {
                generation,
                survivors,
            });
        }
        warn!(generation, survivors, "too few parents left, using fallback");
    }

    let mut fallbacks = 0;
    for &idx in &vacant {
        let child = match parent_pair(&slots, &occupied, rng) {
            Some((parent1, parent2)) => operators::crossover(parent1, parent2, rng)?,
            None => {
                fallbacks += 1;
                match occupied.iter().find_map(|&i| slots[i].clone()) {
                    Some(survivor) => survivor,
                    None => Individual::random(config.board_size, rng)?,
                }
            }
        };
        slots[idx] = Some(child);
        occupied.push(idx);
    }

    let mut population = Population::from_slots(slots);
    let mut mutated = 0;
    for individual in population.individuals_mut() {
        if operators::should_mutate(rng) {
            operators::mutate(individual, rng);
            mutated += 1;
        }
    }

    let best = population.individuals()[0].clone();
    let stats = GenerationStats {
        generation,
        copied: size - vacant.len(),
        born: vacant.len(),
        mutated,
        fallbacks,
        best,
    };
    Ok((population, stats))
}

fn parent_pair<'a, R: Rng>(
    slots: &'a [Option<Individual>],
    occupied: &[usize],
    rng: &mut R,
) -> Option<(&'a Individual, &'a Individual)> {
    let (a, b) = selection::pick_parents(occupied, rng)?;
    Some((slots[a].as_ref()?, slots[b].as_ref()?))
}

fn head_fitness(population: &Population) -> Fitness {
    population.individuals()[0].fitness()
}

fn finish(
    population: Population,
    config: &GaConfig,
    generations: usize,
    termination: Termination,
    seed: u64,
    fitness_history: Vec<Fitness>,
    fallbacks: usize,
) -> GaResult {
    let ranked = population.individuals();
    let solutions: Vec<Individual> = ranked
        .iter()
        .take_while(|ind| ind.is_solution())
        .take(config.max_solutions)
        .cloned()
        .collect();
    GaResult {
        solutions,
        best: ranked[0].clone(),
        generations,
        termination,
        seed,
        fitness_history,
        fallbacks,
    }
}

// ============================================================================
// Tests
// ============================================================================
