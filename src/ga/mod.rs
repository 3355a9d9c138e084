//! Genetic algorithm for the N-queens puzzle.
//!
//! A placement stores one queen per column; its fitness is the negated,
//! double-counted number of attacking queen pairs. The population evolves
//! through probabilistic survival, single-point crossover and rare
//! single-gene mutation until enough zero-fitness placements head the
//! ranking or the generation budget runs out.
//!
//! # Key Types
//!
//! - [`Individual`]: a placement with its cached fitness
//! - [`Population`]: the fixed-size, rankable set of individuals
//! - [`GaConfig`]: run parameters (board size, population, budget, cap)
//! - [`GaRunner`]: executes the generation loop
//! - [`GaResult`]: solutions, best individual and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: crossover and mutation
//! - [`selection`]: survival draw and parent picking
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::{DegeneratePolicy, GaConfig, MUTATION_PER_MILLE, WORST_FITNESS};
pub use population::Population;
pub use runner::{
    next_generation, GaResult, GaRunner, GenerationObserver, GenerationStats, Termination,
};
pub use types::{conflicting_pairs, evaluate, Fitness, Individual};
