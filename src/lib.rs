//! N-queens solver built on a generational genetic algorithm.
//!
//! - [`ga`]: the evolutionary engine (individuals, fitness, survival,
//!   crossover, mutation, generation loop)
//! - [`cli`]: the command-line front end used by the `queens-ga` binary
//!
//! ```
//! use queens_ga::ga::{GaConfig, GaRunner};
//!
//! let config = GaConfig::default()
//!     .with_board_size(4)
//!     .with_population_size(200)
//!     .with_max_generations(500)
//!     .with_seed(42);
//! let result = GaRunner::run(&config).unwrap();
//! assert!(result.solutions.iter().all(|s| s.is_solution()));
//! ```

pub mod cli;
pub mod error;
pub mod ga;
pub mod random;

pub use error::GaError;
