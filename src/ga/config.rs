//! GA configuration.
//!
//! [`GaConfig`] holds the immutable run parameters. The operator rates are
//! fixed constants, not configuration.

use crate::error::GaError;

/// Upper bound of the survival draw.
///
/// An individual is replaced when a uniform draw from `0..WORST_FITNESS`
/// falls below its conflict magnitude. On an 8×8 board the all-same-row
/// placement scores exactly `-56`.
pub const WORST_FITNESS: u32 = 56;

/// Per-individual mutation probability, in thousandths.
pub const MUTATION_PER_MILLE: u32 = 5;

/// What to do when survival leaves fewer than two parents for crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Refill with a clone of the lone survivor, or with a fresh random
    /// individual when nobody survived, until two slots are occupied.
    #[default]
    Fallback,

    /// Stop the run with [`GaError::DegenerateSelection`].
    Abort,
}

/// Configuration for one N-queens GA run.
///
/// # Builder Pattern
///
/// ```
/// use queens_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_board_size(8)
///     .with_population_size(200)
///     .with_max_generations(1000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of queens and board side length. Must be even and at least 4.
    pub board_size: usize,

    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of evolve steps before the run gives up.
    pub max_generations: usize,

    /// Stop as soon as this many solutions head the ranking.
    pub max_solutions: usize,

    /// Deliver per-generation statistics to the observer.
    pub verbose: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from OS entropy.
    pub seed: Option<u64>,

    /// Handling of a population that collapses below two parents.
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            population_size: 100,
            max_generations: 1000,
            max_solutions: 1,
            verbose: false,
            seed: None,
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}

impl GaConfig {
    /// Sets the board size.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the solution cap.
    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = n;
        self
    }

    /// Enables or disables verbose progress reporting.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the degenerate-selection policy.
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        let invalid = |msg: &str| -> Result<(), GaError> {
            Err(GaError::InvalidConfig(msg.into()))
        };
        if self.board_size % 2 != 0 {
            return invalid("board_size must be even");
        }
        // the crossover cut is drawn from 1..=n-2
        if self.board_size < 4 {
            return invalid("board_size must be at least 4");
        }
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.max_solutions == 0 {
            return invalid("max_solutions must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.max_solutions, 1);
        assert!(!config.verbose);
        assert!(config.seed.is_none());
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_board_size(12)
            .with_population_size(300)
            .with_max_generations(50)
            .with_max_solutions(4)
            .with_verbose(true)
            .with_seed(9)
            .with_degenerate_policy(DegeneratePolicy::Abort);

        assert_eq!(config.board_size, 12);
        assert_eq!(config.population_size, 300);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.max_solutions, 4);
        assert!(config.verbose);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Abort);
    }

    #[test]
    fn test_validate_odd_board() {
        let config = GaConfig::default().with_board_size(5);
        assert_eq!(
            config.validate(),
            Err(GaError::InvalidConfig("board_size must be even".into()))
        );
    }

    #[test]
    fn test_validate_board_too_small() {
        assert!(GaConfig::default().with_board_size(2).validate().is_err());
        assert!(GaConfig::default().with_board_size(0).validate().is_err());
        assert!(GaConfig::default().with_board_size(4).validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_solutions() {
        let config = GaConfig::default().with_max_solutions(0);
        assert!(config.validate().is_err());
    }
}
