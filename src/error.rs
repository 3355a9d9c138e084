//! Error types for the N-queens GA.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised while configuring or running the GA.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GaError {
    /// Run parameters rejected by [`GaConfig::validate`](crate::ga::GaConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage for an individual or the population could not be reserved.
    #[error("memory allocation failed: {0}")]
    ResourceExhaustion(#[from] TryReserveError),

    /// Survival left fewer than two parents and the run was configured to abort.
    #[error("degenerate selection in generation {generation}: {survivors} survivor(s) left")]
    DegenerateSelection {
        /// 0-based index of the generation that collapsed.
        generation: usize,
        /// Occupied slots left after survival.
        survivors: usize,
    },
}
