//! Individual representation and the conflict-count fitness.
//!
//! A placement stores one queen per column: `placement[col] = row`. The
//! fitness is the negated number of attacking relationships, counted from
//! both queens' point of view, so a board with `C` attacking pairs scores
//! `-2 * C`. Zero means the placement is a solution.

use crate::error::GaError;
use rand::Rng;
use std::fmt;

/// Fitness score of a placement. Always `<= 0`; `0` is a solution.
pub type Fitness = i32;

/// Computes the fitness of a placement.
///
/// For every ordered pair of distinct columns `(i, j)` one point is
/// subtracted when the two queens share a row or a diagonal. Each
/// attacking pair is therefore seen twice.
///
/// # Complexity
/// O(n²)
pub fn evaluate(placement: &[usize]) -> Fitness {
    let mut fitness = 0;
    for (i, &row_i) in placement.iter().enumerate() {
        for (j, &row_j) in placement.iter().enumerate() {
            if i != j && attacks(i, row_i, j, row_j) {
                fitness -= 1;
            }
        }
    }
    fitness
}

/// Number of unordered queen pairs that attack each other.
pub fn conflicting_pairs(placement: &[usize]) -> usize {
    let mut pairs = 0;
    for (i, &row_i) in placement.iter().enumerate() {
        for (j, &row_j) in placement.iter().enumerate().skip(i + 1) {
            if attacks(i, row_i, j, row_j) {
                pairs += 1;
            }
        }
    }
    pairs
}

fn attacks(col_a: usize, row_a: usize, col_b: usize, row_b: usize) -> bool {
    row_a == row_b || row_a.abs_diff(row_b) == col_a.abs_diff(col_b)
}

/// A candidate queen placement with its cached fitness.
///
/// The fields are private: every way of building or changing an
/// individual re-evaluates it, so [`fitness`](Self::fitness) always
/// matches [`placement`](Self::placement).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Individual {
    placement: Vec<usize>,
    fitness: Fitness,
}

impl Individual {
    /// Wraps a placement and evaluates it.
    ///
    /// # Panics
    /// Panics if any row is outside `0..placement.len()`.
    pub fn new(placement: Vec<usize>) -> Self {
        let n = placement.len();
        assert!(
            placement.iter().all(|&row| row < n),
            "row out of range for a {n}x{n} board"
        );
        let fitness = evaluate(&placement);
        Self { placement, fitness }
    }

    /// Creates a random individual for an `n`×`n` board.
    ///
    /// Every gene is drawn uniformly from `0..n`; rows may repeat.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self, GaError> {
        let mut placement = Vec::new();
        placement.try_reserve_exact(n)?;
        placement.extend((0..n).map(|_| rng.random_range(0..n)));
        Ok(Self::new(placement))
    }

    /// Row of the queen in each column.
    pub fn placement(&self) -> &[usize] {
        &self.placement
    }

    /// Board size.
    pub fn len(&self) -> usize {
        self.placement.len()
    }

    /// `true` for a zero-column placement.
    pub fn is_empty(&self) -> bool {
        self.placement.is_empty()
    }

    /// Cached fitness, `0` for a solution and negative otherwise.
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Magnitude of the fitness, used as the survival pressure.
    pub fn conflict_magnitude(&self) -> u32 {
        self.fitness.unsigned_abs()
    }

    /// `true` if no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.fitness == 0
    }

    /// Moves the queen in `column` to `row` and re-evaluates.
    ///
    /// # Panics
    /// Panics if `column` or `row` is outside the board.
    pub fn set_gene(&mut self, column: usize, row: usize) {
        let n = self.placement.len();
        assert!(row < n, "row {row} out of range for a {n}x{n} board");
        self.placement[column] = row;
        self.fitness = evaluate(&self.placement);
    }

    /// Consumes the individual and returns its row per column.
    pub fn into_placement(self) -> Vec<usize> {
        self.placement
    }
}

impl fmt::Display for Individual {
    /// `[g0,g1,...,gN-1] fitness = F`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.placement.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{row}")?;
        }
        write!(f, "] fitness = {}", self.fitness)
    }
}
