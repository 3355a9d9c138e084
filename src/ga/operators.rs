//! Crossover and mutation operators.
//!
//! - [`crossover`]: single cut point drawn from `1..=n-2`, prefix from the
//!   first parent, suffix from the second.
//! - [`mutate`]: rewrite one gene. Both the column and the new row are
//!   drawn from `0..n-1`, so the last column and the last row are never
//!   produced by mutation.
//!
//! Every operator returns or leaves behind a freshly evaluated individual.

use super::config::MUTATION_PER_MILLE;
use super::types::Individual;
use crate::error::GaError;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Draws a cut point uniformly from `1..=n-2`.
///
/// # Panics
/// Panics if `n < 3`.
pub fn cross_point<R: Rng>(n: usize, rng: &mut R) -> usize {
    assert!(n >= 3, "crossover needs at least 3 columns, got {n}");
    rng.random_range(1..=n - 2)
}

/// Single-point crossover at a random cut.
pub fn crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> Result<Individual, GaError> {
    let point = cross_point(parent1.len(), rng);
    crossover_at(parent1, parent2, point)
}

/// Builds a child from `parent1[..point]` followed by `parent2[point..]`.
///
/// Fails with [`GaError::ResourceExhaustion`] if the child's genes cannot
/// be allocated.
///
/// # Panics
/// Panics if the parents differ in length or `point > n`.
pub fn crossover_at(
    parent1: &Individual,
    parent2: &Individual,
    point: usize,
) -> Result<Individual, GaError> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(point <= n, "cut point {point} beyond board size {n}");

    let mut genes = Vec::new();
    genes.try_reserve_exact(n)?;
    genes.extend_from_slice(&parent1.placement()[..point]);
    genes.extend_from_slice(&parent2.placement()[point..]);
    Ok(Individual::new(genes))
}

// ============================================================================
// Mutation
// ============================================================================

/// Whether an individual mutates this generation (probability 5/1000).
pub fn should_mutate<R: Rng>(rng: &mut R) -> bool {
    rng.random_range(0..1000) < MUTATION_PER_MILLE
}

/// Rewrites one random gene with a random row, both from `0..n-1`.
///
/// The new row may equal the old one, in which case nothing changes.
pub fn mutate<R: Rng>(individual: &mut Individual, rng: &mut R) {
    let max = individual.len() - 1;
    let column = rng.random_range(0..max);
    let row = rng.random_range(0..max);
    mutate_at(individual, column, row);
}

/// Sets `column` to `row` and re-evaluates.
pub fn mutate_at(individual: &mut Individual, column: usize, row: usize) {
    individual.set_gene(column, row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::evaluate;
    use crate::random::create_rng;

    #[test]
    fn test_crossover_at_splits_parents() {
        let a = Individual::new(vec![0, 0, 0, 0, 0, 0]);
        let b = Individual::new(vec![5, 4, 3, 2, 1, 0]);
        let child = crossover_at(&a, &b, 2).unwrap();
        assert_eq!(child.placement(), &[0, 0, 3, 2, 1, 0]);
        assert_eq!(child.fitness(), evaluate(child.placement()));
    }

    #[test]
    fn test_crossover_child_fitness_is_fresh() {
        // two bad parents, one valid child
        let a = Individual::new(vec![1, 3, 3, 3]);
        let b = Individual::new(vec![0, 0, 0, 2]);
        assert!(a.fitness() < 0 && b.fitness() < 0);
        let child = crossover_at(&a, &b, 2).unwrap();
        assert_eq!(child.placement(), &[1, 3, 0, 2]);
        assert_eq!(child.fitness(), 0);
    }

    #[test]
    fn test_crossover_at_edge_cuts_copy_one_parent() {
        let a = Individual::new(vec![1, 3, 0, 2]);
        let b = Individual::new(vec![0, 0, 0, 0]);
        assert_eq!(crossover_at(&a, &b, 0), Ok(b.clone()));
        assert_eq!(crossover_at(&a, &b, 4), Ok(a.clone()));
    }

    #[test]
    fn test_cross_point_range() {
        let mut rng = create_rng(42);
        let mut seen = [false; 8];
        for _ in 0..2000 {
            let p = cross_point(8, &mut rng);
            assert!((1..=6).contains(&p), "cut point {p} out of range");
            seen[p] = true;
        }
        assert!(!seen[0] && !seen[7]);
        assert!(seen[1..=6].iter().all(|&s| s));
    }

    #[test]
    fn test_cross_point_smallest_board() {
        let mut rng = create_rng(7);
        for _ in 0..100 {
            let p = cross_point(4, &mut rng);
            assert!(p == 1 || p == 2);
        }
    }

    #[test]
    #[should_panic(expected = "at least 3 columns")]
    fn test_cross_point_board_too_small() {
        let mut rng = create_rng(0);
        cross_point(2, &mut rng);
    }

    #[test]
    fn test_random_crossover_respects_parents() {
        let mut rng = create_rng(42);
        let a = Individual::random(10, &mut rng).unwrap();
        let b = Individual::random(10, &mut rng).unwrap();
        for _ in 0..100 {
            let child = crossover(&a, &b, &mut rng).unwrap();
            let k = (1..=8)
                .find(|&k| {
                    child.placement()[..k] == a.placement()[..k]
                        && child.placement()[k..] == b.placement()[k..]
                });
            assert!(k.is_some(), "child {child} is not a single-cut splice");
        }
    }

    #[test]
    fn test_mutate_changes_at_most_one_gene() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut ind = Individual::random(8, &mut rng).unwrap();
            let before = ind.placement().to_vec();
            mutate(&mut ind, &mut rng);
            let diffs: Vec<usize> = (0..8)
                .filter(|&i| before[i] != ind.placement()[i])
                .collect();
            assert!(diffs.len() <= 1);
            if let Some(&col) = diffs.first() {
                assert!(col < 7, "mutation touched the last column");
                assert!(ind.placement()[col] < 7, "mutation wrote the last row");
            }
            assert_eq!(ind.fitness(), evaluate(ind.placement()));
        }
    }

    #[test]
    fn test_mutate_at_recomputes_fitness() {
        let mut ind = Individual::new(vec![1, 3, 0, 2]);
        assert_eq!(ind.fitness(), 0);
        mutate_at(&mut ind, 0, 0);
        assert_eq!(ind.placement(), &[0, 3, 0, 2]);
        assert_eq!(ind.fitness(), evaluate(&[0, 3, 0, 2]));
        assert!(ind.fitness() < 0);
    }

    #[test]
    fn test_mutation_rate() {
        let mut rng = create_rng(42);
        let trials = 200_000;
        let hits = (0..trials).filter(|_| should_mutate(&mut rng)).count();
        // expected 1000
        assert!((800..1200).contains(&hits), "got {hits} mutations");
    }
}
