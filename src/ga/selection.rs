//! Survival and parent selection.
//!
//! Survival is fitness-biased but probabilistic: an individual with
//! conflict magnitude `m` is replaced with probability
//! `min(m, WORST_FITNESS) / WORST_FITNESS`. Solutions (`m = 0`) always
//! survive. Vacated slots are refilled by crossing two distinct parents
//! drawn uniformly from the occupied slots.

use super::config::WORST_FITNESS;
use super::types::Individual;
use rand::Rng;

/// Whether an individual is replaced given a survival draw from
/// `0..WORST_FITNESS`.
pub fn is_replaced(individual: &Individual, draw: u32) -> bool {
    draw < individual.conflict_magnitude()
}

/// Runs the survival draw over every occupied slot.
///
/// Replaced individuals are dropped on the spot and their slot left
/// empty. Returns the vacated slot indices in ascending order.
pub fn cull<R: Rng>(slots: &mut [Option<Individual>], rng: &mut R) -> Vec<usize> {
    let mut vacant = Vec::new();
    for (idx, slot) in slots.iter_mut().enumerate() {
        let Some(individual) = slot.as_ref() else {
            continue;
        };
        let draw = rng.random_range(0..WORST_FITNESS);
        if is_replaced(individual, draw) {
            *slot = None;
            vacant.push(idx);
        }
    }
    vacant
}

/// Picks two distinct slot indices uniformly from `occupied`.
///
/// Returns `None` when fewer than two slots are occupied.
pub fn pick_parents<R: Rng>(occupied: &[usize], rng: &mut R) -> Option<(usize, usize)> {
    let n = occupied.len();
    if n < 2 {
        return None;
    }
    let a = rng.random_range(0..n);
    // draw from the remaining n - 1 positions and skip over `a`
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    Some((occupied[a], occupied[b]))
}
