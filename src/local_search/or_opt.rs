//! Intra-route Or-opt move.
//!
//! # Algorithm
//!
//! Picks a route with more than two clients, cuts out a segment of 1, 2 or
//! 3 consecutive clients (never the whole route) and reinserts it, order
//! preserved, at a random position of the remaining route. The result must
//! stay time-feasible; the load is unchanged.
//!
//! # Complexity
//!
//! O(n) per move.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use rand::Rng;

use super::{vehicles_longer_than, with_routes};
use crate::evaluation::is_time_feasible;
use crate::models::Solution;

/// Longest segment the move relocates.
const MAX_SEGMENT: usize = 3;

/// Relocates a short segment within a random route.
pub fn or_opt_move<R: Rng + ?Sized>(solution: &Solution, rng: &mut R) -> Solution {
    let candidates = vehicles_longer_than(solution, 2);
    if candidates.is_empty() {
        return solution.clone();
    }
    let index = candidates[rng.random_range(0..candidates.len())];
    let mut remaining = solution.vehicles()[index].route().to_vec();
    let n = remaining.len();

    let length = rng.random_range(1..=MAX_SEGMENT.min(n - 1));
    let start = rng.random_range(0..=n - length);
    let segment: Vec<_> = remaining.drain(start..start + length).collect();
    let pos = rng.random_range(0..=remaining.len());
    remaining.splice(pos..pos, segment);

    if !is_time_feasible(&remaining, solution.depot()) {
        return solution.clone();
    }
    with_routes(solution, vec![(index, remaining)])
}
