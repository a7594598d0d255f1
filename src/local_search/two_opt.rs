//! Intra-route 2-opt move.
//!
//! # Algorithm
//!
//! Picks a route with more than three clients and two positions `i < j`,
//! then reverses the segment `[i..=j]`:
//!
//! ```text
//! before: ... a  r[i] ... r[j]  b ...
//! after:  ... a  r[j] ... r[i]  b ...
//! ```
//!
//! The load is unchanged, so only time feasibility is checked.
//!
//! # Complexity
//!
//! O(n) per move.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use super::{vehicles_longer_than, with_routes};
use crate::evaluation::is_time_feasible;
use crate::models::Solution;

/// Reverses a random segment of a random route with more than three clients.
///
/// Returns an unchanged copy when no route is long enough or the reversed
/// route would miss a time window.
pub fn two_opt_move<R: Rng + ?Sized>(solution: &Solution, rng: &mut R) -> Solution {
    let candidates = vehicles_longer_than(solution, 3);
    if candidates.is_empty() {
        return solution.clone();
    }
    let index = candidates[rng.random_range(0..candidates.len())];
    let mut route = solution.vehicles()[index].route().to_vec();
    let n = route.len();
    let i = rng.random_range(0..n - 1);
    let j = rng.random_range(i + 1..n);
    route[i..=j].reverse();

    if !is_time_feasible(&route, solution.depot()) {
        return solution.clone();
    }
    with_routes(solution, vec![(index, route)])
}
