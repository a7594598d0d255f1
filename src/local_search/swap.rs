//! Inter-route client swap.
//!
//! # Algorithm
//!
//! Picks two distinct non-empty routes and one random position in each,
//! then exchanges the two clients. The move is kept only when both routes
//! stay within capacity and remain time-feasible.
//!
//! # Complexity
//!
//! O(n) per move (one time simulation per touched route).

use rand::Rng;

use super::{pick_two, route_fits, vehicles_longer_than, with_routes};
use crate::models::Solution;

/// Swaps one client between two random non-empty routes.
///
/// Returns an unchanged copy when fewer than two routes are non-empty or
/// the swap would break capacity or a time window.
pub fn swap_move<R: Rng + ?Sized>(solution: &Solution, rng: &mut R) -> Solution {
    let candidates = vehicles_longer_than(solution, 0);
    if candidates.len() < 2 {
        return solution.clone();
    }
    let (a, b) = pick_two(&candidates, rng);
    let va = &solution.vehicles()[a];
    let vb = &solution.vehicles()[b];
    let ia = rng.random_range(0..va.len());
    let ib = rng.random_range(0..vb.len());

    let mut route_a = va.route().to_vec();
    let mut route_b = vb.route().to_vec();
    std::mem::swap(&mut route_a[ia], &mut route_b[ib]);

    let depot = solution.depot();
    if !route_fits(&route_a, va.capacity(), depot) || !route_fits(&route_b, vb.capacity(), depot) {
        return solution.clone();
    }
    with_routes(solution, vec![(a, route_a), (b, route_b)])
}
