//! Client relocation.
//!
//! # Algorithm
//!
//! Removes a random client from a random non-empty route and inserts it at
//! a random position of a random route (possibly the same one, which
//! reorders that route). The move is kept only when the destination stays
//! within capacity and both touched routes remain time-feasible.
//!
//! # Complexity
//!
//! O(n) per move.

use rand::Rng;

use super::{route_fits, vehicles_longer_than, with_routes};
use crate::models::Solution;

/// Moves one client to a random position in a random route.
///
/// Returns an unchanged copy when every route is empty or the relocation
/// would break capacity or a time window.
pub fn relocate_move<R: Rng + ?Sized>(solution: &Solution, rng: &mut R) -> Solution {
    let sources = vehicles_longer_than(solution, 0);
    if sources.is_empty() {
        return solution.clone();
    }
    let from = sources[rng.random_range(0..sources.len())];
    let to = rng.random_range(0..solution.num_vehicles());
    let depot = solution.depot();

    let source = &solution.vehicles()[from];
    let mut from_route = source.route().to_vec();
    let client = from_route.remove(rng.random_range(0..from_route.len()));

    if from == to {
        let pos = rng.random_range(0..=from_route.len());
        from_route.insert(pos, client);
        if !route_fits(&from_route, source.capacity(), depot) {
            return solution.clone();
        }
        return with_routes(solution, vec![(from, from_route)]);
    }

    let target = &solution.vehicles()[to];
    if !target.can_fit(client.demand()) {
        return solution.clone();
    }
    let mut to_route = target.route().to_vec();
    let pos = rng.random_range(0..=to_route.len());
    to_route.insert(pos, client);

    if !route_fits(&from_route, source.capacity(), depot)
        || !route_fits(&to_route, target.capacity(), depot)
    {
        return solution.clone();
    }
    with_routes(solution, vec![(from, from_route), (to, to_route)])
}
