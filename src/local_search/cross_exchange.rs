//! Inter-route cross-exchange move.
//!
//! # Algorithm
//!
//! Picks two distinct non-empty routes, a segment of 1 or 2 consecutive
//! clients in each, and swaps the segments (each keeps its order). Kept only
//! when both routes stay within capacity and remain time-feasible.
//!
//! # Complexity
//!
//! O(n) per move.
//!
//! # Reference
//!
//! Taillard, É., Badeau, P., Gendreau, M., Guertin, F. & Potvin, J.-Y.
//! (1997). "A Tabu Search Heuristic for the Vehicle Routing Problem with
//! Soft Time Windows", *Transportation Science* 31(2), 170-186.

use std::sync::Arc;

use rand::Rng;

use super::{pick_two, route_fits, vehicles_longer_than, with_routes};
use crate::models::{Client, Solution};

/// Longest segment taken from each route.
const MAX_SEGMENT: usize = 2;

/// Exchanges short segments between two random non-empty routes.
pub fn cross_exchange_move<R: Rng + ?Sized>(solution: &Solution, rng: &mut R) -> Solution {
    let candidates = vehicles_longer_than(solution, 0);
    if candidates.len() < 2 {
        return solution.clone();
    }
    let (a, b) = pick_two(&candidates, rng);
    let va = &solution.vehicles()[a];
    let vb = &solution.vehicles()[b];

    let mut route_a = va.route().to_vec();
    let mut route_b = vb.route().to_vec();
    let (start_a, len_a) = random_segment(route_a.len(), rng);
    let (start_b, len_b) = random_segment(route_b.len(), rng);

    let seg_a: Vec<Arc<Client>> = route_a
        .splice(start_a..start_a + len_a, route_b[start_b..start_b + len_b].iter().cloned())
        .collect();
    route_b.splice(start_b..start_b + len_b, seg_a);

    let depot = solution.depot();
    if !route_fits(&route_a, va.capacity(), depot) || !route_fits(&route_b, vb.capacity(), depot) {
        return solution.clone();
    }
    with_routes(solution, vec![(a, route_a), (b, route_b)])
}

/// Start and length of a random segment in a route of `len` clients.
fn random_segment<R: Rng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    let length = rng.random_range(1..=MAX_SEGMENT.min(len));
    let start = rng.random_range(0..=len - length);
    (start, length)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{solution, sorted_ids, timed};
    use super::*;
    use crate::models::Vehicle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cross_exchange_needs_two_routes() {
        let sol = solution(&[&[(1.0, 0.0, 1), (2.0, 0.0, 1)], &[]], 10);
        let next = cross_exchange_move(&sol, &mut StdRng::seed_from_u64(0));
        assert_eq!(next.client_ids(), sol.client_ids());
    }

    #[test]
    fn test_cross_exchange_singletons() {
        let sol = solution(&[&[(1.0, 0.0, 1)], &[(0.0, 1.0, 1)]], 10);
        let next = cross_exchange_move(&sol, &mut StdRng::seed_from_u64(3));
        assert_eq!(next.client_ids(), vec![vec![2], vec![1]]);
    }

    #[test]
    fn test_cross_exchange_respects_capacity() {
        let sol = solution(
            &[
                &[(1.0, 0.0, 1), (2.0, 0.0, 1), (3.0, 0.0, 1)],
                &[(0.0, 1.0, 6), (0.0, 2.0, 6)],
            ],
            12,
        );
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let next = cross_exchange_move(&sol, &mut rng);
            assert_eq!(sorted_ids(&next), vec![1, 2, 3, 4, 5]);
            assert!(next.vehicles().iter().all(|v| v.within_capacity()));
            assert_eq!(next.vehicles().iter().map(|v| v.load()).sum::<i32>(), 15);
        }
    }

    #[test]
    fn test_cross_exchange_respects_time_windows() {
        let depot = Arc::new(Client::depot(0, 0.0, 0.0));
        let mut v0 = Vehicle::new(0, 10);
        v0.add_client(timed(1, 1.0, 0.0, 1.0));
        v0.add_client(timed(2, 2.0, 0.0, 1000.0));
        let mut v1 = Vehicle::new(1, 10);
        v1.add_client(timed(3, 30.0, 0.0, 1000.0));
        let sol = Solution::new(vec![v0, v1], depot);

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let next = cross_exchange_move(&sol, &mut rng);
            assert!(next.is_feasible());
        }
    }
}
