//! Greedy hill climbing over sampled neighbors.
//!
//! # Algorithm
//!
//! Each round draws [`SAMPLES_PER_ROUND`] neighbors of the current solution
//! and moves to the cheapest one if it is strictly cheaper. The first round
//! without an improving sample ends the search, as does the round limit.
//!
//! # Complexity
//!
//! O(max_iterations × 10 × n) where n = number of clients.

use rand::Rng;
use tracing::debug;

use super::{generate_neighbor, Move};
use crate::models::Solution;

/// Neighbors drawn per round.
pub const SAMPLES_PER_ROUND: usize = 10;

/// Improves `solution` by sampled hill climbing.
///
/// The result never costs more than the input.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_vrptw::models::{Client, Instance};
/// use u_vrptw::constructive::random_solution;
/// use u_vrptw::local_search::{local_search, Move};
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 1.0, 0.0, 1),
///     Client::new(2, 2.0, 0.0, 1),
///     Client::new(3, 3.0, 0.0, 1),
///     Client::new(4, 4.0, 0.0, 1),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 10).unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
/// let start = random_solution(&instance, 1, &mut rng);
///
/// let improved = local_search(&start, 100, &Move::ALL, &mut rng);
/// assert!(improved.cost() <= start.cost());
/// ```
pub fn local_search<R: Rng + ?Sized>(
    solution: &Solution,
    max_iterations: usize,
    operators: &[Move],
    rng: &mut R,
) -> Solution {
    let mut current = solution.clone();
    let mut rounds = 0;

    while rounds < max_iterations {
        rounds += 1;
        let mut best: Option<Solution> = None;
        for _ in 0..SAMPLES_PER_ROUND {
            let neighbor = generate_neighbor(&current, operators, rng);
            let threshold = best.as_ref().map_or(current.cost(), |b| b.cost());
            if neighbor.cost() < threshold {
                best = Some(neighbor);
            }
        }
        match best {
            Some(next) => current = next,
            None => break,
        }
    }

    debug!(
        rounds,
        start_cost = solution.cost(),
        cost = current.cost(),
        "local search done"
    );
    current
}
