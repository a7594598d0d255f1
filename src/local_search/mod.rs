//! Neighborhood operators and hill-climbing local search.
//!
//! Every operator takes a solution by reference and returns an independent
//! solution: the move applied when it is legal, otherwise an unchanged
//! copy. A move is legal when every route it touches stays within capacity
//! and remains time-feasible.
//!
//! - [`swap_move`] — Exchange one client between two routes
//! - [`relocate_move`] — Move one client to a random position in any route
//! - [`two_opt_move`] — Reverse a segment inside one route
//! - [`or_opt_move`] — Move a segment of 1–3 clients inside one route
//! - [`cross_exchange_move`] — Exchange segments of 1–2 clients between two routes
//! - [`local_search`] — Greedy hill climbing over sampled neighbors

mod cross_exchange;
mod hill_climb;
mod or_opt;
mod relocate;
mod swap;
mod two_opt;

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluation::is_time_feasible;
use crate::models::{Client, Solution};

pub use cross_exchange::cross_exchange_move;
pub use hill_climb::local_search;
pub use or_opt::or_opt_move;
pub use relocate::relocate_move;
pub use swap::swap_move;
pub use two_opt::two_opt_move;

/// The neighborhood moves available to the search drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// [`swap_move`]
    Swap,
    /// [`relocate_move`]
    Relocate,
    /// [`two_opt_move`]
    TwoOpt,
    /// [`or_opt_move`]
    OrOpt,
    /// [`cross_exchange_move`]
    CrossExchange,
}

impl Move {
    /// All five moves.
    pub const ALL: [Move; 5] = [
        Move::Swap,
        Move::Relocate,
        Move::TwoOpt,
        Move::OrOpt,
        Move::CrossExchange,
    ];

    /// Applies this move to a copy of `solution`.
    pub fn apply<R: Rng + ?Sized>(self, solution: &Solution, rng: &mut R) -> Solution {
        match self {
            Move::Swap => swap_move(solution, rng),
            Move::Relocate => relocate_move(solution, rng),
            Move::TwoOpt => two_opt_move(solution, rng),
            Move::OrOpt => or_opt_move(solution, rng),
            Move::CrossExchange => cross_exchange_move(solution, rng),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Swap => "swap",
            Move::Relocate => "relocate",
            Move::TwoOpt => "two_opt",
            Move::OrOpt => "or_opt",
            Move::CrossExchange => "cross_exchange",
        }
    }
}

/// Applies one move chosen uniformly from `operators`.
///
/// An empty operator list yields an unchanged copy.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_vrptw::models::{Client, Instance};
/// use u_vrptw::constructive::clarke_wright_savings;
/// use u_vrptw::local_search::{generate_neighbor, Move};
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 1.0, 0.0, 10),
///     Client::new(2, 0.0, 2.0, 10),
///     Client::new(3, -3.0, 0.0, 10),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 20).unwrap();
/// let start = clarke_wright_savings(&instance);
/// let mut rng = StdRng::seed_from_u64(3);
///
/// let neighbor = generate_neighbor(&start, &Move::ALL, &mut rng);
/// assert_eq!(neighbor.num_served(), 3);
/// assert!(neighbor.is_feasible());
/// ```
pub fn generate_neighbor<R: Rng + ?Sized>(
    solution: &Solution,
    operators: &[Move],
    rng: &mut R,
) -> Solution {
    match operators.choose(rng) {
        Some(op) => op.apply(solution, rng),
        None => solution.clone(),
    }
}

/// Positions (in the solution's vehicle list) of vehicles with more than
/// `min_len` clients.
fn vehicles_longer_than(solution: &Solution, min_len: usize) -> Vec<usize> {
    solution
        .vehicles()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.len() > min_len)
        .map(|(i, _)| i)
        .collect()
}

/// Two distinct entries of `candidates`, uniformly.
fn pick_two<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> (usize, usize) {
    let n = candidates.len();
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (candidates[a], candidates[b])
}

fn route_load(route: &[Arc<Client>]) -> i32 {
    route.iter().map(|c| c.demand()).sum()
}

/// Whether a candidate route respects `capacity` and every time window.
fn route_fits(route: &[Arc<Client>], capacity: i32, depot: &Client) -> bool {
    route_load(route) <= capacity && is_time_feasible(route, depot)
}

/// Copies `solution` with the given vehicle routes replaced and the cost
/// refreshed.
fn with_routes(solution: &Solution, changes: Vec<(usize, Vec<Arc<Client>>)>) -> Solution {
    let mut next = solution.clone();
    for (index, route) in changes {
        next.vehicles_mut()[index].set_route(route);
    }
    next.refresh_cost();
    next
}
