//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each client
//! on its own route (depot → client → depot). It then merges routes by
//! computing the "savings" of joining two clients directly:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Pairs are processed in decreasing order of savings (stable, so equal
//! savings keep enumeration order). A merge happens only when the two
//! clients sit on different routes, both are endpoints of their routes, and
//! the combined load fits one vehicle. The routes are spliced in whichever
//! orientation makes the two clients adjacent.
//!
//! Routes live in an arena indexed by route id; `route_of[k]` tags each
//! client with the route currently holding it, and a merge re-tags every
//! member of the absorbed route.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of clients (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::sync::Arc;

use tracing::debug;

use crate::distance::euclidean;
use crate::models::{Client, Instance, Solution, Vehicle};

/// A savings value for joining two clients (indices into the client list).
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Constructs a solution using the Clarke-Wright savings algorithm.
///
/// The fleet size is not fixed in advance: one vehicle is created per
/// surviving route. Time windows are not considered during merging.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Client, Instance};
/// use u_vrptw::constructive::clarke_wright_savings;
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 1.0, 0.0, 10),
///     Client::new(2, 2.0, 0.0, 10),
///     Client::new(3, 3.0, 0.0, 10),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 30).unwrap();
///
/// let solution = clarke_wright_savings(&instance);
/// assert_eq!(solution.num_vehicles(), 1);
/// assert!((solution.cost() - 6.0).abs() < 1e-10);
/// ```
pub fn clarke_wright_savings(instance: &Instance) -> Solution {
    let clients = instance.clients();
    let depot = instance.depot();
    let n = clients.len();

    let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let value = euclidean(depot.as_ref(), clients[i].as_ref())
                + euclidean(depot.as_ref(), clients[j].as_ref())
                - euclidean(clients[i].as_ref(), clients[j].as_ref());
            savings.push(Saving { i, j, value });
        }
    }
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut route_of: Vec<usize> = (0..n).collect();
    let mut routes: Vec<Vec<usize>> = (0..n).map(|k| vec![k]).collect();
    let mut route_load: Vec<i32> = clients.iter().map(|c| c.demand()).collect();

    let mut merges = 0;
    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }

        let i_head = routes[ri].first() == Some(&saving.i);
        let i_tail = routes[ri].last() == Some(&saving.i);
        let j_head = routes[rj].first() == Some(&saving.j);
        let j_tail = routes[rj].last() == Some(&saving.j);
        if !(i_head || i_tail) || !(j_head || j_tail) {
            continue;
        }

        let combined = route_load[ri] + route_load[rj];
        if combined > instance.capacity() {
            continue;
        }

        let mut left = std::mem::take(&mut routes[ri]);
        let mut right = std::mem::take(&mut routes[rj]);
        let merged = if i_tail && j_head {
            left.append(&mut right);
            left
        } else if i_head && j_tail {
            right.append(&mut left);
            right
        } else if i_tail && j_tail {
            right.reverse();
            left.append(&mut right);
            left
        } else {
            left.reverse();
            left.append(&mut right);
            left
        };

        for &member in &merged {
            route_of[member] = ri;
        }
        routes[ri] = merged;
        route_load[ri] = combined;
        route_load[rj] = 0;
        merges += 1;
    }

    let vehicles = collect_routes(clients, &route_of, &routes, instance.capacity());
    let solution = Solution::new(vehicles, depot.clone());
    debug!(
        merges,
        vehicles = solution.num_vehicles(),
        cost = solution.cost(),
        "clarke-wright construction done"
    );
    solution
}

/// Wraps each surviving route in a vehicle, in order of first appearance
/// when scanning clients in input order.
fn collect_routes(
    clients: &[Arc<Client>],
    route_of: &[usize],
    routes: &[Vec<usize>],
    capacity: i32,
) -> Vec<Vehicle> {
    let mut emitted = vec![false; routes.len()];
    let mut vehicles = Vec::new();
    for &r in route_of {
        if emitted[r] {
            continue;
        }
        emitted[r] = true;
        let mut vehicle = Vehicle::new(vehicles.len(), capacity);
        vehicle.set_route(routes[r].iter().map(|&k| clients[k].clone()).collect());
        vehicles.push(vehicle);
    }
    vehicles
}
