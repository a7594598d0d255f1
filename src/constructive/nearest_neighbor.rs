//! Time-window-aware nearest-neighbor heuristic.
//!
//! # Algorithm
//!
//! Extends one vehicle at a time. From the vehicle's current position and
//! time (the depot at its ready time for an empty route, otherwise the
//! departure from the last client), the nearest unassigned client that fits
//! the remaining capacity and can be reached by its due time is appended.
//! When no client qualifies, the next vehicle takes over; a new vehicle is
//! spawned once the fleet is exhausted.
//!
//! A client that cannot be reached on time even from the depot would stall
//! the loop, so an empty vehicle that finds no candidate takes the nearest
//! remaining client anyway and the resulting route is left infeasible.
//!
//! # Complexity
//!
//! O(n²) where n = number of clients.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::distance::euclidean;
use crate::evaluation::route_times;
use crate::models::{Client, Instance, Solution, Vehicle};

/// Constructs a CVRPTW solution with the time-window-aware nearest neighbor.
///
/// `num_vehicles` is the initial fleet size; the fleet grows as needed, so
/// every client is always placed.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Client, Instance, TimeWindow};
/// use u_vrptw::constructive::nearest_neighbor_tw;
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 1.0, 0.0, 10)
///         .with_time_window(TimeWindow::new(0.0, 10.0).unwrap())
///         .with_service_time(2.0),
///     Client::new(2, 2.0, 0.0, 10)
///         .with_time_window(TimeWindow::new(0.0, 20.0).unwrap())
///         .with_service_time(2.0),
///     Client::new(3, 3.0, 0.0, 10)
///         .with_time_window(TimeWindow::new(0.0, 30.0).unwrap())
///         .with_service_time(2.0),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 30).unwrap();
///
/// let solution = nearest_neighbor_tw(&instance, 1);
/// assert_eq!(solution.client_ids(), vec![vec![1, 2, 3]]);
/// assert!(solution.is_feasible());
/// ```
pub fn nearest_neighbor_tw(instance: &Instance, num_vehicles: usize) -> Solution {
    let capacity = instance.capacity();
    let depot = instance.depot();
    let mut vehicles: Vec<Vehicle> = (0..num_vehicles.max(1))
        .map(|i| Vehicle::new(i, capacity))
        .collect();
    let mut unassigned: Vec<Arc<Client>> = instance.clients().to_vec();
    let mut current = 0;

    while !unassigned.is_empty() {
        let vehicle = &vehicles[current];
        // Routes leave the depot at time 0, matching `route_times`.
        let (position, time): (&Client, f64) = match vehicle.route().last() {
            None => (depot.as_ref(), 0.0),
            Some(last) => {
                let departure = route_times(vehicle.route(), depot)
                    .last_departure(vehicle.route())
                    .unwrap_or(0.0);
                (last.as_ref(), departure)
            }
        };

        let mut best: Option<(usize, f64)> = None;
        for (k, client) in unassigned.iter().enumerate() {
            if !vehicle.can_fit(client.demand()) {
                continue;
            }
            let travel = euclidean(position, client.as_ref());
            if time + travel > client.due_time() {
                continue;
            }
            if best.map_or(true, |(_, d)| travel < d) {
                best = Some((k, travel));
            }
        }

        if best.is_none() && vehicle.is_empty() {
            best = nearest(depot, &unassigned);
            if let Some((k, _)) = best {
                warn!(
                    client = unassigned[k].id(),
                    vehicle = vehicle.id(),
                    "client unreachable within its time window; placed on its own route"
                );
            }
        }

        match best {
            Some((k, _)) => {
                let client = unassigned.remove(k);
                vehicles[current].add_client(client);
            }
            None => {
                current += 1;
                if current >= vehicles.len() {
                    vehicles.push(Vehicle::new(vehicles.len(), capacity));
                }
            }
        }
    }

    let solution = Solution::new(vehicles, depot.clone());
    debug!(
        vehicles = solution.num_vehicles(),
        used = solution.num_vehicles_used(),
        cost = solution.cost(),
        "nearest-neighbor construction done"
    );
    solution
}

/// Index and distance of the client nearest to `from`.
fn nearest(from: &Client, candidates: &[Arc<Client>]) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .map(|(k, c)| (k, euclidean(from, c.as_ref())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
