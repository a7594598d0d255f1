//! Route timing simulation, distance and cost.

use std::sync::Arc;

use crate::distance::euclidean;
use crate::models::{Client, Vehicle};

/// Result of simulating a route in visit order.
///
/// `arrivals[k]` and `waiting[k]` belong to the k-th client of the route.
/// When the route is infeasible the vectors stop at the last client reached
/// on time; the late client itself is not recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTimes {
    /// Arrival time at each client.
    pub arrivals: Vec<f64>,
    /// Time spent waiting for each client's window to open.
    pub waiting: Vec<f64>,
    /// Whether every client was reached by its due time.
    pub feasible: bool,
}

impl RouteTimes {
    /// Departure time from the last simulated client, if any.
    pub fn last_departure(&self, route: &[Arc<Client>]) -> Option<f64> {
        let k = self.arrivals.len().checked_sub(1)?;
        Some(self.arrivals[k] + self.waiting[k] + route[k].service_time())
    }
}

/// Simulates a route starting at the depot at time 0.
///
/// For each client: `arrival = time + travel`; if `arrival > due` the
/// simulation stops and reports infeasible. Otherwise the vehicle waits
/// until `ready`, serves, and moves on.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_vrptw::models::{Client, TimeWindow};
/// use u_vrptw::evaluation::route_times;
///
/// let depot = Client::depot(0, 0.0, 0.0);
/// let route = vec![Arc::new(
///     Client::new(1, 3.0, 4.0, 10)
///         .with_time_window(TimeWindow::new(20.0, 100.0).unwrap())
///         .with_service_time(5.0),
/// )];
/// let times = route_times(&route, &depot);
/// assert!(times.feasible);
/// assert_eq!(times.arrivals, vec![5.0]);
/// assert_eq!(times.waiting, vec![15.0]);
/// ```
pub fn route_times(route: &[Arc<Client>], depot: &Client) -> RouteTimes {
    let mut arrivals = Vec::with_capacity(route.len());
    let mut waiting = Vec::with_capacity(route.len());
    let mut time = 0.0;
    let mut current: &Client = depot;

    for client in route {
        let Some(stop) = visit(time, current, client) else {
            return RouteTimes {
                arrivals,
                waiting,
                feasible: false,
            };
        };
        arrivals.push(stop.arrival);
        waiting.push(stop.waiting);
        time = stop.departure;
        current = client.as_ref();
    }

    RouteTimes {
        arrivals,
        waiting,
        feasible: true,
    }
}

/// Same check as [`route_times`] without recording the schedule.
pub fn is_time_feasible(route: &[Arc<Client>], depot: &Client) -> bool {
    let mut time = 0.0;
    let mut current: &Client = depot;
    for client in route {
        match visit(time, current, client) {
            Some(v) => time = v.departure,
            None => return false,
        }
        current = client.as_ref();
    }
    true
}

/// One simulated stop.
struct Visit {
    arrival: f64,
    waiting: f64,
    departure: f64,
}

/// Travels from `from` (left at `time`) to `client`; `None` when the
/// vehicle arrives after the due time.
fn visit(time: f64, from: &Client, client: &Client) -> Option<Visit> {
    let arrival = time + euclidean(from, client);
    let tw = client.time_window();
    if tw.is_violated(arrival) {
        return None;
    }
    let waiting = tw.waiting_time(arrival);
    Some(Visit {
        arrival,
        waiting,
        departure: arrival + waiting + client.service_time(),
    })
}

/// Computes `depot → route[0] → ... → route[n-1] → depot`; zero when empty.
pub fn route_distance(route: &[Arc<Client>], depot: &Client) -> f64 {
    let (first, last) = match (route.first(), route.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    let inner: f64 = route
        .windows(2)
        .map(|w| euclidean(w[0].as_ref(), w[1].as_ref()))
        .sum();
    euclidean(depot, first.as_ref()) + inner + euclidean(last.as_ref(), depot)
}

/// Total distance over all vehicles.
pub fn solution_cost(vehicles: &[Vehicle], depot: &Client) -> f64 {
    vehicles
        .iter()
        .map(|v| route_distance(v.route(), depot))
        .sum()
}

/// Capacity and time feasibility of a single vehicle.
pub fn is_vehicle_feasible(vehicle: &Vehicle, depot: &Client) -> bool {
    vehicle.within_capacity() && is_time_feasible(vehicle.route(), depot)
}
