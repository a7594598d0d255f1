//! Violation diagnostics and per-route report rows.

use serde::Serialize;

use super::evaluator::{route_distance, route_times};
use crate::distance::euclidean;
use crate::models::{Client, Vehicle};

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Vehicle position in the solution.
        vehicle_index: usize,
        /// Load carried.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Arrival after a client's due time.
    TimeWindowViolated {
        /// Vehicle position in the solution.
        vehicle_index: usize,
        /// Client reached too late.
        client_id: usize,
        /// Actual arrival.
        arrival: f64,
        /// Client due time.
        due: f64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Lists the violations of one vehicle: capacity, then the first late
/// arrival (the simulation stops there).
pub fn vehicle_violations(index: usize, vehicle: &Vehicle, depot: &Client) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !vehicle.within_capacity() {
        violations.push(Violation::new(ViolationType::CapacityExceeded {
            vehicle_index: index,
            load: vehicle.load(),
            capacity: vehicle.capacity(),
        }));
    }

    let times = route_times(vehicle.route(), depot);
    if !times.feasible {
        let route = vehicle.route();
        let k = times.arrivals.len();
        let late = &route[k];
        let (from, start): (&Client, f64) = match times.last_departure(route) {
            Some(departure) => (route[k - 1].as_ref(), departure),
            None => (depot, 0.0),
        };
        violations.push(Violation::new(ViolationType::TimeWindowViolated {
            vehicle_index: index,
            client_id: late.id(),
            arrival: start + euclidean(from, late.as_ref()),
            due: late.due_time(),
        }));
    }

    violations
}

/// One row of a solution report: a non-empty route with its schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetail {
    /// Vehicle id.
    pub vehicle_id: usize,
    /// Client ids in visit order.
    pub client_ids: Vec<usize>,
    /// Load carried.
    pub load: i32,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Route distance including both depot legs.
    pub distance: f64,
    /// Arrival time per client (truncated at the first late client).
    pub arrival_times: Vec<f64>,
    /// Waiting time per client (truncated like `arrival_times`).
    pub waiting_times: Vec<f64>,
    /// Whether every time window is met.
    pub time_feasible: bool,
}

impl RouteDetail {
    /// Builds the report row for one vehicle.
    pub fn of(vehicle: &Vehicle, depot: &Client) -> Self {
        let times = route_times(vehicle.route(), depot);
        Self {
            vehicle_id: vehicle.id(),
            client_ids: vehicle.client_ids(),
            load: vehicle.load(),
            capacity: vehicle.capacity(),
            distance: route_distance(vehicle.route(), depot),
            arrival_times: times.arrivals,
            waiting_times: times.waiting,
            time_feasible: times.feasible,
        }
    }
}
