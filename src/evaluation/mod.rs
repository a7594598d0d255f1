//! Route timing, cost and feasibility evaluation.
//!
//! Everything here is a pure function of the route and the depot: costs are
//! recomputed from coordinates, never read from a cache.

mod evaluator;
mod report;

pub use evaluator::{
    is_time_feasible, is_vehicle_feasible, route_distance, route_times, solution_cost, RouteTimes,
};
pub use report::{vehicle_violations, RouteDetail, Violation, ViolationType};
