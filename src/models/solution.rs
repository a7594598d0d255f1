//! Solution: a fleet of routed vehicles with its cached cost.

use std::fmt;
use std::sync::Arc;

use super::{Client, Vehicle};
use crate::evaluation::{
    is_vehicle_feasible, route_times, solution_cost, vehicle_violations, RouteDetail, RouteTimes,
    Violation,
};

/// A complete solution: vehicles, the shared depot, and the total distance.
///
/// A `Solution` is a value. Cloning copies every route (clients are shared
/// read-only through `Arc`), so a clone can be mutated without affecting
/// any other solution. The cached cost is refreshed by every crate-internal
/// mutator before the solution is handed back.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_vrptw::models::{Client, Solution, Vehicle};
///
/// let depot = Arc::new(Client::depot(0, 0.0, 0.0));
/// let mut v = Vehicle::new(0, 100);
/// v.add_client(Arc::new(Client::new(1, 3.0, 4.0, 10)));
/// v.add_client(Arc::new(Client::new(2, 6.0, 8.0, 15)));
///
/// let sol = Solution::new(vec![v], depot);
/// assert!((sol.cost() - 20.0).abs() < 1e-10);
/// assert!(sol.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    vehicles: Vec<Vehicle>,
    depot: Arc<Client>,
    cost: f64,
}

impl Solution {
    /// Wraps vehicles into a solution and computes its cost.
    pub fn new(vehicles: Vec<Vehicle>, depot: Arc<Client>) -> Self {
        let cost = solution_cost(&vehicles, &depot);
        Self {
            vehicles,
            depot,
            cost,
        }
    }

    /// Cached total distance.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Recomputes the total distance from coordinates without touching the
    /// cache.
    pub fn recompute_cost(&self) -> f64 {
        solution_cost(&self.vehicles, &self.depot)
    }

    /// Recomputes and stores the cost. Returns the new value.
    pub(crate) fn refresh_cost(&mut self) -> f64 {
        self.cost = self.recompute_cost();
        self.cost
    }

    pub(crate) fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    /// The fleet, idle vehicles included.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Depot every route starts and ends at.
    pub fn depot(&self) -> &Arc<Client> {
        &self.depot
    }

    /// Number of vehicles (including idle ones).
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of vehicles with at least one client.
    pub fn num_vehicles_used(&self) -> usize {
        self.vehicles.iter().filter(|v| !v.is_empty()).count()
    }

    /// Number of clients served across all vehicles.
    pub fn num_served(&self) -> usize {
        self.vehicles.iter().map(|v| v.len()).sum()
    }

    /// Per-vehicle client id sequences.
    pub fn client_ids(&self) -> Vec<Vec<usize>> {
        self.vehicles.iter().map(|v| v.client_ids()).collect()
    }

    /// Capacity and time-window feasibility of every vehicle.
    pub fn is_feasible(&self) -> bool {
        self.vehicles
            .iter()
            .all(|v| is_vehicle_feasible(v, &self.depot))
    }

    /// Arrival/waiting breakdown of the vehicle at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn route_times(&self, index: usize) -> RouteTimes {
        route_times(self.vehicles[index].route(), &self.depot)
    }

    /// Report rows for every non-empty route.
    pub fn route_details(&self) -> Vec<RouteDetail> {
        self.vehicles
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| RouteDetail::of(v, &self.depot))
            .collect()
    }

    /// All constraint violations; empty iff [`is_feasible`](Self::is_feasible).
    pub fn violations(&self) -> Vec<Violation> {
        self.vehicles
            .iter()
            .enumerate()
            .flat_map(|(i, v)| vehicle_violations(i, v, &self.depot))
            .collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "cost {:.2}, vehicles used {}/{}, feasible {}",
            self.cost,
            self.num_vehicles_used(),
            self.num_vehicles(),
            self.is_feasible()
        )?;
        for detail in self.route_details() {
            let ids: Vec<String> = detail.client_ids.iter().map(|id| id.to_string()).collect();
            writeln!(
                f,
                "  vehicle {:>3} [{}/{}] {:.2}{}: {}",
                detail.vehicle_id,
                detail.load,
                detail.capacity,
                detail.distance,
                if detail.time_feasible { "" } else { " (late)" },
                ids.join(" -> ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn depot() -> Arc<Client> {
        Arc::new(Client::depot(0, 0.0, 0.0))
    }

    fn scenario() -> Solution {
        let mut v = Vehicle::new(0, 100);
        v.add_client(Arc::new(Client::new(1, 3.0, 4.0, 10)));
        v.add_client(Arc::new(Client::new(2, 6.0, 8.0, 15)));
        Solution::new(vec![v, Vehicle::new(1, 100)], depot())
    }

    #[test]
    fn test_scenario_cost() {
        let sol = scenario();
        assert!((sol.cost() - 20.0).abs() < 1e-10);
        assert!((sol.recompute_cost() - sol.cost()).abs() < 1e-10);
    }

    #[test]
    fn test_counts() {
        let sol = scenario();
        assert_eq!(sol.num_vehicles(), 2);
        assert_eq!(sol.num_vehicles_used(), 1);
        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.client_ids(), vec![vec![1, 2], vec![]]);
    }

    #[test]
    fn test_capacity_makes_infeasible() {
        let mut sol = scenario();
        sol.vehicles_mut()[0].set_route(vec![
            Arc::new(Client::new(1, 3.0, 4.0, 80)),
            Arc::new(Client::new(2, 6.0, 8.0, 80)),
        ]);
        assert!(!sol.is_feasible());
        assert_eq!(sol.violations().len(), 1);
    }

    #[test]
    fn test_time_window_makes_infeasible() {
        let mut v = Vehicle::new(0, 100);
        v.add_client(Arc::new(
            Client::new(1, 30.0, 40.0, 10).with_time_window(TimeWindow::new(0.0, 10.0).expect("valid")),
        ));
        let sol = Solution::new(vec![v], depot());
        assert!(!sol.is_feasible());
        assert!(!sol.route_times(0).feasible);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = scenario();
        let mut copy = original.clone();
        copy.vehicles_mut()[0].remove_at(0);
        copy.refresh_cost();
        assert_eq!(original.num_served(), 2);
        assert!((original.cost() - 20.0).abs() < 1e-10);
        assert_eq!(copy.num_served(), 1);
        assert!((copy.cost() - 20.0).abs() < 1e-10); // 0 -> (6,8) -> 0
    }

    #[test]
    fn test_route_details_skip_empty() {
        let details = scenario().route_details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].client_ids, vec![1, 2]);
    }

    #[test]
    fn test_display() {
        let text = scenario().to_string();
        assert!(text.starts_with("cost 20.00, vehicles used 1/2, feasible true"));
        assert!(text.contains("1 -> 2"));
    }
}
