//! Construction heuristics for building initial CVRPTW solutions.
//!
//! - [`random_solution`] — Shuffled round-robin assignment, capacity only, O(n·m)
//! - [`nearest_neighbor_tw`] — Time-window-aware nearest-neighbor (Solomon, 1987), O(n²)
//! - [`clarke_wright_savings`] — Clarke-Wright savings algorithm (1964), O(n² log n)

mod clarke_wright;
mod nearest_neighbor;
mod random;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Instance, Solution};

pub use clarke_wright::clarke_wright_savings;
pub use nearest_neighbor::nearest_neighbor_tw;
pub use random::random_solution;

/// Selects the heuristic that builds the starting solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMethod {
    /// [`random_solution`]
    Random,
    /// [`nearest_neighbor_tw`]
    NearestNeighbor,
    /// [`clarke_wright_savings`]
    #[default]
    ClarkeWright,
}

impl ConstructionMethod {
    /// Runs the selected heuristic.
    ///
    /// `num_vehicles` is the starting fleet for the random and
    /// nearest-neighbor heuristics; Clarke-Wright sizes its own fleet.
    pub fn build<R: Rng + ?Sized>(
        self,
        instance: &Instance,
        num_vehicles: usize,
        rng: &mut R,
    ) -> Solution {
        match self {
            Self::Random => random_solution(instance, num_vehicles, rng),
            Self::NearestNeighbor => nearest_neighbor_tw(instance, num_vehicles),
            Self::ClarkeWright => clarke_wright_savings(instance),
        }
    }

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::NearestNeighbor => "nearest_neighbor",
            Self::ClarkeWright => "clarke_wright",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        let depot = Client::depot(0, 0.0, 0.0);
        let clients = (1..=6)
            .map(|i| Client::new(i, i as f64, (i % 3) as f64, 10))
            .collect();
        Instance::new(depot, clients, 30).expect("valid")
    }

    #[test]
    fn test_every_method_places_all_clients() {
        let inst = instance();
        for method in [
            ConstructionMethod::Random,
            ConstructionMethod::NearestNeighbor,
            ConstructionMethod::ClarkeWright,
        ] {
            let mut rng = StdRng::seed_from_u64(5);
            let sol = method.build(&inst, 2, &mut rng);
            let mut ids: Vec<usize> = sol.client_ids().into_iter().flatten().collect();
            ids.sort_unstable();
            assert_eq!(ids, (1..=6).collect::<Vec<_>>(), "{}", method.name());
            assert!(sol.vehicles().iter().all(|v| v.within_capacity()));
            assert!((sol.cost() - sol.recompute_cost()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_default_is_clarke_wright() {
        assert_eq!(ConstructionMethod::default(), ConstructionMethod::ClarkeWright);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ConstructionMethod::NearestNeighbor).expect("valid");
        assert_eq!(json, "\"nearest_neighbor\"");
        let parsed: ConstructionMethod = serde_json::from_str("\"random\"").expect("valid");
        assert_eq!(parsed, ConstructionMethod::Random);
    }
}
