//! Random round-robin construction.
//!
//! # Algorithm
//!
//! Shuffles the clients, then hands them out to the fleet with a rotating
//! pointer. A vehicle that cannot take the client passes it on to the next
//! one; when a full pass over the fleet finds no room, a fresh vehicle is
//! appended and takes the client. Time windows are ignored.
//!
//! # Complexity
//!
//! O(n × m) where n = clients, m = vehicles.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::{Instance, Solution, Vehicle};

/// Builds a capacity-feasible solution by random round-robin assignment.
///
/// Every client is placed exactly once. The fleet starts with
/// `num_vehicles` vehicles and grows when capacity runs out.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_vrptw::models::{Client, Instance};
/// use u_vrptw::constructive::random_solution;
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 1.0, 0.0, 10),
///     Client::new(2, 2.0, 0.0, 10),
///     Client::new(3, 3.0, 0.0, 10),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 15).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let solution = random_solution(&instance, 2, &mut rng);
/// assert_eq!(solution.num_served(), 3);
/// assert_eq!(solution.num_vehicles(), 3);
/// ```
pub fn random_solution<R: Rng + ?Sized>(
    instance: &Instance,
    num_vehicles: usize,
    rng: &mut R,
) -> Solution {
    let capacity = instance.capacity();
    let mut vehicles: Vec<Vehicle> = (0..num_vehicles).map(|i| Vehicle::new(i, capacity)).collect();

    let mut order = instance.clients().to_vec();
    order.shuffle(rng);

    let mut current = 0;
    for client in order {
        let mut placed = false;
        for _ in 0..vehicles.len() {
            if vehicles[current].add_client(client.clone()) {
                placed = true;
                break;
            }
            current = (current + 1) % vehicles.len();
        }
        if !placed {
            let mut vehicle = Vehicle::new(vehicles.len(), capacity);
            vehicle.add_client(client);
            vehicles.push(vehicle);
        }
    }

    let solution = Solution::new(vehicles, instance.depot().clone());
    debug!(
        vehicles = solution.num_vehicles(),
        cost = solution.cost(),
        "random construction done"
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance(demands: &[i32], capacity: i32) -> Instance {
        let depot = Client::depot(0, 0.0, 0.0);
        let clients = demands
            .iter()
            .enumerate()
            .map(|(i, &d)| Client::new(i + 1, (i + 1) as f64, 0.0, d))
            .collect();
        Instance::new(depot, clients, capacity).expect("valid")
    }

    fn sorted_ids(sol: &Solution) -> Vec<usize> {
        let mut ids: Vec<usize> = sol.client_ids().into_iter().flatten().collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_random_places_every_client_once() {
        let inst = instance(&[5, 7, 3, 9, 4, 6, 2, 8], 20);
        let mut rng = StdRng::seed_from_u64(7);
        let sol = random_solution(&inst, 3, &mut rng);
        assert_eq!(sorted_ids(&sol), (1..=8).collect::<Vec<_>>());
        assert!(sol.vehicles().iter().all(|v| v.within_capacity()));
    }

    #[test]
    fn test_random_grows_fleet() {
        let inst = instance(&[10, 10, 10, 10], 10);
        let mut rng = StdRng::seed_from_u64(1);
        let sol = random_solution(&inst, 2, &mut rng);
        assert_eq!(sol.num_vehicles(), 4);
        assert!(sol.vehicles().iter().all(|v| v.len() == 1));
        let ids: Vec<usize> = sol.vehicles().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_random_zero_fleet() {
        let inst = instance(&[4, 4, 4], 10);
        let mut rng = StdRng::seed_from_u64(3);
        let sol = random_solution(&inst, 0, &mut rng);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.num_vehicles(), 2);
    }

    #[test]
    fn test_random_is_reproducible() {
        let inst = instance(&[5, 7, 3, 9, 4, 6], 15);
        let a = random_solution(&inst, 2, &mut StdRng::seed_from_u64(99));
        let b = random_solution(&inst, 2, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.client_ids(), b.client_ids());
    }

    #[test]
    fn test_random_empty_instance() {
        let inst = instance(&[], 10);
        let mut rng = StdRng::seed_from_u64(0);
        let sol = random_solution(&inst, 3, &mut rng);
        assert_eq!(sol.num_vehicles(), 3);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.cost(), 0.0);
    }
}
