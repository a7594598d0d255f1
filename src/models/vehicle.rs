//! Vehicle with a capacity bound, a route and its cached load.

use std::sync::Arc;

use super::Client;

/// A vehicle and the clients it visits, in order.
///
/// The depot is implicit at both ends of the route. `load` always equals the
/// sum of the demands on the route: every mutator keeps it in sync, and the
/// public insertion methods refuse a client that would overrun `capacity`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_vrptw::models::{Client, Vehicle};
///
/// let mut v = Vehicle::new(0, 30);
/// assert!(v.add_client(Arc::new(Client::new(1, 3.0, 4.0, 10))));
/// assert!(v.add_client(Arc::new(Client::new(2, 6.0, 8.0, 15))));
/// assert!(!v.add_client(Arc::new(Client::new(3, 9.0, 12.0, 20))));
/// assert_eq!(v.load(), 25);
/// assert_eq!(v.client_ids(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    route: Vec<Arc<Client>>,
    load: i32,
}

impl Vehicle {
    /// Creates an empty vehicle.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            route: Vec::new(),
            load: 0,
        }
    }

    /// Returns `true` if `demand` more units still fit.
    pub fn can_fit(&self, demand: i32) -> bool {
        self.load + demand <= self.capacity
    }

    /// Appends a client if capacity allows. Returns whether it was added.
    pub fn add_client(&mut self, client: Arc<Client>) -> bool {
        if !self.can_fit(client.demand()) {
            return false;
        }
        self.load += client.demand();
        self.route.push(client);
        true
    }

    /// Inserts a client at `position` if capacity allows.
    ///
    /// # Panics
    ///
    /// Panics if `position > len()`.
    pub fn insert_client(&mut self, position: usize, client: Arc<Client>) -> bool {
        if !self.can_fit(client.demand()) {
            return false;
        }
        self.load += client.demand();
        self.route.insert(position, client);
        true
    }

    /// Removes the first occurrence of the client with the given id.
    pub fn remove_client(&mut self, client_id: usize) -> Option<Arc<Client>> {
        let pos = self.route.iter().position(|c| c.id() == client_id)?;
        Some(self.remove_at(pos))
    }

    /// Removes and returns the client at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn remove_at(&mut self, position: usize) -> Arc<Client> {
        let client = self.route.remove(position);
        self.load -= client.demand();
        client
    }

    /// Empties the route.
    pub fn clear(&mut self) {
        self.route.clear();
        self.load = 0;
    }

    /// Replaces the whole route, recomputing the load from scratch.
    ///
    /// Capacity is not checked here; callers test it before committing.
    pub(crate) fn set_route(&mut self, route: Vec<Arc<Client>>) {
        self.load = route.iter().map(|c| c.demand()).sum();
        self.route = route;
    }

    /// Vehicle index within its solution.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Current load (sum of route demands).
    pub fn load(&self) -> i32 {
        self.load
    }

    /// The ordered route, depot excluded.
    pub fn route(&self) -> &[Arc<Client>] {
        &self.route
    }

    /// Client ids in visit order.
    pub fn client_ids(&self) -> Vec<usize> {
        self.route.iter().map(|c| c.id()).collect()
    }

    /// Number of clients on the route.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns `true` for an idle vehicle.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Returns `true` when the load respects the capacity.
    pub fn within_capacity(&self) -> bool {
        self.load <= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: usize, demand: i32) -> Arc<Client> {
        Arc::new(Client::new(id, id as f64, 0.0, demand))
    }

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(2, 50);
        assert_eq!(v.id(), 2);
        assert_eq!(v.capacity(), 50);
        assert_eq!(v.load(), 0);
        assert!(v.is_empty());
    }

    #[test]
    fn test_add_client_tracks_load() {
        let mut v = Vehicle::new(0, 50);
        assert!(v.add_client(client(1, 10)));
        assert!(v.add_client(client(2, 15)));
        assert!(v.add_client(client(3, 20)));
        assert_eq!(v.load(), 45);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_capacity_rejects_and_keeps_load() {
        let mut v = Vehicle::new(0, 30);
        assert!(v.add_client(client(1, 10)));
        assert!(v.add_client(client(2, 15)));
        assert!(!v.add_client(client(3, 20)));
        assert_eq!(v.load(), 25);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut v = Vehicle::new(0, 100);
        v.add_client(client(1, 10));
        v.add_client(client(3, 10));
        assert!(v.insert_client(1, client(2, 5)));
        assert_eq!(v.client_ids(), vec![1, 2, 3]);
        assert_eq!(v.load(), 25);

        let removed = v.remove_client(2).expect("present");
        assert_eq!(removed.id(), 2);
        assert_eq!(v.load(), 20);
        assert!(v.remove_client(42).is_none());

        let first = v.remove_at(0);
        assert_eq!(first.id(), 1);
        assert_eq!(v.load(), 10);
    }

    #[test]
    fn test_insert_rejected_over_capacity() {
        let mut v = Vehicle::new(0, 10);
        v.add_client(client(1, 8));
        assert!(!v.insert_client(0, client(2, 3)));
        assert_eq!(v.client_ids(), vec![1]);
    }

    #[test]
    fn test_set_route_recomputes_load() {
        let mut v = Vehicle::new(0, 10);
        v.set_route(vec![client(1, 4), client(2, 9)]);
        assert_eq!(v.load(), 13);
        assert!(!v.within_capacity());
        v.clear();
        assert_eq!(v.load(), 0);
        assert!(v.is_empty());
    }
}
