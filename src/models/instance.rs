//! Validated problem instance: depot, clients and vehicle capacity.

use std::collections::HashSet;
use std::sync::Arc;

use super::Client;
use crate::error::RoutingError;

/// The input triple every construction heuristic consumes.
///
/// Clients and depot are wrapped in `Arc` once here and shared read-only by
/// every solution built from this instance.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Client, Instance};
///
/// let nodes = vec![
///     Client::depot(1, 0.0, 0.0),
///     Client::new(2, 3.0, 4.0, 10),
///     Client::new(3, 6.0, 8.0, 15),
/// ];
/// let instance = Instance::from_nodes(nodes, 1, 100).unwrap();
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.depot().id(), 1);
/// assert_eq!(instance.total_demand(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    depot: Arc<Client>,
    clients: Vec<Arc<Client>>,
    capacity: i32,
}

impl Instance {
    /// Builds an instance after checking capacity and demands.
    ///
    /// Fails if `capacity <= 0`, if a demand is negative, if a single
    /// client needs more than a whole vehicle, or if an id appears twice
    /// (the depot's id included).
    pub fn new(depot: Client, clients: Vec<Client>, capacity: i32) -> Result<Self, RoutingError> {
        if capacity <= 0 {
            return Err(RoutingError::InvalidCapacity(capacity));
        }
        let mut seen = HashSet::with_capacity(clients.len() + 1);
        seen.insert(depot.id());
        for c in &clients {
            if !seen.insert(c.id()) {
                return Err(RoutingError::DuplicateClient { id: c.id() });
            }
            if c.demand() < 0 {
                return Err(RoutingError::NegativeDemand {
                    id: c.id(),
                    demand: c.demand(),
                });
            }
            if c.demand() > capacity {
                return Err(RoutingError::DemandExceedsCapacity {
                    id: c.id(),
                    demand: c.demand(),
                    capacity,
                });
            }
        }
        Ok(Self {
            depot: Arc::new(depot),
            clients: clients.into_iter().map(Arc::new).collect(),
            capacity,
        })
    }

    /// Splits a node list into depot and clients by id.
    ///
    /// Returns [`RoutingError::DepotNotFound`] when no node has `depot_id`
    /// and [`RoutingError::DuplicateClient`] when more than one does.
    pub fn from_nodes(
        nodes: Vec<Client>,
        depot_id: usize,
        capacity: i32,
    ) -> Result<Self, RoutingError> {
        let (depots, clients): (Vec<Client>, Vec<Client>) =
            nodes.into_iter().partition(|n| n.id() == depot_id);
        let mut depots = depots.into_iter();
        let depot = depots.next().ok_or(RoutingError::DepotNotFound)?;
        if depots.next().is_some() {
            return Err(RoutingError::DuplicateClient { id: depot_id });
        }
        Self::new(depot, clients, capacity)
    }

    /// The depot node.
    pub fn depot(&self) -> &Arc<Client> {
        &self.depot
    }

    /// Clients in input order.
    pub fn clients(&self) -> &[Arc<Client>] {
        &self.clients
    }

    /// Capacity shared by every vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of clients (depot excluded).
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` when there are no clients.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Sum of all client demands.
    pub fn total_demand(&self) -> i64 {
        self.clients.iter().map(|c| i64::from(c.demand())).sum()
    }

    /// Fleet size used when none is configured: the capacity lower bound,
    /// but never fewer than 5.
    pub fn suggested_fleet_size(&self) -> usize {
        let capacity = i64::from(self.capacity);
        let lower_bound = (self.total_demand() + capacity - 1) / capacity;
        (lower_bound.max(0) as usize).max(5)
    }
}
