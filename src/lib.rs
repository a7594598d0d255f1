//! # u-vrptw
//!
//! Capacitated vehicle routing with time windows (CVRPTW): construction
//! heuristics, a five-move constrained neighborhood, hill climbing and
//! simulated annealing over a single depot and a homogeneous fleet.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (TimeWindow, Client, Vehicle, Solution, Instance)
//! - [`distance`] — Euclidean distance over point-like types
//! - [`evaluation`] — Route time simulation, cost, violations and report rows
//! - [`constructive`] — Construction heuristics (Random, Nearest Neighbor TW, Clarke-Wright)
//! - [`local_search`] — Neighborhood moves (swap, relocate, 2-opt, or-opt, cross-exchange) and hill climbing
//! - [`annealing`] — Simulated annealing driver
//! - [`solver`] — Construct → anneal → polish pipeline
//! - [`parser`] — VRPLIB and Solomon instance readers
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use u_vrptw::annealing::AnnealingConfig;
//! use u_vrptw::models::{Client, Instance, TimeWindow};
//! use u_vrptw::solver::{Solver, SolverConfig};
//!
//! let nodes = vec![
//!     Client::depot(0, 0.0, 0.0),
//!     Client::new(1, 3.0, 4.0, 10).with_time_window(TimeWindow::new(0.0, 50.0).unwrap()),
//!     Client::new(2, 6.0, 8.0, 15).with_service_time(1.0),
//!     Client::new(3, -4.0, 3.0, 20),
//! ];
//! let instance = Instance::from_nodes(nodes, 0, 30).unwrap();
//!
//! let config = SolverConfig::default()
//!     .with_annealing(AnnealingConfig::default().with_max_iterations(1_000))
//!     .with_seed(42);
//! let report = Solver::new(config).unwrap().solve(&instance).unwrap();
//!
//! assert_eq!(report.solution.num_served(), 3);
//! assert!(report.solution.cost() <= report.initial_cost);
//! ```

pub mod annealing;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod parser;
pub mod solver;

pub use error::RoutingError;
