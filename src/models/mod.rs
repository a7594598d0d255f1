//! Domain model types for capacitated routing with time windows.
//!
//! Clients carry demands and time windows, vehicles carry a route and a
//! cached load, and a solution is a fleet of vehicles plus the shared depot.
//! [`Instance`] is the validated input every construction heuristic reads.

mod client;
mod instance;
mod solution;
mod vehicle;

pub use client::{Client, TimeWindow};
pub use instance::Instance;
pub use solution::Solution;
pub use vehicle::Vehicle;
