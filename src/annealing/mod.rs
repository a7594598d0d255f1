//! Simulated annealing over the neighborhood operators.
//!
//! Metropolis acceptance, geometric cooling and a stagnation restart from
//! the best solution found. All randomness comes from one seedable
//! generator, so a fixed seed reproduces a run exactly.

mod config;
mod runner;

pub use config::AnnealingConfig;
pub use runner::{acceptance_probability, AnnealingResult, SimulatedAnnealing};
