//! Simulated annealing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::local_search::Move;

/// Configuration for the simulated annealing driver.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, one neighbor per
/// temperature step.
///
/// # Examples
///
/// ```
/// use u_vrptw::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.995)
///     .with_max_iterations(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Iteration budget (one neighbor per iteration).
    pub max_iterations: usize,

    /// The run stops once the temperature falls to this value.
    pub min_temperature: f64,

    /// Accepted non-improving moves tolerated before restarting from a
    /// perturbed copy of the best solution.
    pub stagnation_limit: usize,

    /// Optional wall-clock budget, checked once per iteration.
    pub time_limit: Option<Duration>,

    /// Moves drawn uniformly when generating neighbors.
    pub operators: Vec<Move>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 2000.0,
            cooling_rate: 0.999,
            max_iterations: 50_000,
            min_temperature: 0.1,
            stagnation_limit: 1000,
            time_limit: None,
            operators: Move::ALL.to_vec(),
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_operators(mut self, operators: Vec<Move>) -> Self {
        self.operators = operators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(invalid(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(invalid(format!(
                "min_temperature must be non-negative, got {}",
                self.min_temperature
            )));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(invalid(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.operators.is_empty() {
            return Err(invalid("at least one operator is required"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> RoutingError {
    RoutingError::InvalidConfig(message.into())
}
