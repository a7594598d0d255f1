//! End-to-end pipeline: construction, simulated annealing, hill climbing.

use std::sync::atomic::AtomicBool;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::annealing::{AnnealingConfig, AnnealingResult, SimulatedAnnealing};
use crate::constructive::ConstructionMethod;
use crate::error::RoutingError;
use crate::local_search::local_search;
use crate::models::{Instance, Solution};

/// Pipeline configuration.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use u_vrptw::constructive::ConstructionMethod;
/// use u_vrptw::solver::SolverConfig;
///
/// let config = SolverConfig::from_json(
///     r#"{ "construction": "nearest_neighbor", "annealing": { "max_iterations": 1000 } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.construction, ConstructionMethod::NearestNeighbor);
/// assert_eq!(config.annealing.max_iterations, 1000);
/// assert_eq!(config.local_search_iterations, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Heuristic for the starting solution.
    pub construction: ConstructionMethod,

    /// Starting fleet size; [`Instance::suggested_fleet_size`] when absent.
    pub num_vehicles: Option<usize>,

    /// Annealing parameters.
    pub annealing: AnnealingConfig,

    /// Hill-climbing rounds applied to the annealing result; `None` or 0
    /// skips the polish.
    pub local_search_iterations: Option<usize>,

    /// Seed for the whole pipeline. Falls back to `annealing.seed`, then to
    /// a random seed.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            construction: ConstructionMethod::default(),
            num_vehicles: None,
            annealing: AnnealingConfig::default(),
            local_search_iterations: Some(100),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Decodes a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_construction(mut self, method: ConstructionMethod) -> Self {
        self.construction = method;
        self
    }

    pub fn with_num_vehicles(mut self, n: usize) -> Self {
        self.num_vehicles = Some(n);
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_local_search_iterations(mut self, n: Option<usize>) -> Self {
        self.local_search_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RoutingError> {
        self.annealing.validate()
    }
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Cost of the constructed starting solution.
    pub initial_cost: f64,
    /// Final solution.
    pub solution: Solution,
    /// Annealing statistics (its `best` is the pre-polish solution).
    pub annealing: AnnealingResult,
    /// `(initial - final) / initial * 100`, 0 when the start costs nothing.
    pub improvement_percent: f64,
    /// Whether hill climbing ran after annealing.
    pub local_search_applied: bool,
}

/// Runs the full optimization pipeline with one seeded generator.
///
/// # Examples
///
/// ```
/// use u_vrptw::annealing::AnnealingConfig;
/// use u_vrptw::models::{Client, Instance};
/// use u_vrptw::solver::{Solver, SolverConfig};
///
/// let nodes = vec![
///     Client::depot(0, 0.0, 0.0),
///     Client::new(1, 3.0, 4.0, 10),
///     Client::new(2, 6.0, 8.0, 15),
///     Client::new(3, -2.0, 1.0, 5),
/// ];
/// let instance = Instance::from_nodes(nodes, 0, 100).unwrap();
/// let config = SolverConfig::default()
///     .with_annealing(AnnealingConfig::default().with_max_iterations(500))
///     .with_seed(1);
///
/// let report = Solver::new(config).unwrap().solve(&instance).unwrap();
/// assert!(report.solution.cost() <= report.initial_cost);
/// assert_eq!(report.solution.num_served(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, RoutingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Constructs, anneals and optionally polishes a solution.
    pub fn solve(&self, instance: &Instance) -> Result<SolveReport, RoutingError> {
        self.run(instance, None)
    }

    /// Like [`solve`](Self::solve), stopping the annealing phase early once
    /// `cancel` is set.
    pub fn solve_with_cancel(
        &self,
        instance: &Instance,
        cancel: &AtomicBool,
    ) -> Result<SolveReport, RoutingError> {
        self.run(instance, Some(cancel))
    }

    #[instrument(skip_all, fields(clients = instance.len(), capacity = instance.capacity()))]
    fn run(
        &self,
        instance: &Instance,
        cancel: Option<&AtomicBool>,
    ) -> Result<SolveReport, RoutingError> {
        let config = &self.config;
        let seed = config
            .seed
            .or(config.annealing.seed)
            .unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let fleet = config
            .num_vehicles
            .unwrap_or_else(|| instance.suggested_fleet_size());
        let initial = config.construction.build(instance, fleet, &mut rng);
        info!(
            method = config.construction.name(),
            seed,
            cost = initial.cost(),
            vehicles = initial.num_vehicles_used(),
            feasible = initial.is_feasible(),
            "initial solution built"
        );

        let annealing =
            SimulatedAnnealing::run_with_rng(&initial, &config.annealing, &mut rng, cancel)?;
        let mut solution = annealing.best.clone();

        let local_search_applied = match config.local_search_iterations {
            Some(rounds) if rounds > 0 => {
                solution = local_search(&solution, rounds, &config.annealing.operators, &mut rng);
                true
            }
            _ => false,
        };

        let initial_cost = initial.cost();
        let improvement_percent = if initial_cost > 0.0 {
            (initial_cost - solution.cost()) / initial_cost * 100.0
        } else {
            0.0
        };
        info!(
            initial_cost,
            cost = solution.cost(),
            improvement_percent,
            vehicles = solution.num_vehicles_used(),
            feasible = solution.is_feasible(),
            "solve finished"
        );

        Ok(SolveReport {
            initial_cost,
            solution,
            annealing,
            improvement_percent,
            local_search_applied,
        })
    }
}
