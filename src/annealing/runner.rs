//! Simulated annealing execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

use super::config::AnnealingConfig;
use crate::error::RoutingError;
use crate::local_search::generate_neighbor;
use crate::models::Solution;

/// Iterations between two `cost_history` samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// The best solution found.
    pub best: Solution,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// Iterations performed (one neighbor each).
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Accepted moves, improving ones included.
    pub accepted_moves: usize,

    /// Accepted moves that lowered the current cost.
    pub improving_moves: usize,

    /// Restarts triggered by stagnation.
    pub diversifications: usize,

    /// Whether the cancel flag stopped the run.
    pub cancelled: bool,

    /// Best cost sampled every 100 iterations, plus the final value.
    pub cost_history: Vec<f64>,

    /// Iteration at which the best solution was found (0 if never improved).
    pub last_improvement: usize,

    /// The solution the search was holding when it stopped, after any
    /// stagnation restart.
    pub last: Solution,
}

/// Metropolis acceptance probability.
///
/// `1.0` for a strictly cheaper candidate, `0.0` when the temperature is not
/// positive, otherwise `exp((current - new) / T)`, which lies in `(0, 1]`.
///
/// # Examples
///
/// ```
/// use u_vrptw::annealing::acceptance_probability;
///
/// assert_eq!(acceptance_probability(100.0, 90.0, 10.0), 1.0);
/// assert_eq!(acceptance_probability(100.0, 110.0, 0.0), 0.0);
/// let p = acceptance_probability(100.0, 110.0, 10.0);
/// assert!((p - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn acceptance_probability(current_cost: f64, new_cost: f64, temperature: f64) -> f64 {
    if new_cost < current_cost {
        return 1.0;
    }
    if temperature <= 0.0 {
        return 0.0;
    }
    ((current_cost - new_cost) / temperature).exp()
}

/// Executes simulated annealing over the neighborhood operators.
///
/// # Algorithm
///
/// Each iteration draws one neighbor of the current solution and accepts it
/// with [`acceptance_probability`]. The best solution is tracked
/// separately. After more than `stagnation_limit` accepted moves without a
/// new best, the search restarts from two random moves away from the best
/// solution. The temperature is multiplied by `cooling_rate` every
/// iteration; the run ends on the iteration budget, the temperature floor,
/// the time limit or cancellation.
///
/// # Reference
///
/// Kirkpatrick, S., Gelatt, C.D. & Vecchi, M.P. (1983). "Optimization by
/// Simulated Annealing", *Science* 220(4598), 671-680.
pub struct SimulatedAnnealing;

impl SimulatedAnnealing {
    /// Runs annealing from `initial`, seeding the generator from
    /// `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_vrptw::annealing::{AnnealingConfig, SimulatedAnnealing};
    /// use u_vrptw::constructive::nearest_neighbor_tw;
    /// use u_vrptw::models::{Client, Instance};
    ///
    /// let nodes = vec![
    ///     Client::depot(0, 0.0, 0.0),
    ///     Client::new(1, 1.0, 1.0, 5),
    ///     Client::new(2, 4.0, 0.0, 5),
    ///     Client::new(3, 2.0, 3.0, 5),
    ///     Client::new(4, -1.0, 2.0, 5),
    /// ];
    /// let instance = Instance::from_nodes(nodes, 0, 10).unwrap();
    /// let initial = nearest_neighbor_tw(&instance, 2);
    /// let config = AnnealingConfig::default()
    ///     .with_max_iterations(2_000)
    ///     .with_seed(7);
    ///
    /// let result = SimulatedAnnealing::run(&initial, &config).unwrap();
    /// assert!(result.best_cost <= initial.cost());
    /// assert!(result.best.is_feasible());
    /// ```
    pub fn run(initial: &Solution, config: &AnnealingConfig) -> Result<AnnealingResult, RoutingError> {
        Self::run_with_cancel(initial, config, None)
    }

    /// Runs annealing with an optional cancellation flag, checked at the top
    /// of every iteration.
    pub fn run_with_cancel(
        initial: &Solution,
        config: &AnnealingConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<AnnealingResult, RoutingError> {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::run_with_rng(initial, config, &mut rng, cancel)
    }

    /// Runs annealing drawing every random decision from `rng`.
    #[instrument(skip_all, fields(initial_cost = initial.cost()))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        initial: &Solution,
        config: &AnnealingConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<AnnealingResult, RoutingError> {
        config.validate()?;

        let started = Instant::now();
        let operators = config.operators.as_slice();
        let mut current = initial.clone();
        let mut best = initial.clone();

        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut stagnation = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut diversifications = 0usize;
        let mut last_improvement = 0usize;
        let mut cancelled = false;
        let mut cost_history = vec![best.cost()];

        while iteration < config.max_iterations && temperature > config.min_temperature {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                debug!(iteration, "time limit reached");
                break;
            }

            let neighbor = generate_neighbor(&current, operators, rng);
            let probability = acceptance_probability(current.cost(), neighbor.cost(), temperature);
            if probability > rng.random::<f64>() {
                if neighbor.cost() < current.cost() {
                    improving_moves += 1;
                }
                current = neighbor;
                accepted_moves += 1;

                if current.cost() < best.cost() {
                    best = current.clone();
                    stagnation = 0;
                    last_improvement = iteration;
                    trace!(iteration, cost = best.cost(), temperature, "new best");
                } else {
                    stagnation += 1;
                }
            }

            if stagnation > config.stagnation_limit {
                let step = generate_neighbor(&best, operators, rng);
                current = generate_neighbor(&step, operators, rng);
                stagnation = 0;
                diversifications += 1;
                debug!(iteration, restart_cost = current.cost(), "stagnation restart");
            }

            temperature *= config.cooling_rate;
            iteration += 1;

            if iteration % HISTORY_INTERVAL == 0 {
                cost_history.push(best.cost());
            }
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best.cost()).abs() > 1e-15)
        {
            cost_history.push(best.cost());
        }

        let best_cost = best.cost();
        info!(
            iterations = iteration,
            best_cost,
            accepted_moves,
            diversifications,
            cancelled,
            "annealing finished"
        );

        Ok(AnnealingResult {
            best,
            best_cost,
            initial_cost: initial.cost(),
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            diversifications,
            cancelled,
            cost_history,
            last_improvement,
            last: current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::random_solution;
    use crate::local_search::test_support::solution;
    use crate::local_search::Move;
    use crate::models::{Client, Instance};

    fn instance() -> Instance {
        let depot = Client::depot(0, 50.0, 50.0);
        let clients = (1..=12)
            .map(|i| {
                let angle = i as f64 * 0.52;
                Client::new(i, 50.0 + 30.0 * angle.cos(), 50.0 + 30.0 * angle.sin(), 10)
            })
            .collect();
        Instance::new(depot, clients, 40).expect("valid")
    }

    fn start() -> Solution {
        let mut rng = StdRng::seed_from_u64(1);
        random_solution(&instance(), 4, &mut rng)
    }

    #[test]
    fn test_acceptance_probability_cases() {
        assert_eq!(acceptance_probability(10.0, 9.0, 5.0), 1.0);
        assert_eq!(acceptance_probability(10.0, 9.0, 0.0), 1.0);
        assert_eq!(acceptance_probability(10.0, 11.0, 0.0), 0.0);
        assert_eq!(acceptance_probability(10.0, 11.0, -1.0), 0.0);
        assert_eq!(acceptance_probability(10.0, 10.0, 5.0), 1.0);
        let p1 = acceptance_probability(10.0, 11.0, 5.0);
        let p2 = acceptance_probability(10.0, 12.0, 5.0);
        assert!(p1 > p2 && p2 > 0.0 && p1 <= 1.0);
    }

    #[test]
    fn test_run_improves_and_stays_feasible() {
        let initial = start();
        let config = AnnealingConfig::default()
            .with_initial_temperature(100.0)
            .with_max_iterations(5_000)
            .with_seed(42);
        let result = SimulatedAnnealing::run(&initial, &config).expect("valid config");
        assert!(result.best_cost <= initial.cost());
        assert!((result.best_cost - result.best.recompute_cost()).abs() < 1e-9);
        assert!(result.best.is_feasible());
        assert_eq!(result.best.num_served(), 12);
        assert!(result.accepted_moves >= result.improving_moves);
        assert!(!result.cancelled);
        assert!((result.initial_cost - initial.cost()).abs() < 1e-10);
    }

    #[test]
    fn test_same_seed_same_result() {
        let initial = start();
        let config = AnnealingConfig::default()
            .with_max_iterations(1_000)
            .with_seed(9);
        let a = SimulatedAnnealing::run(&initial, &config).expect("valid config");
        let b = SimulatedAnnealing::run(&initial, &config).expect("valid config");
        assert_eq!(a.best.client_ids(), b.best.client_ids());
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let initial = start();
        let config = AnnealingConfig::default()
            .with_max_iterations(3_000)
            .with_seed(3);
        let result = SimulatedAnnealing::run(&initial, &config).expect("valid config");
        assert!(result.cost_history.len() >= 30);
        for pair in result.cost_history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        let last = *result.cost_history.last().expect("non-empty");
        assert!((last - result.best_cost).abs() < 1e-10);
    }

    #[test]
    fn test_stops_at_min_temperature() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_seed(0);
        let result = SimulatedAnnealing::run(&start(), &config).expect("valid config");
        // 10 -> 5 -> 2.5 -> 1.25 -> 0.625
        assert_eq!(result.iterations, 4);
        assert!(result.final_temperature <= 1.0);
    }

    #[test]
    fn test_stops_at_iteration_budget() {
        let config = AnnealingConfig::default()
            .with_max_iterations(250)
            .with_seed(0);
        let result = SimulatedAnnealing::run(&start(), &config).expect("valid config");
        assert_eq!(result.iterations, 250);
    }

    #[test]
    fn test_cancelled_before_start() {
        let flag = AtomicBool::new(true);
        let config = AnnealingConfig::default().with_seed(0);
        let initial = start();
        let result =
            SimulatedAnnealing::run_with_cancel(&initial, &config, Some(&flag)).expect("valid config");
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best.client_ids(), initial.client_ids());
    }

    #[test]
    fn test_zero_time_limit() {
        let config = AnnealingConfig::default()
            .with_time_limit(std::time::Duration::ZERO)
            .with_seed(0);
        let result = SimulatedAnnealing::run(&start(), &config).expect("valid config");
        assert_eq!(result.iterations, 0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_stagnation_triggers_diversification() {
        // A single route of clients on a line is already optimal for the
        // intra-route moves, so nothing ever improves.
        let depot = Client::depot(0, 0.0, 0.0);
        let clients = (1..=5).map(|i| Client::new(i, i as f64, 0.0, 1)).collect();
        let inst = Instance::new(depot, clients, 100).expect("valid");
        let initial = crate::constructive::clarke_wright_savings(&inst);
        let config = AnnealingConfig::default()
            .with_initial_temperature(1e6)
            .with_max_iterations(500)
            .with_stagnation_limit(10)
            .with_operators(vec![Move::TwoOpt, Move::OrOpt])
            .with_seed(5);
        let result = SimulatedAnnealing::run(&initial, &config).expect("valid config");
        assert!(result.diversifications > 0);
        assert!(result.best_cost <= initial.cost() + 1e-10);
    }

    #[test]
    fn test_restart_perturbs_best_not_current() {
        // Two mirrored singleton routes: a swap never changes the cost, so
        // every swap is accepted and counts as stagnation. The restart then
        // applies two swaps to the best solution, which lands back on it.
        let initial = solution(&[&[(1.0, 0.0, 1)], &[(-1.0, 0.0, 1)]], 10);
        for iterations in [1, 25] {
            let config = AnnealingConfig::default()
                .with_max_iterations(iterations)
                .with_stagnation_limit(0)
                .with_operators(vec![Move::Swap])
                .with_seed(3);
            let result = SimulatedAnnealing::run(&initial, &config).expect("valid config");
            assert_eq!(result.accepted_moves, iterations);
            assert_eq!(result.diversifications, iterations);
            assert_eq!(result.best.client_ids(), vec![vec![1], vec![2]]);
            assert_eq!(result.last.client_ids(), vec![vec![1], vec![2]]);
        }
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = AnnealingConfig::default().with_cooling_rate(2.0);
        let err = SimulatedAnnealing::run(&start(), &config).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidConfig(_)));
    }
}
