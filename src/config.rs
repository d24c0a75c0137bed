//! Configuration parameters for the savings heuristic.

use crate::error::CwsError;
use crate::savings::{quasi_geometric, BiasedFn};
use crate::solution::Solution;
use log::warn;
use serde::{Deserialize, Serialize};

/// Configuration settings for a solve.
///
/// Missing fields deserialize to their defaults, so infinite `max_cost` and
/// `min_routes` never need to appear in a serialized config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Use biased-randomised selection instead of strict descending savings
    pub biased: bool,
    /// Selection strategy used when `biased` is set
    #[serde(skip)]
    pub biased_func: BiasedFn,
    /// Skew parameter of the selection strategy, in (0, 1)
    pub beta: f64,
    /// Consider reversed route orientations when merging
    pub reverse: bool,
    /// Wrap construction in the restart loop
    pub metaheuristic: bool,
    /// Seed solution for the restart loop
    #[serde(skip)]
    pub start: Option<Solution>,
    /// Maximum number of construction passes
    pub max_iterations: u32,
    /// Maximum number of consecutive passes without improvement
    pub max_iterations_without_improvement: u32,
    /// Per-route cost ceiling
    pub max_cost: f64,
    /// Floor on the number of routes
    pub min_routes: f64,
    /// Seed of the random generator used by `ClarkeWrightSavings::solve`
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            biased: false,
            biased_func: quasi_geometric,
            beta: 0.3,
            reverse: true,
            metaheuristic: false,
            start: None,
            max_iterations: 1000,
            max_iterations_without_improvement: 500,
            max_cost: f64::INFINITY,
            min_routes: f64::NEG_INFINITY,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    pub fn with_biased(mut self, biased: bool) -> Self {
        self.biased = biased;
        self
    }

    /// Replace the biased selection strategy.
    pub fn with_biased_func(mut self, func: BiasedFn) -> Self {
        self.biased_func = func;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_metaheuristic(mut self, metaheuristic: bool) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }

    /// Warm-start the restart loop from a previously computed solution.
    pub fn with_start(mut self, start: Solution) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_max_iterations_without_improvement(mut self, iterations: u32) -> Self {
        self.max_iterations_without_improvement = iterations;
        self
    }

    pub fn with_max_cost(mut self, cost: f64) -> Self {
        self.max_cost = cost;
        self
    }

    pub fn with_min_routes(mut self, routes: f64) -> Self {
        self.min_routes = routes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the parameter ranges.
    ///
    /// A `max_cost` no merge can meet is valid and leaves every customer on
    /// its own round trip.
    /// `metaheuristic` without `biased` is accepted with a warning: every
    /// restart repeats the first pass.
    pub fn validate(&self) -> Result<(), CwsError> {
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(CwsError::InvalidConfig(format!(
                "beta must lie in (0, 1), got {}",
                self.beta
            )));
        }
        if self.max_cost.is_nan() {
            return Err(CwsError::InvalidConfig(
                "max_cost must be a number".to_string(),
            ));
        }
        if self.min_routes.is_nan() {
            return Err(CwsError::InvalidConfig(
                "min_routes must be a number".to_string(),
            ));
        }
        if self.metaheuristic && !self.biased {
            warn!("metaheuristic enabled without biased selection: every pass yields the same solution");
        }
        Ok(())
    }
}
