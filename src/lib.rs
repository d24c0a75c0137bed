//! # CWS
//!
//! The Clarke & Wright Savings heuristic for routing problems built from a
//! depot and a set of customers joined by directed, pre-costed edges.
//!
//! Construction starts from one round trip per customer and merges routes
//! along customer-to-customer edges in order of decreasing saving. The order
//! can be biased-randomised, and the construction can be wrapped in a restart
//! loop that keeps the cheapest solution found.
//!
//! Callers describe their instance through the [`problem::NodeLike`] and
//! [`problem::EdgeLike`] traits; costs and savings are never computed here.

pub mod config;
pub mod error;
pub mod instance;
pub mod merge;
pub mod problem;
pub mod savings;
pub mod solution;
pub mod utils;

use crate::config::Config;
use crate::error::CwsError;
use crate::merge::MergeEngine;
use crate::problem::{EdgeLike, NodeId, NodeLike, Problem};
use crate::savings::{candidates, savings_list};
use crate::solution::Solution;
use crate::utils::SearchStatistics;

use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The solver: a validated problem, its savings list and the state of the
/// last run.
pub struct ClarkeWrightSavings {
    pub problem: Problem,
    /// Customer-to-customer edges by descending saving
    pub savings: Vec<usize>,
    pub best_solution: Option<Solution>,
    /// Best cost after each construction pass of the last run
    pub history: Vec<f64>,
    pub run_time: Duration,
    pub iterations: u32,
    pub iterations_without_improvement: u32,
    pub improvements: u32,
    start_time: Instant,
}

impl ClarkeWrightSavings {
    /// Validate the caller's nodes and edges and build the savings list.
    pub fn new<N: NodeLike, E: EdgeLike>(nodes: &[N], edges: &[E]) -> Result<Self, CwsError> {
        Ok(Self::from_problem(Problem::new(nodes, edges)?))
    }

    pub fn from_problem(problem: Problem) -> Self {
        let savings = savings_list(problem.arcs());
        ClarkeWrightSavings {
            problem,
            savings,
            best_solution: None,
            history: Vec::new(),
            run_time: Duration::from_secs(0),
            iterations: 0,
            iterations_without_improvement: 0,
            improvements: 0,
            start_time: Instant::now(),
        }
    }

    /// Run a single construction pass.
    pub fn construct<R: RngCore>(&self, config: &Config, rng: &mut R) -> Solution {
        MergeEngine::new(&self.problem, config).run(candidates(&self.savings, config, rng))
    }

    /// Run the heuristic, or the restart loop when `config.metaheuristic` is
    /// set, drawing all randomness from `rng`.
    pub fn run<R: RngCore>(&mut self, config: &Config, rng: &mut R) -> Result<&Solution, CwsError> {
        config.validate()?;
        if let Some(start) = &config.start {
            if config.metaheuristic && !start.is_partition_of(&self.problem) {
                return Err(CwsError::InvalidStart);
            }
        }

        self.start_time = Instant::now();
        self.history.clear();
        self.iterations = 0;
        self.iterations_without_improvement = 0;
        self.improvements = 0;

        let best = if config.metaheuristic {
            self.restart_loop(config, rng)
        } else {
            let solution = self.construct(config, rng);
            self.iterations = 1;
            self.history.push(solution.cost);
            solution
        };

        self.run_time = self.start_time.elapsed();
        info!(
            "finished after {} passes: cost {:.2}, {} routes",
            self.iterations,
            best.cost,
            best.route_count()
        );
        Ok(&*self.best_solution.insert(best))
    }

    fn restart_loop<R: RngCore>(&mut self, config: &Config, rng: &mut R) -> Solution {
        let mut best = match &config.start {
            Some(start) => start.clone(),
            None => {
                self.iterations += 1;
                self.construct(config, rng)
            }
        };
        self.history.push(best.cost);

        while !self.should_terminate(config) {
            let current = self.construct(config, rng);
            self.iterations += 1;

            if current.cost < best.cost {
                info!(
                    "pass {}: new best cost {:.2} (was {:.2})",
                    self.iterations, current.cost, best.cost
                );
                best = current;
                self.improvements += 1;
                self.iterations_without_improvement = 0;
            } else {
                self.iterations_without_improvement += 1;
            }
            self.history.push(best.cost);
        }

        best
    }

    /// Check if the termination criteria are met.
    fn should_terminate(&self, config: &Config) -> bool {
        self.iterations >= config.max_iterations
            || self.iterations_without_improvement >= config.max_iterations_without_improvement
    }

    /// Solve with a generator seeded from `config.seed` (or from entropy) and
    /// return the routes as caller node ids together with the total cost.
    pub fn solve(&mut self, config: &Config) -> Result<(Vec<Vec<NodeId>>, f64), CwsError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let cost = self.run(config, &mut rng)?.cost;
        let routes = self
            .best_solution
            .as_ref()
            .map(|best| best.node_sequences(&self.problem))
            .unwrap_or_default();
        Ok((routes, cost))
    }

    /// Summary of the last run.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            iterations: self.iterations,
            improvements: self.improvements,
            runtime: self.run_time,
            best_solution_cost: self.best_solution.as_ref().map_or(f64::INFINITY, |s| s.cost),
            best_solution_routes: self.best_solution.as_ref().map_or(0, |s| s.route_count()),
        }
    }
}
