//! The merge engine: fuses round trips into longer routes along a candidate
//! sequence of customer-to-customer edges.

use crate::config::Config;
use crate::problem::{Problem, Vertex};
use crate::solution::{Route, Solution};
use log::{debug, trace};

/// How the two routes of a candidate merge are traversed. For an edge
/// `(i, j)`, `i` must end the first route and `j` must open the second once
/// the orientation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Direct,
    ReverseFirst,
    ReverseSecond,
    ReverseBoth,
}

impl Orientation {
    /// Evaluation order; earlier entries win cost ties.
    pub const ALL: [Orientation; 4] = [
        Orientation::Direct,
        Orientation::ReverseFirst,
        Orientation::ReverseSecond,
        Orientation::ReverseBoth,
    ];

    pub fn reverses_first(self) -> bool {
        matches!(self, Orientation::ReverseFirst | Orientation::ReverseBoth)
    }

    pub fn reverses_second(self) -> bool {
        matches!(self, Orientation::ReverseSecond | Orientation::ReverseBoth)
    }
}

/// State of one construction pass.
pub struct MergeEngine<'a> {
    problem: &'a Problem,
    config: &'a Config,
    /// Route slots; a slot empties when its route is merged into another
    routes: Vec<Option<Route>>,
    /// Slot of the route holding each customer
    route_of: Vec<usize>,
    active: usize,
    merges: usize,
}

impl<'a> MergeEngine<'a> {
    /// One round trip per customer.
    pub fn new(problem: &'a Problem, config: &'a Config) -> Self {
        let n = problem.customer_count();
        MergeEngine {
            problem,
            config,
            routes: (0..n)
                .map(|customer| Some(Route::with_customer(customer, problem)))
                .collect(),
            route_of: (0..n).collect(),
            active: n,
            merges: 0,
        }
    }

    /// Number of routes currently in the solution.
    pub fn active_routes(&self) -> usize {
        self.active
    }

    /// Number of merges performed so far.
    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn route_of(&self, customer: usize) -> usize {
        self.route_of[customer]
    }

    /// Whether one more merge keeps the route count at or above the floor.
    fn can_merge(&self) -> bool {
        self.active > 1 && (self.active - 1) as f64 >= self.config.min_routes
    }

    /// Walk the candidates once, merging where feasible, and return the
    /// resulting solution. Stops early once the route floor is reached.
    pub fn run<I: IntoIterator<Item = usize>>(mut self, candidates: I) -> Solution {
        for edge in candidates {
            if !self.can_merge() {
                break;
            }
            self.try_merge(edge);
        }
        let merges = self.merges;
        let solution = self.into_solution();
        debug!(
            "construction pass: cost {:.2}, {} routes, {} merges",
            solution.cost,
            solution.route_count(),
            merges
        );
        solution
    }

    /// Cheapest feasible orientation and resulting route cost for merging
    /// through `edge`, without applying it.
    pub fn evaluate(&self, edge: usize) -> Option<(Orientation, f64)> {
        if !self.can_merge() {
            return None;
        }
        let arc = self.problem.arc(edge);
        let (Vertex::Customer(i), Vertex::Customer(j)) = (arc.origin, arc.destination) else {
            return None;
        };
        let (first, second) = (self.route_of[i], self.route_of[j]);
        if first == second {
            return None;
        }
        self.best_orientation(edge, i, j, first, second)
    }

    /// Merge the routes joined by `edge` if feasible. Returns whether a merge
    /// took place.
    pub fn try_merge(&mut self, edge: usize) -> bool {
        let Some((orientation, cost)) = self.evaluate(edge) else {
            return false;
        };
        let arc = *self.problem.arc(edge);
        let (Some(i), Some(j)) = (arc.origin.customer(), arc.destination.customer()) else {
            return false;
        };
        let (first, second) = (self.route_of[i], self.route_of[j]);
        self.apply(edge, first, second, orientation);
        trace!(
            "merged {} -> {} ({:?}), route cost {:.2}, {} routes left",
            i,
            j,
            orientation,
            cost,
            self.active
        );
        true
    }

    /// Cheapest feasible orientation for merging through `edge`.
    fn best_orientation(
        &self,
        edge: usize,
        i: usize,
        j: usize,
        first: usize,
        second: usize,
    ) -> Option<(Orientation, f64)> {
        let (Some(a), Some(b)) = (self.routes[first].as_ref(), self.routes[second].as_ref()) else {
            return None;
        };
        let orientations: &[Orientation] = if self.config.reverse {
            &Orientation::ALL
        } else {
            &[Orientation::Direct]
        };

        let mut best: Option<(Orientation, f64)> = None;
        for &orientation in orientations {
            let i_ends = if orientation.reverses_first() {
                a.first() == i
            } else {
                a.last() == i
            };
            let j_opens = if orientation.reverses_second() {
                b.last() == j
            } else {
                b.first() == j
            };
            if !(i_ends && j_opens) {
                continue;
            }

            let cost = a.merge_cost(
                orientation.reverses_first(),
                b,
                orientation.reverses_second(),
                edge,
                self.problem,
            );
            if cost > self.config.max_cost {
                continue;
            }
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((orientation, cost));
            }
        }
        best
    }

    fn apply(&mut self, edge: usize, first: usize, second: usize, orientation: Orientation) {
        let Some(mut donor) = self.routes[second].take() else {
            return;
        };
        if orientation.reverses_second() {
            donor.reverse(self.problem);
        }
        for &customer in &donor.customers {
            self.route_of[customer] = first;
        }
        if let Some(route) = self.routes[first].as_mut() {
            if orientation.reverses_first() {
                route.reverse(self.problem);
            }
            route.append(donor, edge, self.problem);
        }
        self.active -= 1;
        self.merges += 1;
    }

    /// Finalize the pass.
    pub fn into_solution(self) -> Solution {
        Solution::from_routes(self.routes.into_iter().flatten().collect())
    }
}
