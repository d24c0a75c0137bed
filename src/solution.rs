//! Route and solution representation.

use crate::problem::{NodeId, Problem, Vertex};
use std::fmt;

/// A depot-bounded route over dense customer indices.
///
/// Both traversal directions are costed so that a merge can consider the
/// route reversed without walking it.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// The sequence of customer indices (excluding the depot)
    pub customers: Vec<usize>,
    /// Edge from the depot to the first customer
    pub departure: usize,
    /// Edge from the last customer back to the depot
    pub arrival: usize,
    /// Cost of traversing the route forwards
    pub cost: f64,
    /// Cost of traversing the route backwards over the inverse edges
    pub reverse_cost: f64,
}

impl Route {
    /// The round trip depot -> customer -> depot.
    pub fn with_customer(customer: usize, problem: &Problem) -> Self {
        let departure = problem.departure(customer);
        let arrival = problem.arrival(customer);
        Route {
            customers: vec![customer],
            departure,
            arrival,
            cost: problem.arc(departure).cost + problem.arc(arrival).cost,
            reverse_cost: problem.arc(problem.inverse(arrival)).cost
                + problem.arc(problem.inverse(departure)).cost,
        }
    }

    /// Customer adjacent to the depot-departure edge.
    pub fn first(&self) -> usize {
        self.customers[0]
    }

    /// Customer adjacent to the depot-return edge.
    pub fn last(&self) -> usize {
        self.customers[self.customers.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Cost, departure edge and arrival edge of the route in one direction.
    fn oriented(&self, reversed: bool, problem: &Problem) -> (f64, usize, usize) {
        if reversed {
            (
                self.reverse_cost,
                problem.inverse(self.arrival),
                problem.inverse(self.departure),
            )
        } else {
            (self.cost, self.departure, self.arrival)
        }
    }

    /// Cost of the route obtained by following `self` with `other` through
    /// `link`, each optionally reversed.
    pub fn merge_cost(
        &self,
        reversed: bool,
        other: &Route,
        other_reversed: bool,
        link: usize,
        problem: &Problem,
    ) -> f64 {
        let (cost, _, arrival) = self.oriented(reversed, problem);
        let (other_cost, other_departure, _) = other.oriented(other_reversed, problem);
        cost + other_cost - problem.arc(arrival).cost - problem.arc(other_departure).cost
            + problem.arc(link).cost
    }

    /// Flip the traversal direction.
    pub fn reverse(&mut self, problem: &Problem) {
        self.customers.reverse();
        let departure = problem.inverse(self.arrival);
        self.arrival = problem.inverse(self.departure);
        self.departure = departure;
        std::mem::swap(&mut self.cost, &mut self.reverse_cost);
    }

    /// Append `other` after the last customer through `link`, which must run
    /// from `self.last()` to `other.first()`.
    pub fn append(&mut self, other: Route, link: usize, problem: &Problem) {
        let cost = self.merge_cost(false, &other, false, link, problem);
        let reverse_cost = other.merge_cost(true, self, true, problem.inverse(link), problem);

        self.customers.extend(other.customers);
        self.arrival = other.arrival;
        self.cost = cost;
        self.reverse_cost = reverse_cost;
    }

    /// Cost recomputed from the edges actually traversed.
    pub fn traversal_cost(&self, problem: &Problem) -> f64 {
        let mut total = problem.arc(self.departure).cost;
        for pair in self.customers.windows(2) {
            total += problem
                .edge_between(Vertex::Customer(pair[0]), Vertex::Customer(pair[1]))
                .map_or(f64::INFINITY, |edge| problem.arc(edge).cost);
        }
        total + problem.arc(self.arrival).cost
    }
}

/// A set of routes covering every customer, with its total cost.
#[derive(Clone, PartialEq)]
pub struct Solution {
    pub routes: Vec<Route>,
    pub cost: f64,
}

impl Solution {
    /// Create a new, empty solution.
    pub fn new() -> Self {
        Solution {
            routes: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        let mut solution = Solution { routes, cost: 0.0 };
        solution.evaluate();
        solution
    }

    /// Recompute the total cost from the route costs.
    pub fn evaluate(&mut self) {
        self.cost = self.routes.iter().map(|route| route.cost).sum();
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Routes as sequences of caller node ids, depot omitted.
    pub fn node_sequences(&self, problem: &Problem) -> Vec<Vec<NodeId>> {
        self.routes
            .iter()
            .map(|route| {
                route
                    .customers
                    .iter()
                    .map(|&customer| problem.node_id(customer))
                    .collect()
            })
            .collect()
    }

    /// Whether every customer of `problem` appears in exactly one route,
    /// exactly once.
    pub fn is_partition_of(&self, problem: &Problem) -> bool {
        let mut seen = vec![false; problem.customer_count()];
        for route in &self.routes {
            if route.is_empty() {
                return false;
            }
            for &customer in &route.customers {
                match seen.get_mut(customer) {
                    Some(flag) if !*flag => *flag = true,
                    _ => return false,
                }
            }
        }
        seen.into_iter().all(|flag| flag)
    }
}

impl Default for Solution {
    fn default() -> Self {
        Solution::new()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (Cost: {:.2})",
                i, route.customers, route.cost
            )?;
        }

        Ok(())
    }
}
