//! Utility functions and structures for reporting on a search.

use std::time::Duration;

use crate::problem::{Problem, Vertex};
use crate::solution::Solution;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Statistics about the last run of the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    pub iterations: u32,
    pub improvements: u32,
    pub runtime: Duration,
    pub best_solution_cost: f64,
    pub best_solution_routes: usize,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Construction Passes: {}
- Improvements: {}
- Runtime: {}
- Best Solution Cost: {:.2}
- Best Solution Routes: {}",
            self.iterations,
            self.improvements,
            format_duration(self.runtime),
            self.best_solution_cost,
            self.best_solution_routes,
        )
    }
}

/// Render a solution as one `depot -> ... -> depot` line per route.
pub fn format_solution(solution: &Solution, problem: &Problem) -> String {
    let mut out = format!(
        "Total Cost: {:.2}\nNumber of Routes: {}\n",
        solution.cost,
        solution.route_count()
    );

    for (i, route) in solution.routes.iter().enumerate() {
        let stops: Vec<String> = route
            .customers
            .iter()
            .map(|&customer| problem.to_external(Vertex::Customer(customer)).to_string())
            .collect();
        out.push_str(&format!(
            "Route #{}: depot -> {} -> depot (Cost: {:.2})\n",
            i + 1,
            stops.join(" -> "),
            route.cost
        ));
    }

    out
}

/// Print a solution to the console.
pub fn print_solution(solution: &Solution, problem: &Problem) {
    print!("{}", format_solution(solution, problem));
}
