//! Unit tests for the Route and Solution structures.

use cws::instance::{BasicEdge, BasicNode};
use cws::problem::{Problem, Vertex};
use cws::solution::{Route, Solution};

/// Three customers with asymmetric arcs between customers 0 and 1.
fn create_test_problem() -> Problem {
    let nodes: Vec<BasicNode> = (0..3)
        .map(|id| BasicNode {
            id: id + 10,
            location: (0.0, 0.0),
        })
        .collect();

    let c = |idx: usize| Vertex::Customer(idx + 10);
    let edges = vec![
        BasicEdge::new(Vertex::Depot, c(0), 0.0, 10.0),
        BasicEdge::new(c(0), Vertex::Depot, 0.0, 11.0),
        BasicEdge::new(Vertex::Depot, c(1), 0.0, 8.0),
        BasicEdge::new(c(1), Vertex::Depot, 0.0, 9.0),
        BasicEdge::new(Vertex::Depot, c(2), 0.0, 12.0),
        BasicEdge::new(c(2), Vertex::Depot, 0.0, 12.0),
        BasicEdge::new(c(0), c(1), 16.0, 3.0),
        BasicEdge::new(c(1), c(0), 10.0, 7.0),
        BasicEdge::new(c(1), c(2), 8.0, 4.0),
        BasicEdge::new(c(2), c(1), 8.0, 4.0),
    ];

    Problem::new(&nodes, &edges).unwrap()
}

fn link(problem: &Problem, from: usize, to: usize) -> usize {
    problem
        .edge_between(Vertex::Customer(from), Vertex::Customer(to))
        .unwrap()
}

#[test]
fn test_route_creation() {
    let problem = create_test_problem();
    let route = Route::with_customer(0, &problem);

    assert_eq!(route.customers, vec![0]);
    assert_eq!(route.first(), 0);
    assert_eq!(route.last(), 0);
    assert_eq!(route.len(), 1);
    assert!(!route.is_empty());
    assert_eq!(route.cost, 21.0);
    // Backwards over the inverse edges: depot -> 0 -> depot again
    assert_eq!(route.reverse_cost, 21.0);
    assert_eq!(route.traversal_cost(&problem), 21.0);
}

#[test]
fn test_route_append() {
    let problem = create_test_problem();
    let mut route = Route::with_customer(0, &problem);
    let other = Route::with_customer(1, &problem);

    let expected = route.merge_cost(false, &other, false, link(&problem, 0, 1), &problem);
    route.append(other, link(&problem, 0, 1), &problem);

    assert_eq!(route.customers, vec![0, 1]);
    // depot -> 0 -> 1 -> depot = 10 + 3 + 9
    assert_eq!(route.cost, 22.0);
    assert_eq!(route.cost, expected);
    // depot -> 1 -> 0 -> depot = 8 + 7 + 11
    assert_eq!(route.reverse_cost, 26.0);
    assert_eq!(route.traversal_cost(&problem), route.cost);
    assert_eq!(problem.arc(route.departure).destination, Vertex::Customer(0));
    assert_eq!(problem.arc(route.arrival).origin, Vertex::Customer(1));
}

#[test]
fn test_route_reverse() {
    let problem = create_test_problem();
    let mut route = Route::with_customer(0, &problem);
    route.append(Route::with_customer(1, &problem), link(&problem, 0, 1), &problem);

    route.reverse(&problem);
    assert_eq!(route.customers, vec![1, 0]);
    assert_eq!(route.cost, 26.0);
    assert_eq!(route.reverse_cost, 22.0);
    assert_eq!(route.traversal_cost(&problem), 26.0);
    assert_eq!(problem.arc(route.departure).destination, Vertex::Customer(1));
    assert_eq!(problem.arc(route.arrival).origin, Vertex::Customer(0));

    route.reverse(&problem);
    assert_eq!(route.customers, vec![0, 1]);
    assert_eq!(route.cost, 22.0);
}

#[test]
fn test_merge_cost_orientations() {
    let problem = create_test_problem();
    let mut first = Route::with_customer(0, &problem);
    first.append(Route::with_customer(1, &problem), link(&problem, 0, 1), &problem);
    let second = Route::with_customer(2, &problem);

    // [0, 1] then [2] through 1 -> 2: 22 + 24 - 9 - 12 + 4
    let direct = first.merge_cost(false, &second, false, link(&problem, 1, 2), &problem);
    assert_eq!(direct, 29.0);

    // [2] then [0, 1] reversed through 2 -> 1: 24 + 26 - 12 - 8 + 4
    let reversed = second.merge_cost(false, &first, true, link(&problem, 2, 1), &problem);
    assert_eq!(reversed, 34.0);
}

#[test]
fn test_solution_evaluate_and_sequences() {
    let problem = create_test_problem();
    let mut route = Route::with_customer(0, &problem);
    route.append(Route::with_customer(1, &problem), link(&problem, 0, 1), &problem);

    let solution = Solution::from_routes(vec![route, Route::with_customer(2, &problem)]);
    assert_eq!(solution.route_count(), 2);
    assert_eq!(solution.cost, 22.0 + 24.0);
    assert_eq!(solution.node_sequences(&problem), vec![vec![10, 11], vec![12]]);
    assert!(solution.is_partition_of(&problem));
}

#[test]
fn test_solution_partition_check() {
    let problem = create_test_problem();

    let missing = Solution::from_routes(vec![
        Route::with_customer(0, &problem),
        Route::with_customer(1, &problem),
    ]);
    assert!(!missing.is_partition_of(&problem));

    let duplicated = Solution::from_routes(vec![
        Route::with_customer(0, &problem),
        Route::with_customer(1, &problem),
        Route::with_customer(2, &problem),
        Route::with_customer(2, &problem),
    ]);
    assert!(!duplicated.is_partition_of(&problem));

    assert!(!Solution::new().is_partition_of(&problem));
}

#[test]
fn test_solution_debug_output() {
    let problem = create_test_problem();
    let solution = Solution::from_routes(vec![Route::with_customer(2, &problem)]);
    let output = format!("{:?}", solution);
    assert!(output.contains("Cost: 24.00"));
    assert!(output.contains("Routes: 1"));
}
