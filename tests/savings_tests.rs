//! Unit tests for the savings list and the biased selector.

use cws::config::Config;
use cws::instance::{BasicEdge, BasicNode};
use cws::problem::{Problem, Vertex};
use cws::savings::{candidates, quasi_geometric, savings_list, BiasedRandomisation};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Three customers with savings chosen to exercise ordering and ties.
fn create_test_problem() -> Problem {
    let nodes: Vec<BasicNode> = (0..3)
        .map(|id| BasicNode {
            id,
            location: (0.0, 0.0),
        })
        .collect();

    let c = Vertex::Customer;
    let mut edges = Vec::new();
    for id in 0..3 {
        edges.push(BasicEdge::new(Vertex::Depot, c(id), 50.0, 10.0));
        edges.push(BasicEdge::new(c(id), Vertex::Depot, 50.0, 10.0));
    }
    edges.push(BasicEdge::new(c(0), c(1), 4.0, 1.0)); // 6
    edges.push(BasicEdge::new(c(1), c(0), 9.0, 1.0)); // 7
    edges.push(BasicEdge::new(c(0), c(2), 4.0, 1.0)); // 8
    edges.push(BasicEdge::new(c(2), c(0), -1.0, 1.0)); // 9
    edges.push(BasicEdge::new(c(1), c(2), 4.0, 1.0)); // 10
    edges.push(BasicEdge::new(c(2), c(1), 7.0, 1.0)); // 11

    Problem::new(&nodes, &edges).unwrap()
}

#[test]
fn test_savings_list_order() {
    let problem = create_test_problem();
    let list = savings_list(problem.arcs());

    // Depot edges are excluded even with a large saving
    assert_eq!(list.len(), 6);
    assert!(list.iter().all(|&e| problem.arc(e).is_saving_candidate()));

    // Descending saving, ties in input order
    assert_eq!(list, vec![7, 11, 6, 8, 10, 9]);
}

#[test]
fn test_biased_randomisation_is_a_permutation() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let items: Vec<usize> = (0..50).collect();

    let mut drawn: Vec<usize> = BiasedRandomisation::new(items.clone(), 0.3, &mut rng).collect();
    assert_eq!(drawn.len(), items.len());
    drawn.sort_unstable();
    assert_eq!(drawn, items);
}

#[test]
fn test_biased_randomisation_size_hint() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut selector = BiasedRandomisation::new(vec!["a", "b", "c"], 0.5, &mut rng);
    assert_eq!(selector.len(), 3);
    selector.next();
    assert_eq!(selector.len(), 2);
    selector.next();
    selector.next();
    assert_eq!(selector.next(), None);
}

#[test]
fn test_biased_randomisation_is_reproducible() {
    let items: Vec<usize> = (0..30).collect();

    let mut rng_a = ChaCha8Rng::seed_from_u64(11);
    let mut rng_b = ChaCha8Rng::seed_from_u64(11);
    let a: Vec<usize> = BiasedRandomisation::new(items.clone(), 0.3, &mut rng_a).collect();
    let b: Vec<usize> = BiasedRandomisation::new(items.clone(), 0.3, &mut rng_b).collect();
    assert_eq!(a, b);

    // Restarting with a new draw from the same generator gives another sequence
    let c: Vec<usize> = BiasedRandomisation::new(items, 0.3, &mut rng_a).collect();
    assert_ne!(a, c);
}

#[test]
fn test_biased_randomisation_favours_front() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let items: Vec<usize> = (0..10).collect();

    let mut first_counts = [0usize; 10];
    for _ in 0..2000 {
        let first = quasi_geometric(items.clone(), 0.3, &mut rng)
            .next()
            .unwrap();
        first_counts[first] += 1;
    }

    // P(first = 0) is about 0.31, P(first = 9) about 0.013
    assert!(first_counts[0] > 450);
    assert!(first_counts[0] > first_counts[9] * 5);
    for window in first_counts.windows(2).take(3) {
        assert!(window[0] > window[1]);
    }
}

#[test]
fn test_candidates_pass_through() {
    let problem = create_test_problem();
    let list = savings_list(problem.arcs());
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let config = Config::new();
    let sequence: Vec<usize> = candidates(&list, &config, &mut rng).collect();
    assert_eq!(sequence, list);
}

fn reversed<'r>(
    candidates: Vec<usize>,
    _beta: f64,
    _rng: &'r mut dyn RngCore,
) -> Box<dyn Iterator<Item = usize> + 'r> {
    Box::new(candidates.into_iter().rev())
}

#[test]
fn test_candidates_custom_strategy() {
    let problem = create_test_problem();
    let list = savings_list(problem.arcs());
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let config = Config::new().with_biased(true).with_biased_func(reversed);
    let sequence: Vec<usize> = candidates(&list, &config, &mut rng).collect();
    let expected: Vec<usize> = list.iter().rev().copied().collect();
    assert_eq!(sequence, expected);

    // The strategy is only consulted in biased mode
    let greedy = config.with_biased(false);
    let sequence: Vec<usize> = candidates(&list, &greedy, &mut rng).collect();
    assert_eq!(sequence, list);
}
