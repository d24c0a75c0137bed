//! Ready-made node and edge types for callers that do not bring their own,
//! and a builder for Euclidean instances with classic savings.

use crate::error::CwsError;
use crate::problem::{EdgeLike, NodeId, NodeLike, Vertex};
use crate::ClarkeWrightSavings;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// A customer with a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicNode {
    pub id: NodeId,
    pub location: (f64, f64),
}

impl NodeLike for BasicNode {
    fn id(&self) -> NodeId {
        self.id
    }
}

/// A directed edge with its saving and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicEdge {
    pub origin: Vertex,
    pub destination: Vertex,
    pub saving: f64,
    pub cost: f64,
}

impl BasicEdge {
    pub fn new(origin: Vertex, destination: Vertex, saving: f64, cost: f64) -> Self {
        BasicEdge {
            origin,
            destination,
            saving,
            cost,
        }
    }
}

impl EdgeLike for BasicEdge {
    fn origin(&self) -> Vertex {
        self.origin
    }

    fn destination(&self) -> Vertex {
        self.destination
    }

    fn saving(&self) -> f64 {
        self.saving
    }

    fn cost(&self) -> f64 {
        self.cost
    }
}

/// A complete instance description, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub nodes: Vec<BasicNode>,
    pub edges: Vec<BasicEdge>,
}

impl Instance {
    /// Load an instance from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build a solver for this instance.
    pub fn solver(&self) -> Result<ClarkeWrightSavings, CwsError> {
        ClarkeWrightSavings::new(&self.nodes, &self.edges)
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Symmetric Euclidean instance with customers numbered from 0 in the order
/// given. Every ordered customer pair gets an edge with saving
/// `c(i, depot) + c(depot, j) - c(i, j)`; depot edges carry no saving.
pub fn euclidean_instance(depot: (f64, f64), locations: &[(f64, f64)]) -> Instance {
    let nodes: Vec<BasicNode> = locations
        .iter()
        .enumerate()
        .map(|(id, &location)| BasicNode { id, location })
        .collect();

    let mut edges = Vec::with_capacity(locations.len() * (locations.len() + 1));
    for node in &nodes {
        let cost = distance(depot, node.location);
        let customer = Vertex::Customer(node.id);
        edges.push(BasicEdge::new(Vertex::Depot, customer, 0.0, cost));
        edges.push(BasicEdge::new(customer, Vertex::Depot, 0.0, cost));
    }

    for (a, b) in nodes.iter().tuple_combinations() {
        let cost = distance(a.location, b.location);
        let saving = distance(a.location, depot) + distance(depot, b.location) - cost;
        let (i, j) = (Vertex::Customer(a.id), Vertex::Customer(b.id));
        edges.push(BasicEdge::new(i, j, saving, cost));
        edges.push(BasicEdge::new(j, i, saving, cost));
    }

    Instance { nodes, edges }
}

/// Euclidean instance with the depot at the origin and customers on an
/// integer grid in `[0, 100]^2`.
pub fn random_instance<R: Rng + ?Sized>(customers: usize, rng: &mut R) -> Instance {
    let locations: Vec<(f64, f64)> = (0..customers)
        .map(|_| {
            (
                rng.gen_range(0..=100) as f64,
                rng.gen_range(0..=100) as f64,
            )
        })
        .collect();
    euclidean_instance((0.0, 0.0), &locations)
}
