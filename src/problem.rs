//! Problem definition: the capability traits callers implement for their
//! nodes and edges, and the validated, indexed instance the solver works on.

use crate::error::CwsError;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Caller-assigned node identifier.
pub type NodeId = usize;

/// An edge endpoint: the shared depot or a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vertex {
    Depot,
    Customer(NodeId),
}

impl Vertex {
    /// The customer id, or `None` for the depot.
    pub fn customer(self) -> Option<NodeId> {
        match self {
            Vertex::Depot => None,
            Vertex::Customer(id) => Some(id),
        }
    }

    pub fn is_depot(self) -> bool {
        self == Vertex::Depot
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Depot => write!(f, "depot"),
            Vertex::Customer(id) => write!(f, "{}", id),
        }
    }
}

/// What the solver needs from a caller's customer type.
///
/// The depot-departure and depot-return edges of a node are resolved through
/// the edge collection by their `(Depot, node)` and `(node, Depot)` keys.
pub trait NodeLike {
    fn id(&self) -> NodeId;
}

/// What the solver needs from a caller's arc type.
///
/// The inverse of an edge is the edge with swapped origin and destination; it
/// must be present in the same collection but may carry a different saving and
/// cost.
pub trait EdgeLike {
    fn origin(&self) -> Vertex;
    fn destination(&self) -> Vertex;
    fn saving(&self) -> f64;
    fn cost(&self) -> f64;
}

/// A validated copy of a caller edge. Customers are re-indexed densely
/// (`0..customer_count`) in the order the nodes were supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub origin: Vertex,
    pub destination: Vertex,
    pub saving: f64,
    pub cost: f64,
}

impl Arc {
    /// Only customer-to-customer arcs can join two routes.
    pub fn is_saving_candidate(&self) -> bool {
        !self.origin.is_depot() && !self.destination.is_depot()
    }
}

/// A validated savings instance.
#[derive(Debug, Clone)]
pub struct Problem {
    node_ids: Vec<NodeId>,
    arcs: Vec<Arc>,
    inverse: Vec<usize>,
    departure: Vec<usize>,
    arrival: Vec<usize>,
    graph: DiGraphMap<Vertex, usize>,
}

impl Problem {
    /// Validate and index caller-supplied nodes and edges.
    ///
    /// Fails on the first structural error found: duplicate node ids, self
    /// loops, edges touching unknown nodes, duplicate edges, non-finite or
    /// negative values, missing inverse edges and missing depot edges.
    pub fn new<N: NodeLike, E: EdgeLike>(nodes: &[N], edges: &[E]) -> Result<Self, CwsError> {
        let mut index_of = HashMap::with_capacity(nodes.len());
        let mut node_ids = Vec::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id();
            if index_of.insert(id, node_ids.len()).is_some() {
                return Err(CwsError::DuplicateNode(id));
            }
            node_ids.push(id);
        }

        let mut graph = DiGraphMap::with_capacity(nodes.len() + 1, edges.len());
        let mut arcs = Vec::with_capacity(edges.len());

        for edge in edges {
            let (origin, destination) = (edge.origin(), edge.destination());
            if origin == destination {
                return Err(CwsError::SelfLoop(origin, destination));
            }

            let unknown = |node| CwsError::UnknownNode {
                origin,
                destination,
                node,
            };
            let from = Self::reindex(origin, &index_of).map_err(unknown)?;
            let to = Self::reindex(destination, &index_of).map_err(unknown)?;

            if graph.add_edge(from, to, arcs.len()).is_some() {
                return Err(CwsError::DuplicateEdge(origin, destination));
            }

            let (saving, cost) = (edge.saving(), edge.cost());
            if !saving.is_finite() || !cost.is_finite() || cost < 0.0 {
                return Err(CwsError::InvalidEdgeValue {
                    origin,
                    destination,
                    saving,
                    cost,
                });
            }

            arcs.push(Arc {
                origin: from,
                destination: to,
                saving,
                cost,
            });
        }

        let mut inverse = Vec::with_capacity(arcs.len());
        for arc in &arcs {
            match graph.edge_weight(arc.destination, arc.origin) {
                Some(&idx) => inverse.push(idx),
                None => {
                    return Err(CwsError::MissingInverse(
                        Self::external(arc.origin, &node_ids),
                        Self::external(arc.destination, &node_ids),
                    ))
                }
            }
        }

        let mut departure = Vec::with_capacity(node_ids.len());
        let mut arrival = Vec::with_capacity(node_ids.len());
        for (i, &id) in node_ids.iter().enumerate() {
            let out = graph
                .edge_weight(Vertex::Depot, Vertex::Customer(i))
                .ok_or(CwsError::MissingDeparture(id))?;
            let back = graph
                .edge_weight(Vertex::Customer(i), Vertex::Depot)
                .ok_or(CwsError::MissingArrival(id))?;
            departure.push(*out);
            arrival.push(*back);
        }

        Ok(Problem {
            node_ids,
            arcs,
            inverse,
            departure,
            arrival,
            graph,
        })
    }

    fn reindex(vertex: Vertex, index_of: &HashMap<NodeId, usize>) -> Result<Vertex, NodeId> {
        match vertex {
            Vertex::Depot => Ok(Vertex::Depot),
            Vertex::Customer(id) => index_of
                .get(&id)
                .map(|&idx| Vertex::Customer(idx))
                .ok_or(id),
        }
    }

    fn external(vertex: Vertex, node_ids: &[NodeId]) -> Vertex {
        match vertex {
            Vertex::Depot => Vertex::Depot,
            Vertex::Customer(idx) => Vertex::Customer(node_ids[idx]),
        }
    }

    /// Number of customers (the depot is not counted).
    pub fn customer_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Caller id of a dense customer index.
    pub fn node_id(&self, customer: usize) -> NodeId {
        self.node_ids[customer]
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Translate a dense vertex back to caller ids.
    pub fn to_external(&self, vertex: Vertex) -> Vertex {
        Self::external(vertex, &self.node_ids)
    }

    pub fn arc(&self, edge: usize) -> &Arc {
        &self.arcs[edge]
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// The edge with swapped origin and destination.
    pub fn inverse(&self, edge: usize) -> usize {
        self.inverse[edge]
    }

    /// Edge from the depot to a customer.
    pub fn departure(&self, customer: usize) -> usize {
        self.departure[customer]
    }

    /// Edge from a customer back to the depot.
    pub fn arrival(&self, customer: usize) -> usize {
        self.arrival[customer]
    }

    /// Edge index for a pair of dense vertices, if that edge exists.
    pub fn edge_between(&self, origin: Vertex, destination: Vertex) -> Option<usize> {
        self.graph.edge_weight(origin, destination).copied()
    }
}
