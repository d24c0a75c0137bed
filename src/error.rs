//! Error types for the savings heuristic.

use crate::problem::{NodeId, Vertex};
use thiserror::Error;

/// Failures detected while setting up or configuring a solve.
///
/// Infeasible merges are not errors: the merge engine skips them silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CwsError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("edge {0} -> {1} starts and ends at the same vertex")]
    SelfLoop(Vertex, Vertex),

    #[error("edge {origin} -> {destination} references unknown node {node}")]
    UnknownNode {
        origin: Vertex,
        destination: Vertex,
        node: NodeId,
    },

    #[error("duplicate edge {0} -> {1}")]
    DuplicateEdge(Vertex, Vertex),

    #[error("edge {origin} -> {destination} has invalid saving {saving} or cost {cost}")]
    InvalidEdgeValue {
        origin: Vertex,
        destination: Vertex,
        saving: f64,
        cost: f64,
    },

    #[error("edge {0} -> {1} has no inverse edge {1} -> {0}")]
    MissingInverse(Vertex, Vertex),

    #[error("node {0} has no depot-departure edge")]
    MissingDeparture(NodeId),

    #[error("node {0} has no depot-return edge")]
    MissingArrival(NodeId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("start solution does not partition the customers of this problem")]
    InvalidStart,
}
