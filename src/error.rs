//! Error type shared by graph construction, configuration and the traversal drivers.
//!
//! Every variant is raised before any worker thread is spawned. Broken internal
//! invariants are not represented here: they are assertion failures.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors reported by the public API.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured worker count was zero.
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    /// A source or destination node does not exist.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node id.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// An edge endpoint does not exist.
    #[error("edge {from}->{to} is out of bounds for a graph with {node_count} nodes")]
    EdgeOutOfBounds {
        /// Edge origin.
        from: NodeId,
        /// Edge target.
        to: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// A connected graph on `nodes` nodes needs at least `nodes - 1` edges.
    #[error("a connected graph with {nodes} nodes needs at least {} edges, got {edges}", .nodes.saturating_sub(1))]
    TooFewEdges {
        /// Requested node count.
        nodes: usize,
        /// Requested edge count.
        edges: usize,
    },

    /// More edges were requested than distinct node pairs can provide.
    #[error("a graph with {nodes} nodes admits at most {max} edges, got {edges}")]
    TooManyEdges {
        /// Requested node count.
        nodes: usize,
        /// Requested edge count.
        edges: usize,
        /// Largest admissible edge count.
        max: usize,
    },

    /// Random weights are drawn from `0..max_weight`, which must not be empty.
    #[error("max_weight must be at least 1")]
    ZeroMaxWeight,

    /// The graph still carries the results of a previous run.
    #[error("graph still holds a traversal from node {node}; call reset_traversal_state first")]
    StaleState {
        /// Source of the run that was never reset.
        node: NodeId,
    },

    /// A configuration document could not be parsed.
    #[error("invalid traversal configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
