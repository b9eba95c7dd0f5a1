//! Construction of immutable [`Graph`]s from edge lists.

use super::{Edge, Graph, Node, NodeId};
use crate::error::{Error, Result};

/// Accumulates edges, then freezes them into a [`Graph`].
///
/// The adjacency of the built graph never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl GraphBuilder {
    /// Starts a graph with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges added so far.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Adds the directed edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeOutOfBounds`] if either endpoint does not exist.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> Result<&mut Self> {
        let node_count = self.node_count();
        if from >= node_count || to >= node_count {
            return Err(Error::EdgeOutOfBounds { from, to, node_count });
        }
        self.adjacency[from].push(Edge::new(to, weight));
        self.edge_count += 1;
        Ok(self)
    }

    /// Adds `a -> b` and `b -> a` with the same weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeOutOfBounds`] if either endpoint does not exist.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: u32) -> Result<&mut Self> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Returns `true` if some edge `from -> to` was added.
    ///
    /// Linear in the out-degree of `from`.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|edges| edges.iter().any(|e| e.target == to))
    }

    /// Freezes the adjacency lists into a graph with fresh traversal state.
    pub fn build(self) -> Graph {
        let nodes = self.adjacency.into_iter().map(Node::new).collect();
        Graph::from_parts(nodes, self.edge_count)
    }
}

/// Builds a graph with `node_count` nodes from `(from, to, weight)` triples.
///
/// ```
/// use multiqueue_sssp::build_graph;
///
/// let graph = build_graph(3, [(0, 1, 4), (1, 2, 1)]).unwrap();
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::EdgeOutOfBounds`] for the first edge naming a missing node.
pub fn build_graph<I>(node_count: usize, edges: I) -> Result<Graph>
where
    I: IntoIterator<Item = (NodeId, NodeId, u32)>,
{
    let mut builder = GraphBuilder::new(node_count);
    for (from, to, weight) in edges {
        builder.add_edge(from, to, weight)?;
    }
    Ok(builder.build())
}
