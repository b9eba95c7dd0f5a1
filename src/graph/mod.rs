//! Immutable adjacency-list graphs carrying concurrent traversal state.
//!
//! The adjacency is frozen when the [`Graph`] is built. Only the per-node
//! distance, settled watermark, processed counter and intrusive queue slot
//! change during a traversal, and [`Graph::reset_traversal_state`] puts them
//! back between runs.

mod builder;
pub mod generator;
mod node;

pub use builder::{build_graph, GraphBuilder};
pub use node::{Edge, Node, NodeId, INFINITY};

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A directed, weighted graph reused across traversals.
#[derive(Debug)]
pub struct Graph {
    nodes: Box<[Node]>,
    edge_count: usize,
    /// Source of the run whose state the nodes carry, `NO_SOURCE` when fresh.
    last_source: AtomicUsize,
}

const NO_SOURCE: usize = usize::MAX;

impl Graph {
    pub(crate) fn from_parts(nodes: Vec<Node>, edge_count: usize) -> Self {
        Self {
            nodes: nodes.into_boxed_slice(),
            edge_count,
            last_source: AtomicUsize::new(NO_SOURCE),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the node with the given id, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Current distance of `id` from the last traversal's source.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn distance(&self, id: NodeId) -> u64 {
        self.nodes[id].distance()
    }

    /// Snapshot of every node's distance.
    pub fn distances(&self) -> Vec<u64> {
        self.nodes.iter().map(Node::distance).collect()
    }

    /// Total number of node processings in the last traversal.
    pub fn processed_total(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.processed())).sum()
    }

    /// Processings per node: 1.0 for a traversal that processed every node
    /// exactly once, higher when parallel workers redid work.
    #[allow(clippy::cast_precision_loss)]
    pub fn overhead(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.processed_total() as f64 / self.nodes.len() as f64
    }

    /// Puts every node back to its pre-traversal state.
    ///
    /// Taking `&mut self` guarantees no traversal is running. Calling this twice
    /// is the same as calling it once.
    pub fn reset_traversal_state(&mut self) {
        #[cfg(feature = "parallel")]
        self.nodes.par_iter_mut().for_each(Node::reset);
        #[cfg(not(feature = "parallel"))]
        self.nodes.iter_mut().for_each(Node::reset);
        *self.last_source.get_mut() = NO_SOURCE;
    }

    /// Source of the traversal whose results the graph currently holds, if
    /// any ran since the last reset.
    pub fn last_source(&self) -> Option<NodeId> {
        match self.last_source.load(Ordering::Acquire) {
            NO_SOURCE => None,
            source => Some(source),
        }
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::NodeOutOfBounds {
                node,
                node_count: self.nodes.len(),
            })
        }
    }

    /// Marks the graph as used by a traversal from `source`.
    ///
    /// Fails if a run already claimed it since the last reset, whichever
    /// nodes that run reached. Exactly one of two concurrent claims succeeds.
    pub(crate) fn claim(&self, source: NodeId) -> Result<()> {
        match self
            .last_source
            .compare_exchange(NO_SOURCE, source, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(()),
            Err(previous) => Err(Error::StaleState { node: previous }),
        }
    }
}
