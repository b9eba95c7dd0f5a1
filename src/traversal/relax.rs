//! The edge relaxation rule shared by every driver.

use super::Algorithm;
use crate::graph::{Edge, Graph, NodeId};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Relaxes every outgoing edge of `node`, processed at `distance`.
///
/// For each edge the candidate `distance + cost` is offered to the target
/// through a compare-and-exchange loop. `enqueue(target, candidate)` runs
/// exactly once per successful lowering, after the new distance is visible.
#[inline]
pub(crate) fn relax_edges<F>(graph: &Graph, algorithm: Algorithm, node: NodeId, distance: u64, mut enqueue: F)
where
    F: FnMut(NodeId, u64),
{
    for edge in graph.node(node).edges() {
        let candidate = distance.saturating_add(algorithm.edge_cost(edge));
        if graph.node(edge.target).lower_distance(candidate) {
            enqueue(edge.target, candidate);
        }
    }
}

/// Finds an edge that could still lower its target's distance.
///
/// Returns `None` when the current distances are a fixed point of relaxation,
/// which is what every completed traversal must leave behind. Unreached
/// nodes are skipped.
pub fn first_improvable_edge(graph: &Graph, algorithm: Algorithm) -> Option<(NodeId, Edge)> {
    let improvable = |from: NodeId| {
        let distance = graph.distance(from);
        if distance == crate::graph::INFINITY {
            return None;
        }
        graph
            .node(from)
            .edges()
            .iter()
            .find(|edge| distance.saturating_add(algorithm.edge_cost(edge)) < graph.distance(edge.target))
            .map(|edge| (from, *edge))
    };

    #[cfg(feature = "parallel")]
    {
        (0..graph.node_count()).into_par_iter().find_map_any(improvable)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..graph.node_count()).find_map(improvable)
    }
}
