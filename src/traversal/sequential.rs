//! Single-threaded reference traversals.
//!
//! These are the correctness oracle for the parallel drivers and the
//! baseline for timing. They write into the same per-node state, so the
//! graph must be reset before and after.

use core::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use super::relax::relax_edges;
use super::Algorithm;
use crate::graph::{Graph, NodeId};

/// Classic Dijkstra with lazy deletion: stale heap entries are skipped by the
/// settled-distance check.
pub(crate) fn dijkstra(graph: &Graph, source: NodeId) {
    let mut heap = BinaryHeap::new();
    graph.node(source).store_distance(0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((distance, node))) = heap.pop() {
        let current = graph.node(node);
        if !current.try_settle(distance) {
            continue;
        }
        current.record_processed();
        relax_edges(graph, Algorithm::Dijkstra, node, distance, |target, candidate| {
            heap.push(Reverse((candidate, target)));
        });
    }
}

/// Level-by-level BFS; the first discovery of a node is final.
pub(crate) fn bfs(graph: &Graph, source: NodeId) {
    let mut queue = VecDeque::new();
    graph.node(source).store_distance(0);
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let current = graph.node(node);
        current.record_processed();
        relax_edges(graph, Algorithm::Bfs, node, current.distance(), |target, _| {
            queue.push_back(target);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, INFINITY};

    #[test]
    fn dijkstra_processes_each_reachable_node_once() {
        let mut graph = build_graph(4, [(0, 1, 5), (0, 2, 1), (2, 1, 1), (1, 0, 1)]).unwrap();
        dijkstra(&graph, 0);
        assert_eq!(graph.distances(), vec![0, 2, 1, INFINITY]);
        assert_eq!(graph.processed_total(), 3);

        graph.reset_traversal_state();
        dijkstra(&graph, 3);
        assert_eq!(graph.distances(), vec![INFINITY, INFINITY, INFINITY, 0]);
    }

    #[test]
    fn bfs_counts_hops() {
        let graph = build_graph(4, [(0, 1, 9), (1, 2, 9), (0, 2, 100), (2, 3, 0)]).unwrap();
        bfs(&graph, 0);
        assert_eq!(graph.distances(), vec![0, 1, 1, 2]);
        assert_eq!(graph.processed_total(), 4);
    }
}
