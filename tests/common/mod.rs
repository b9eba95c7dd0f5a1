//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use multiqueue_sssp::{build_graph, Graph, NodeId, QueueDiscipline, TraversalConfig, INFINITY};
use petgraph::graph::{DiGraph, NodeIndex};

/// Worker counts every parallel scenario is checked with.
pub const WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];

/// Both queue disciplines.
pub const DISCIPLINES: [QueueDiscipline; 2] = [QueueDiscipline::NonIntrusive, QueueDiscipline::Intrusive];

pub const A: NodeId = 0;
pub const B: NodeId = 1;
pub const C: NodeId = 2;
pub const D: NodeId = 3;
pub const E: NodeId = 4;

/// a→b(2), a→d(1), b→c(4), b→e(5), c→e(1), d→c(3).
pub fn five_node_graph() -> Graph {
    build_graph(5, [(A, B, 2), (A, D, 1), (B, C, 4), (B, E, 5), (C, E, 1), (D, C, 3)])
        .expect("five-node graph is valid")
}

/// Every `(workers, discipline)` combination with a fixed seed.
pub fn configs() -> impl Iterator<Item = TraversalConfig> {
    WORKER_COUNTS.into_iter().flat_map(|workers| {
        DISCIPLINES.into_iter().map(move |discipline| {
            TraversalConfig::default()
                .with_workers(workers)
                .with_discipline(discipline)
                .with_seed(0x5EED ^ workers as u64)
        })
    })
}

/// Single-source distances computed by petgraph, independent of this crate.
pub fn petgraph_distances(graph: &Graph, source: NodeId) -> Vec<u64> {
    let mut reference = DiGraph::<(), u64>::with_capacity(graph.node_count(), graph.edge_count());
    for _ in 0..graph.node_count() {
        reference.add_node(());
    }
    for (from, node) in graph.nodes().iter().enumerate() {
        for edge in node.edges() {
            reference.add_edge(NodeIndex::new(from), NodeIndex::new(edge.target), u64::from(edge.weight));
        }
    }

    let reached = petgraph::algo::dijkstra(&reference, NodeIndex::new(source), None, |e| *e.weight());
    (0..graph.node_count())
        .map(|node| reached.get(&NodeIndex::new(node)).copied().unwrap_or(INFINITY))
        .collect()
}
