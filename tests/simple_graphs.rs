//! Hand-checked scenarios run through every driver and configuration.

mod common;

use common::{configs, five_node_graph, A, B, C, D, E};
use multiqueue_sssp::graph::generator::random_tree;
use multiqueue_sssp::{
    bfs_parallel, bfs_sequential, build_graph, dijkstra_parallel, dijkstra_sequential, first_improvable_edge,
    Algorithm, Error, TraversalConfig, INFINITY,
};

const DIJKSTRA_QUERIES: [(usize, usize, u64); 4] = [(A, B, 2), (A, C, 4), (A, D, 1), (A, E, 5)];
const BFS_QUERIES: [(usize, usize, u64); 4] = [(A, B, 1), (D, E, 2), (A, E, 2), (B, E, 1)];

#[test]
fn five_node_dijkstra_sequential() -> anyhow::Result<()> {
    let mut graph = five_node_graph();
    for (source, destination, expected) in DIJKSTRA_QUERIES {
        assert_eq!(dijkstra_sequential(&graph, source, destination)?, expected);
        graph.reset_traversal_state();
    }
    Ok(())
}

#[test]
fn five_node_dijkstra_parallel() -> anyhow::Result<()> {
    let mut graph = five_node_graph();
    for config in configs() {
        for (source, destination, expected) in DIJKSTRA_QUERIES {
            assert_eq!(
                dijkstra_parallel(&graph, source, destination, &config)?,
                expected,
                "{source}->{destination} with {config:?}"
            );
            assert_eq!(first_improvable_edge(&graph, Algorithm::Dijkstra), None);
            graph.reset_traversal_state();
        }
    }
    Ok(())
}

#[test]
fn five_node_bfs_sequential() -> anyhow::Result<()> {
    let mut graph = five_node_graph();
    for (source, destination, expected) in BFS_QUERIES {
        assert_eq!(bfs_sequential(&graph, source, destination)?, expected);
        graph.reset_traversal_state();
    }
    Ok(())
}

#[test]
fn five_node_bfs_parallel() -> anyhow::Result<()> {
    let mut graph = five_node_graph();
    for config in configs() {
        for (source, destination, expected) in BFS_QUERIES {
            assert_eq!(
                bfs_parallel(&graph, source, destination, &config)?,
                expected,
                "{source}->{destination} with {config:?}"
            );
            graph.reset_traversal_state();
        }
    }
    Ok(())
}

#[test]
fn unreachable_destination_is_infinite() -> anyhow::Result<()> {
    let mut graph = five_node_graph();
    for config in configs() {
        assert_eq!(dijkstra_parallel(&graph, E, A, &config)?, INFINITY);
        assert_eq!(graph.distances(), vec![INFINITY, INFINITY, INFINITY, INFINITY, 0]);
        graph.reset_traversal_state();

        assert_eq!(bfs_parallel(&graph, C, D, &config)?, INFINITY);
        graph.reset_traversal_state();
    }
    Ok(())
}

#[test]
fn isolated_source_processes_only_itself() -> anyhow::Result<()> {
    let graph = build_graph(3, [(1, 2, 1)])?;
    let config = TraversalConfig::default().with_workers(4).with_seed(1);
    assert_eq!(dijkstra_parallel(&graph, 0, 0, &config)?, 0);
    assert_eq!(graph.processed_total(), 1);
    Ok(())
}

#[test]
fn zero_weight_edges_are_free() -> anyhow::Result<()> {
    let mut graph = build_graph(4, [(0, 1, 0), (1, 2, 0), (2, 3, 0), (0, 3, 1)])?;
    assert_eq!(dijkstra_sequential(&graph, 0, 3)?, 0);
    graph.reset_traversal_state();
    for config in configs() {
        assert_eq!(dijkstra_parallel(&graph, 0, 3, &config)?, 0);
        graph.reset_traversal_state();
    }
    Ok(())
}

#[test]
fn bfs_distance_on_a_tree_is_depth() -> anyhow::Result<()> {
    let (mut graph, depths) = random_tree(2_000, 50, 17)?;
    for config in configs() {
        for node in [1, 500, 1_999] {
            assert_eq!(bfs_parallel(&graph, 0, node, &config)?, depths[node]);
            assert_eq!(graph.distances(), depths);
            graph.reset_traversal_state();
        }
    }
    Ok(())
}

#[test]
fn requests_are_validated_before_running() {
    let mut graph = five_node_graph();

    let zero = TraversalConfig::default().with_workers(0);
    assert!(matches!(dijkstra_parallel(&graph, A, E, &zero), Err(Error::ZeroWorkers)));
    assert!(matches!(
        dijkstra_sequential(&graph, A, 9),
        Err(Error::NodeOutOfBounds { node: 9, node_count: 5 })
    ));
    assert!(graph.distances().iter().all(|&d| d == INFINITY));

    let config = TraversalConfig::default().with_workers(2);
    assert_eq!(dijkstra_parallel(&graph, A, E, &config).ok(), Some(5));
    assert!(matches!(
        bfs_parallel(&graph, A, E, &config),
        Err(Error::StaleState { node: A })
    ));
    graph.reset_traversal_state();
    assert_eq!(bfs_parallel(&graph, A, E, &config).ok(), Some(2));
}
