//! Property tests: parallel traversals agree with the sequential oracle on
//! arbitrary small graphs.

mod common;

use common::petgraph_distances;
use multiqueue_sssp::{
    build_graph, first_improvable_edge, parallel_shortest_path, sequential_shortest_path, Algorithm, Graph,
    NodeId, QueueDiscipline, TraversalConfig, INFINITY,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Case {
    nodes: usize,
    edges: Vec<(NodeId, NodeId, u32)>,
    source: NodeId,
}

fn arb_case() -> impl Strategy<Value = Case> {
    (1usize..40).prop_flat_map(|nodes| {
        (
            Just(nodes),
            proptest::collection::vec((0..nodes, 0..nodes, 0u32..50), 0..nodes * 4),
            0..nodes,
        )
            .prop_map(|(nodes, edges, source)| Case { nodes, edges, source })
    })
}

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::Dijkstra), Just(Algorithm::Bfs)]
}

fn arb_config() -> impl Strategy<Value = TraversalConfig> {
    (
        1usize..=8,
        prop_oneof![Just(QueueDiscipline::NonIntrusive), Just(QueueDiscipline::Intrusive)],
        any::<u64>(),
    )
        .prop_map(|(workers, discipline, seed)| {
            TraversalConfig::default()
                .with_workers(workers)
                .with_discipline(discipline)
                .with_seed(seed)
        })
}

fn build(case: &Case) -> Graph {
    build_graph(case.nodes, case.edges.iter().copied()).expect("generated edges are in bounds")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_matches_sequential(case in arb_case(), algorithm in arb_algorithm(), config in arb_config()) {
        let mut graph = build(&case);
        let destination = case.nodes - 1;

        let expected = sequential_shortest_path(&graph, algorithm, case.source, destination).unwrap();
        let oracle = graph.distances();
        graph.reset_traversal_state();

        let got = parallel_shortest_path(&graph, algorithm, case.source, destination, &config).unwrap();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(graph.distances(), oracle);
        prop_assert_eq!(first_improvable_edge(&graph, algorithm), None);
    }

    #[test]
    fn sequential_dijkstra_matches_petgraph(case in arb_case()) {
        let graph = build(&case);
        sequential_shortest_path(&graph, Algorithm::Dijkstra, case.source, case.source).unwrap();
        prop_assert_eq!(graph.distances(), petgraph_distances(&graph, case.source));
    }

    #[test]
    fn reset_restores_a_fresh_graph(case in arb_case(), config in arb_config()) {
        let mut graph = build(&case);
        parallel_shortest_path(&graph, Algorithm::Dijkstra, case.source, case.source, &config).unwrap();
        prop_assert_eq!(graph.distance(case.source), 0);

        graph.reset_traversal_state();
        graph.reset_traversal_state();
        prop_assert!(graph.distances().iter().all(|&d| d == INFINITY));
        prop_assert_eq!(graph.processed_total(), 0);
        prop_assert!(graph.nodes().iter().all(|n| n.last_settled() == INFINITY));
    }
}
