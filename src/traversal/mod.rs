//! Shortest-path drivers.
//!
//! | Driver | Queue | Threads |
//! |--------|-------|---------|
//! | [`sequential_shortest_path`] | `BinaryHeap` / `VecDeque` | caller |
//! | [`parallel_shortest_path`] | [`MultiQueue`](crate::queue::MultiQueue) | `config.workers` |
//!
//! Every driver writes its results into the graph's per-node state. Call
//! [`Graph::reset_traversal_state`] between runs; a driver handed a graph
//! that already served a run since the last reset fails with
//! [`Error::StaleState`](crate::Error::StaleState).

mod parallel;
mod relax;
mod sequential;

pub use relax::first_improvable_edge;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{QueueDiscipline, TraversalConfig};
use crate::error::Result;
use crate::graph::{Edge, Graph, NodeId};
use crate::queue::{FifoDiscipline, HeapDiscipline, IntrusiveDiscipline};

/// What a traversal computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Weighted shortest paths.
    Dijkstra,
    /// Hop counts; edge weights are ignored.
    Bfs,
}

impl Algorithm {
    /// Cost of traversing `edge` under this algorithm.
    #[inline]
    pub fn edge_cost(self, edge: &Edge) -> u64 {
        match self {
            Self::Dijkstra => u64::from(edge.weight),
            Self::Bfs => 1,
        }
    }
}

fn validate(graph: &Graph, source: NodeId, destination: NodeId) -> Result<()> {
    graph.check_node(source)?;
    graph.check_node(destination)?;
    graph.claim(source)
}

/// Runs a single-threaded traversal from `source` and returns the distance
/// of `destination`, or [`INFINITY`](crate::INFINITY) if it is unreachable.
///
/// # Errors
///
/// Returns [`Error::NodeOutOfBounds`](crate::Error::NodeOutOfBounds) for an
/// invalid endpoint and [`Error::StaleState`](crate::Error::StaleState) if
/// the graph was not reset since the previous run.
pub fn sequential_shortest_path(
    graph: &Graph,
    algorithm: Algorithm,
    source: NodeId,
    destination: NodeId,
) -> Result<u64> {
    validate(graph, source, destination)?;
    match algorithm {
        Algorithm::Dijkstra => sequential::dijkstra(graph, source),
        Algorithm::Bfs => sequential::bfs(graph, source),
    }
    Ok(graph.distance(destination))
}

/// Runs a multi-threaded traversal from `source` and returns the distance of
/// `destination`, or [`INFINITY`](crate::INFINITY) if it is unreachable.
///
/// Every worker has joined before this returns, so the whole graph holds
/// final distances afterwards.
///
/// ```
/// use multiqueue_sssp::{build_graph, parallel_shortest_path, Algorithm, TraversalConfig};
///
/// let graph = build_graph(3, [(0, 1, 4), (1, 2, 4), (0, 2, 10)])?;
/// let config = TraversalConfig::default().with_workers(2);
/// assert_eq!(parallel_shortest_path(&graph, Algorithm::Dijkstra, 0, 2, &config)?, 8);
/// # Ok::<(), multiqueue_sssp::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::ZeroWorkers`](crate::Error::ZeroWorkers) if the config
/// asks for no workers, plus the errors of [`sequential_shortest_path`].
/// Nothing is spawned when an error is returned.
pub fn parallel_shortest_path(
    graph: &Graph,
    algorithm: Algorithm,
    source: NodeId,
    destination: NodeId,
    config: &TraversalConfig,
) -> Result<u64> {
    let workers = config.worker_count()?;
    validate(graph, source, destination)?;

    let processed = match (algorithm, config.discipline) {
        (Algorithm::Dijkstra, QueueDiscipline::NonIntrusive) => {
            parallel::run::<HeapDiscipline>(graph, algorithm, source, workers, config.seed)
        }
        (Algorithm::Bfs, QueueDiscipline::NonIntrusive) => {
            parallel::run::<FifoDiscipline>(graph, algorithm, source, workers, config.seed)
        }
        (_, QueueDiscipline::Intrusive) => {
            parallel::run::<IntrusiveDiscipline>(graph, algorithm, source, workers, config.seed)
        }
    };

    let distance = graph.distance(destination);
    debug!(destination, distance, processed, "shortest path resolved");
    Ok(distance)
}

/// Sequential weighted shortest path.
///
/// # Errors
///
/// See [`sequential_shortest_path`].
pub fn dijkstra_sequential(graph: &Graph, source: NodeId, destination: NodeId) -> Result<u64> {
    sequential_shortest_path(graph, Algorithm::Dijkstra, source, destination)
}

/// Sequential hop count.
///
/// # Errors
///
/// See [`sequential_shortest_path`].
pub fn bfs_sequential(graph: &Graph, source: NodeId, destination: NodeId) -> Result<u64> {
    sequential_shortest_path(graph, Algorithm::Bfs, source, destination)
}

/// Parallel weighted shortest path.
///
/// # Errors
///
/// See [`parallel_shortest_path`].
pub fn dijkstra_parallel(
    graph: &Graph,
    source: NodeId,
    destination: NodeId,
    config: &TraversalConfig,
) -> Result<u64> {
    parallel_shortest_path(graph, Algorithm::Dijkstra, source, destination, config)
}

/// Parallel hop count.
///
/// # Errors
///
/// See [`parallel_shortest_path`].
pub fn bfs_parallel(graph: &Graph, source: NodeId, destination: NodeId, config: &TraversalConfig) -> Result<u64> {
    parallel_shortest_path(graph, Algorithm::Bfs, source, destination, config)
}
