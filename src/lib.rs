//! # `multiqueue-sssp` - Parallel shortest paths over a sharded priority queue
//!
//! Single-source shortest paths (Dijkstra) and breadth-first search on
//! shared-memory multicore machines. Worker threads share one distributed
//! priority queue, relax edges with lock-free compare-and-exchange on
//! per-node distances, and stop through a quiescence protocol instead of a
//! barrier per round.
//!
//! ## Architecture
//!
//! 1. **Graph** ([`graph`]): frozen adjacency lists; every node carries its
//!    atomic traversal state (distance, settled watermark, processed count,
//!    intrusive queue slot).
//! 2. **Queues** ([`queue`]): [`MultiQueue`](queue::MultiQueue) with `2W`
//!    spin-locked shards and two-choice extraction, generic over a
//!    [`Discipline`](queue::Discipline):
//!    - non-intrusive binary heap (duplicates filtered when popped),
//!    - intrusive binary heap (one slot per node, decrease-key),
//!    - level FIFO for BFS.
//! 3. **Synchronisation** ([`concurrency`]): spin locks and the idle-count
//!    termination detector.
//! 4. **Drivers** ([`traversal`]): a sequential oracle and the parallel
//!    worker pool.
//!
//! ## Example
//!
//! ```
//! use multiqueue_sssp::{build_graph, dijkstra_parallel, dijkstra_sequential, TraversalConfig};
//!
//! let mut graph = build_graph(4, [(0, 1, 1), (1, 2, 1), (0, 2, 5), (2, 3, 2)])?;
//! let config = TraversalConfig::default().with_workers(4);
//!
//! assert_eq!(dijkstra_parallel(&graph, 0, 3, &config)?, 4);
//! graph.reset_traversal_state();
//! assert_eq!(dijkstra_sequential(&graph, 0, 3)?, 4);
//! # Ok::<(), multiqueue_sssp::Error>(())
//! ```
//!
//! ## Logging
//!
//! Run boundaries are reported through [`tracing`] at `debug` level and
//! per-worker summaries at `trace` level. No subscriber is installed here.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod queue;
pub mod traversal;

pub use config::{QueueDiscipline, TraversalConfig};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph, GraphBuilder, Node, NodeId, INFINITY};
pub use traversal::{
    bfs_parallel, bfs_sequential, dijkstra_parallel, dijkstra_sequential, first_improvable_edge,
    parallel_shortest_path, sequential_shortest_path, Algorithm,
};

// Compile-time layout checks
const _: () = {
    use core::mem;

    // Adjacency stays two words per edge.
    assert!(mem::size_of::<Edge>() <= 2 * mem::size_of::<usize>());

    // A node lock is a single byte.
    assert!(mem::size_of::<concurrency::SpinLock>() == 1);

    // Unreachable is the largest representable distance.
    assert!(INFINITY == u64::MAX);
};
