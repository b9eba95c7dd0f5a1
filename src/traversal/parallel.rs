//! The parallel driver: a fixed pool of spin-polling workers around one
//! [`MultiQueue`].
//!
//! Every worker runs the same loop:
//!
//! 1. poll the queue; on an empty poll consult the [`TerminationDetector`]
//!    and either exit or back off and poll again;
//! 2. read the popped node's current distance and, for disciplines that allow
//!    duplicates, claim it through the settled watermark (stale copies fail);
//! 3. relax its edges, inserting every improved neighbour.
//!
//! Workers start together on a barrier and the scope join is the finish
//! rendezvous: results are read only after every worker has returned.

use std::sync::Barrier;
use std::thread;

use crossbeam_utils::Backoff;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::relax::relax_edges;
use super::Algorithm;
use crate::concurrency::TerminationDetector;
use crate::graph::{Graph, NodeId};
use crate::queue::{Discipline, MultiQueue};

/// Spreads per-worker seeds so neighbouring streams do not correlate.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

fn stream_rng(seed: Option<u64>, stream: usize) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed ^ SEED_STRIDE.wrapping_mul(stream as u64 + 1)),
        None => SmallRng::from_entropy(),
    }
}

/// Runs a traversal from `source` with `workers` threads over discipline `D`.
///
/// Returns the number of node processings performed.
pub(crate) fn run<D: Discipline>(
    graph: &Graph,
    algorithm: Algorithm,
    source: NodeId,
    workers: usize,
    seed: Option<u64>,
) -> u64 {
    let queue = MultiQueue::<D>::new(graph, workers);
    let detector = TerminationDetector::new(workers);
    let start = Barrier::new(workers);

    debug!(
        ?algorithm,
        discipline = D::NAME,
        workers,
        shards = queue.shard_count(),
        source,
        "starting parallel traversal"
    );

    graph.node(source).store_distance(0);
    queue.insert(source, 0, &mut stream_rng(seed, workers));

    let processed: u64 = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let (queue, detector, start) = (&queue, &detector, &start);
                let mut rng = stream_rng(seed, worker);
                scope.spawn(move || {
                    start.wait();
                    let processed = work(graph, algorithm, queue, detector, &mut rng);
                    trace!(worker, processed, "worker finished");
                    processed
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .sum()
    });

    debug_assert!(queue.is_empty(), "workers exited with work still queued");
    debug_assert_eq!(
        detector.idle_workers(),
        detector.workers(),
        "a worker exited without being counted idle"
    );
    debug!(processed, "parallel traversal finished");
    processed
}

fn work<D: Discipline>(
    graph: &Graph,
    algorithm: Algorithm,
    queue: &MultiQueue<'_, D>,
    detector: &TerminationDetector,
    rng: &mut SmallRng,
) -> u64 {
    let mut state = detector.worker();
    let backoff = Backoff::new();
    let mut processed = 0;

    loop {
        let Some(node) = queue.extract_min(rng) else {
            if state.poll_failed() {
                debug_assert!(state.is_waiting());
                break;
            }
            backoff.snooze();
            continue;
        };
        state.poll_succeeded();
        backoff.reset();

        let current = graph.node(node);
        let distance = current.distance();
        if D::ALLOWS_DUPLICATES && !current.try_settle(distance) {
            continue;
        }
        current.record_processed();
        processed += 1;

        relax_edges(graph, algorithm, node, distance, |target, candidate| {
            queue.insert(target, candidate, rng);
        });
    }

    processed
}
