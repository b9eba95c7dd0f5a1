//! The sharded "multi-queue" shared by all workers of one run.
//!
//! `2W` shards for `W` workers, each behind its own spin lock. Insertion
//! touches one shard. Extraction samples two distinct shards uniformly at
//! random and pops from the one with the smaller front key, which keeps the
//! popped element close to the global minimum with O(1) expected work.
//!
//! A separate counter tracks how many shards are non-empty so that an empty
//! queue is detected without locking anything. It changes only on 0→1 and
//! 1→0 shard transitions, while the transitioning shard is locked.

use core::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use rand::Rng;

use super::Discipline;
use crate::concurrency::SpinMutex;
use crate::graph::{Graph, Node, NodeId};

/// Shards allocated per worker.
pub const SHARDS_PER_WORKER: usize = 2;

/// A distributed priority queue over the nodes of one graph.
pub struct MultiQueue<'g, D: Discipline> {
    nodes: &'g [Node],
    shards: Box<[CachePadded<SpinMutex<D::Shard>>]>,
    non_empty: CachePadded<AtomicUsize>,
}

impl<'g, D: Discipline> MultiQueue<'g, D> {
    /// Creates an empty queue sized for `workers` concurrent users.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    pub fn new(graph: &'g Graph, workers: usize) -> Self {
        assert!(workers != 0, "workers must be > 0");
        let shards = (0..workers * SHARDS_PER_WORKER)
            .map(|_| CachePadded::new(SpinMutex::new(D::Shard::default())))
            .collect();
        Self {
            nodes: graph.nodes(),
            shards,
            non_empty: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Number of shards.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Number of shards currently holding at least one entry.
    #[inline]
    pub fn non_empty_shards(&self) -> usize {
        self.non_empty.load(Ordering::Acquire)
    }

    /// Returns `true` if no shard holds an entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_empty_shards() == 0
    }

    /// Total number of entries. Locks every shard in turn, so the result is
    /// only exact while no other thread uses the queue.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| D::len(&shard.lock())).sum()
    }

    /// Inserts `node` under ordering key `key`.
    ///
    /// The target shard is the node's current owner when the discipline pins
    /// one, otherwise a uniformly random shard.
    pub fn insert<R: Rng + ?Sized>(&self, node: NodeId, key: u64, rng: &mut R) {
        loop {
            let index = D::preferred_shard(self.nodes, node)
                .unwrap_or_else(|| rng.gen_range(0..self.shards.len()));
            let mut shard = self.shards[index].lock();
            let was_empty = D::is_empty(&shard);
            if D::push(&mut shard, index, self.nodes, node, key) {
                if was_empty {
                    self.non_empty.fetch_add(1, Ordering::AcqRel);
                }
                return;
            }
            // Ownership moved between the hint and the locked re-check.
        }
    }

    /// Removes an element with a small key, or returns `None` once the whole
    /// queue is observed empty.
    ///
    /// The element is the minimum of two random shards, not necessarily the
    /// global minimum. Ties are broken arbitrarily.
    pub fn extract_min<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
        loop {
            if self.is_empty() {
                return None;
            }
            let (i, j) = self.sample_pair(rng);
            // Ascending index order rules out lock cycles between extractors.
            let mut first = self.shards[i].lock();
            let mut second = self.shards[j].lock();

            let (shard, index) = match (
                D::front_key(&first, self.nodes),
                D::front_key(&second, self.nodes),
            ) {
                (None, None) => continue,
                (Some(_), None) => (&mut *first, i),
                (None, Some(_)) => (&mut *second, j),
                (Some(a), Some(b)) if a <= b => (&mut *first, i),
                (Some(_), Some(_)) => (&mut *second, j),
            };

            if let Some(node) = D::pop(shard, index, self.nodes) {
                if D::is_empty(shard) {
                    self.non_empty.fetch_sub(1, Ordering::AcqRel);
                }
                return Some(node);
            }
        }
    }

    /// Two distinct shard indices, lower first.
    #[inline]
    fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let n = self.shards.len();
        loop {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            if a != b {
                return (a.min(b), a.max(b));
            }
        }
    }
}

impl<D: Discipline> core::fmt::Debug for MultiQueue<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiQueue")
            .field("discipline", &D::NAME)
            .field("shards", &self.shards.len())
            .field("non_empty", &self.non_empty_shards())
            .finish()
    }
}
