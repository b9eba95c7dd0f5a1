//! Nodes, edges and the per-node state mutated by traversals.

use core::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

use crate::concurrency::{SpinLock, SpinLockGuard};

/// Index of a node inside its [`Graph`](super::Graph).
pub type NodeId = usize;

/// Distance of a node that has not been reached.
pub const INFINITY: u64 = u64::MAX;

const NO_SHARD: usize = usize::MAX;

/// A weighted directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Node the edge points to.
    pub target: NodeId,
    /// Non-negative edge weight.
    pub weight: u32,
}

impl Edge {
    /// Creates an edge to `target`.
    pub const fn new(target: NodeId, weight: u32) -> Self {
        Self { target, weight }
    }
}

/// Where a node currently sits in an intrusive queue.
///
/// `owner` is written only while holding both the owning shard's lock and
/// [`QueueSlot::lock`]; `position` only under the owning shard's lock. A
/// lock-free read of `owner` is therefore a hint that must be confirmed under
/// both locks before it is acted on.
#[derive(Debug)]
pub(crate) struct QueueSlot {
    lock: SpinLock,
    owner: AtomicUsize,
    position: AtomicUsize,
}

impl QueueSlot {
    const fn new() -> Self {
        Self {
            lock: SpinLock::new(),
            owner: AtomicUsize::new(NO_SHARD),
            position: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) -> SpinLockGuard<'_> {
        self.lock.lock()
    }

    #[inline]
    pub(crate) fn owner(&self) -> Option<usize> {
        match self.owner.load(Ordering::Acquire) {
            NO_SHARD => None,
            shard => Some(shard),
        }
    }

    #[inline]
    pub(crate) fn set_owner(&self, shard: Option<usize>) {
        self.owner.store(shard.unwrap_or(NO_SHARD), Ordering::Release);
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn set_position(&self, position: usize) {
        self.position.store(position, Ordering::Relaxed);
    }

    fn reset(&mut self) {
        *self.owner.get_mut() = NO_SHARD;
        *self.position.get_mut() = 0;
    }
}

/// A graph node: its outgoing edges plus traversal state shared by all workers.
#[derive(Debug)]
pub struct Node {
    edges: Box<[Edge]>,
    distance: AtomicU64,
    last_settled: AtomicU64,
    processed: AtomicU32,
    slot: QueueSlot,
}

impl Node {
    pub(crate) fn new(edges: Vec<Edge>) -> Self {
        Self {
            edges: edges.into_boxed_slice(),
            distance: AtomicU64::new(INFINITY),
            last_settled: AtomicU64::new(INFINITY),
            processed: AtomicU32::new(0),
            slot: QueueSlot::new(),
        }
    }

    /// Outgoing edges, in insertion order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Current tentative distance from the source, [`INFINITY`] if unreached.
    #[inline]
    pub fn distance(&self) -> u64 {
        self.distance.load(Ordering::Acquire)
    }

    /// Smallest distance this node has been processed with.
    #[inline]
    pub fn last_settled(&self) -> u64 {
        self.last_settled.load(Ordering::Acquire)
    }

    /// How many times the node was processed (not merely enqueued).
    #[inline]
    pub fn processed(&self) -> u32 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Overwrites the distance. Only valid for the single-threaded oracle and
    /// for seeding the source before workers start.
    #[inline]
    pub(crate) fn store_distance(&self, distance: u64) {
        self.distance.store(distance, Ordering::Release);
    }

    /// Lowers the distance to `candidate` if that is an improvement.
    ///
    /// Returns `true` if this call performed the update. Never raises the value.
    #[inline]
    pub(crate) fn lower_distance(&self, candidate: u64) -> bool {
        let mut observed = self.distance.load(Ordering::Acquire);
        while candidate < observed {
            match self.distance.compare_exchange_weak(
                observed,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(current) => observed = current,
            }
        }
        false
    }

    /// Claims the right to process this node at `distance`.
    ///
    /// Succeeds only if `distance` is strictly below every distance the node
    /// was already processed with; a failure marks a stale duplicate entry.
    #[inline]
    pub(crate) fn try_settle(&self, distance: u64) -> bool {
        let mut settled = self.last_settled.load(Ordering::Acquire);
        while distance < settled {
            match self.last_settled.compare_exchange_weak(
                settled,
                distance,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(current) => settled = current,
            }
        }
        false
    }

    #[inline]
    pub(crate) fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn slot(&self) -> &QueueSlot {
        &self.slot
    }

    pub(crate) fn reset(&mut self) {
        debug_assert!(
            self.slot.owner().is_none(),
            "node reset while still owned by a queue shard"
        );
        *self.distance.get_mut() = INFINITY;
        *self.last_settled.get_mut() = INFINITY;
        *self.processed.get_mut() = 0;
        self.slot.reset();
    }
}
