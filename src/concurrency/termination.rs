//! Quiescence detection for a fixed pool of spin-polling workers.
//!
//! Each worker moves between three states:
//!
//! ```text
//! POLLING --(found work)--> PROCESSING --> POLLING
//! POLLING --(queue empty)--> WAITING --(found work)--> PROCESSING
//! ```
//!
//! A worker entering WAITING bumps a shared idle counter once. When the
//! counter reaches the worker count every worker has observed an empty queue
//! while nobody was processing, so no pending relaxation exists and the
//! observing worker exits. Exited workers stay counted, which lets the rest
//! drain in turn. A worker that finds work again leaves WAITING and
//! decrements the counter before it processes anything.
//!
//! The protocol relies on producers publishing work before they can become
//! idle themselves: a worker enqueues every improved neighbour while still
//! PROCESSING, so the queue is non-empty before its own idle increment.

use core::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

/// Shared idle counter for one run.
///
/// Lives exactly as long as the run that created it; a fresh detector starts
/// with no idle workers.
#[derive(Debug)]
pub struct TerminationDetector {
    workers: usize,
    idle: CachePadded<AtomicUsize>,
}

impl TerminationDetector {
    /// Creates a detector for `workers` threads.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    pub fn new(workers: usize) -> Self {
        assert!(workers != 0, "workers must be > 0");
        Self {
            workers,
            idle: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Number of workers taking part.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of workers currently counted as idle (or already exited).
    pub fn idle_workers(&self) -> usize {
        self.idle.load(Ordering::Acquire)
    }

    /// Returns the per-worker view used inside the polling loop.
    pub fn worker(&self) -> WorkerState<'_> {
        WorkerState {
            detector: self,
            waiting: false,
        }
    }
}

/// One worker's position in the POLLING / WAITING / PROCESSING cycle.
#[derive(Debug)]
pub struct WorkerState<'a> {
    detector: &'a TerminationDetector,
    waiting: bool,
}

impl WorkerState<'_> {
    /// Records that the last poll came back empty.
    ///
    /// Returns `true` once every worker is idle, meaning the caller must exit.
    #[inline]
    pub fn poll_failed(&mut self) -> bool {
        if !self.waiting {
            self.waiting = true;
            self.detector.idle.fetch_add(1, Ordering::AcqRel);
        }
        self.detector.idle.load(Ordering::Acquire) == self.detector.workers
    }

    /// Records that the last poll produced work.
    #[inline]
    pub fn poll_succeeded(&mut self) {
        if self.waiting {
            self.waiting = false;
            self.detector.idle.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// Returns `true` while this worker is counted as idle.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }
}
