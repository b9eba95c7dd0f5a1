//! Synchronisation building blocks for the parallel drivers.
//!
//! Both primitives here assume genuinely parallel OS threads: locks spin and
//! idle workers poll instead of parking.

pub mod spin;
pub mod termination;

pub use spin::{SpinLock, SpinLockGuard, SpinMutex, SpinMutexGuard};
pub use termination::{TerminationDetector, WorkerState};
