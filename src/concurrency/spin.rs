//! Spin locks for short, bounded critical sections.
//!
//! Shards and per-node queue slots are held only for a handful of array or
//! field updates, so waiters spin with [`Backoff`] instead of parking.

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use crossbeam_utils::Backoff;

/// A data-less spin lock.
///
/// Used where the protected state lives in atomics next to the lock (for
/// example a node's queue slot), so readers may take a lock-free snapshot and
/// writers serialise through [`SpinLock::lock`].
#[derive(Debug, Default)]
pub struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    /// Creates an unlocked lock.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Acquires the lock, spinning until it is available.
    #[inline]
    pub fn lock(&self) -> SpinLockGuard<'_> {
        if self.try_acquire() {
            return SpinLockGuard { lock: self };
        }
        self.lock_slow()
    }

    #[cold]
    fn lock_slow(&self) -> SpinLockGuard<'_> {
        let backoff = Backoff::new();
        loop {
            // Test before test-and-set keeps the line shared while it is held.
            while self.locked.load(Ordering::Relaxed) {
                backoff.snooze();
            }
            if self.try_acquire() {
                return SpinLockGuard { lock: self };
            }
        }
    }

    /// Returns `true` if some thread currently holds the lock.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    #[inline]
    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    #[inline]
    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

/// Releases a [`SpinLock`] on drop.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct SpinLockGuard<'a> {
    lock: &'a SpinLock,
}

impl Drop for SpinLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

/// A spin lock that owns the data it protects.
pub struct SpinMutex<T> {
    lock: SpinLock,
    value: UnsafeCell<T>,
}

// SAFETY: access to `value` is serialised by `lock`.
unsafe impl<T: Send> Send for SpinMutex<T> {}
unsafe impl<T: Send> Sync for SpinMutex<T> {}

impl<T> SpinMutex<T> {
    /// Wraps `value` in an unlocked mutex.
    pub const fn new(value: T) -> Self {
        Self {
            lock: SpinLock::new(),
            value: UnsafeCell::new(value),
        }
    }

    /// Acquires the mutex, spinning until it is available.
    #[inline]
    pub fn lock(&self) -> SpinMutexGuard<'_, T> {
        SpinMutexGuard {
            _guard: self.lock.lock(),
            value: self.value.get(),
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T: Default> Default for SpinMutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> core::fmt::Debug for SpinMutex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpinMutex")
            .field("locked", &self.lock.is_locked())
            .finish_non_exhaustive()
    }
}

/// Exclusive access to the contents of a [`SpinMutex`].
#[must_use = "the mutex is released as soon as the guard is dropped"]
pub struct SpinMutexGuard<'a, T> {
    _guard: SpinLockGuard<'a>,
    value: *mut T,
    _marker: core::marker::PhantomData<&'a mut T>,
}

impl<T> Deref for SpinMutexGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        // SAFETY: the guard holds the lock for its whole lifetime.
        unsafe { &*self.value }
    }
}

impl<T> DerefMut for SpinMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: the guard holds the lock for its whole lifetime.
        unsafe { &mut *self.value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn guard_releases_on_drop() {
        let lock = SpinLock::new();
        let guard = lock.lock();
        assert!(lock.is_locked());
        drop(guard);
        assert!(!lock.is_locked());
        let _again = lock.lock();
        assert!(lock.is_locked());
    }

    #[test]
    fn mutex_serialises_increments() {
        const THREADS: usize = 4;
        const ROUNDS: usize = 10_000;
        let counter = SpinMutex::new(0usize);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    for _ in 0..ROUNDS {
                        *counter.lock() += 1;
                    }
                });
            }
        });

        assert_eq!(*counter.lock(), THREADS * ROUNDS);
        assert!(!counter.lock.is_locked());
    }
}
