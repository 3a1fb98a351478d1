// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// The raw shared-exclusive lock protocol: two independent atomics (a writer
// flag and a reader count) plus the eight acquire/release operations from
// the design this crate follows. No generic payload lives here — `RawRwLock`
// only knows how to admit and drain holders; `RwLock<T>` (in `lock.rs`)
// pairs it with an `UnsafeCell<T>` and RAII guards.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(feature = "prevent-false-sharing")]
use crossbeam_utils::CachePadded;

use crate::backoff::Backoff;
use crate::clock::Deadline;
use crate::config::BackoffConfig;
use crate::error::{Elapsed, TryLockError};

#[cfg(feature = "prevent-false-sharing")]
pub struct RawRwLock {
    writer_locked: CachePadded<AtomicBool>,
    reader_count: CachePadded<AtomicUsize>,
    config: BackoffConfig,
}

#[cfg(not(feature = "prevent-false-sharing"))]
pub struct RawRwLock {
    writer_locked: AtomicBool,
    reader_count: AtomicUsize,
    config: BackoffConfig,
}

impl RawRwLock {
    /// Construct a new, unlocked lock with the default backoff schedule.
    #[cfg(feature = "prevent-false-sharing")]
    pub const fn new() -> Self {
        Self {
            writer_locked: CachePadded::new(AtomicBool::new(false)),
            reader_count: CachePadded::new(AtomicUsize::new(0)),
            config: BackoffConfig::DEFAULT,
        }
    }

    /// Construct a new, unlocked lock with the default backoff schedule.
    #[cfg(not(feature = "prevent-false-sharing"))]
    pub const fn new() -> Self {
        Self {
            writer_locked: AtomicBool::new(false),
            reader_count: AtomicUsize::new(0),
            config: BackoffConfig::DEFAULT,
        }
    }

    /// Construct a new, unlocked lock with a caller-supplied backoff
    /// schedule, overriding the spin caps and yield threshold.
    #[cfg(feature = "prevent-false-sharing")]
    pub const fn with_config(config: BackoffConfig) -> Self {
        Self {
            writer_locked: CachePadded::new(AtomicBool::new(false)),
            reader_count: CachePadded::new(AtomicUsize::new(0)),
            config,
        }
    }

    /// Construct a new, unlocked lock with a caller-supplied backoff
    /// schedule, overriding the spin caps and yield threshold.
    #[cfg(not(feature = "prevent-false-sharing"))]
    pub const fn with_config(config: BackoffConfig) -> Self {
        Self {
            writer_locked: AtomicBool::new(false),
            reader_count: AtomicUsize::new(0),
            config,
        }
    }

    // -- shared -------------------------------------------------------

    /// Acquire shared (read) access, spinning until admitted.
    pub fn acquire_shared(&self) {
        let mut backoff = Backoff::new(self.config.max_writer_wait_spins, &self.config);
        loop {
            while self.writer_locked.load(Ordering::Acquire) {
                backoff.spin();
            }

            self.reader_count.fetch_add(1, Ordering::Relaxed);

            if !self.writer_locked.load(Ordering::Acquire) {
                return;
            }

            // A writer claimed the flag between our first check and the
            // increment above; back out and retry.
            self.reader_count.fetch_sub(1, Ordering::Release);
            backoff.spin();
        }
    }

    /// Attempt shared access once, without spinning or yielding.
    pub fn try_acquire_shared(&self) -> Result<(), TryLockError> {
        if self.writer_locked.load(Ordering::Acquire) {
            return Err(TryLockError::WouldBlock);
        }

        self.reader_count.fetch_add(1, Ordering::Relaxed);

        if self.writer_locked.load(Ordering::Acquire) {
            self.reader_count.fetch_sub(1, Ordering::Release);
            return Err(TryLockError::WouldBlock);
        }

        Ok(())
    }

    /// Acquire shared access, spinning until admitted or `deadline` passes.
    pub fn acquire_shared_before(&self, deadline: Deadline) -> Result<(), Elapsed> {
        let mut backoff = Backoff::new(self.config.max_writer_wait_spins, &self.config);
        loop {
            while self.writer_locked.load(Ordering::Acquire) {
                if deadline.has_passed() {
                    return Err(Elapsed);
                }
                backoff.spin();
            }

            if deadline.has_passed() {
                return Err(Elapsed);
            }

            self.reader_count.fetch_add(1, Ordering::Relaxed);

            if !self.writer_locked.load(Ordering::Acquire) {
                return Ok(());
            }

            self.reader_count.fetch_sub(1, Ordering::Release);

            if deadline.has_passed() {
                return Err(Elapsed);
            }
            backoff.spin();
        }
    }

    /// Release shared access. Debug-checked precondition: `reader_count > 0`.
    pub fn release_shared(&self) {
        let prev = self.reader_count.fetch_sub(1, Ordering::Release);
        debug_assert!(prev > 0, "release_shared called without a matching acquire");
    }

    // -- exclusive ------------------------------------------------------

    /// Acquire exclusive (write) access, spinning until admitted.
    pub fn acquire_exclusive(&self) {
        let mut claim_backoff = Backoff::new(self.config.max_writer_wait_spins, &self.config);
        while self
            .writer_locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            claim_backoff.spin();
        }

        let mut drain_backoff = Backoff::new(self.config.max_reader_wait_spins, &self.config);
        while self.reader_count.load(Ordering::Acquire) != 0 {
            drain_backoff.spin();
        }
    }

    /// Attempt exclusive access once, without spinning or yielding.
    pub fn try_acquire_exclusive(&self) -> Result<(), TryLockError> {
        if self
            .writer_locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(TryLockError::WouldBlock);
        }

        if self.reader_count.load(Ordering::Acquire) != 0 {
            self.writer_locked.store(false, Ordering::Release);
            return Err(TryLockError::WouldBlock);
        }

        Ok(())
    }

    /// Acquire exclusive access, spinning until admitted or `deadline` passes.
    pub fn acquire_exclusive_before(&self, deadline: Deadline) -> Result<(), Elapsed> {
        let mut claim_backoff = Backoff::new(self.config.max_writer_wait_spins, &self.config);
        loop {
            if self
                .writer_locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
            if deadline.has_passed() {
                return Err(Elapsed);
            }
            claim_backoff.spin();
        }

        let mut drain_backoff = Backoff::new(self.config.max_reader_wait_spins, &self.config);
        while self.reader_count.load(Ordering::Acquire) != 0 {
            if deadline.has_passed() {
                self.writer_locked.store(false, Ordering::Release);
                return Err(Elapsed);
            }
            drain_backoff.spin();
        }

        Ok(())
    }

    /// Release exclusive access. Debug-checked precondition: the writer flag
    /// is currently held.
    pub fn release_exclusive(&self) {
        debug_assert!(
            self.writer_locked.load(Ordering::Relaxed),
            "release_exclusive called without a matching acquire"
        );
        self.writer_locked.store(false, Ordering::Release);
    }

    /// Number of readers currently holding the lock. Exposed for tests and
    /// diagnostics; not part of the synchronization protocol itself.
    #[cfg(test)]
    pub(crate) fn reader_count(&self) -> usize {
        self.reader_count.load(Ordering::Acquire)
    }

    /// Whether a writer currently holds (or is claiming) the lock. Exposed
    /// for tests and diagnostics.
    #[cfg(test)]
    pub(crate) fn is_write_locked(&self) -> bool {
        self.writer_locked.load(Ordering::Acquire)
    }
}

impl Default for RawRwLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl Send for RawRwLock {}
unsafe impl Sync for RawRwLock {}
