// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Generic reader-writer lock built on top of `RawRwLock`. Pairs the raw
// protocol with an `UnsafeCell<T>` and hands out RAII guards so that release
// happens on every exit path, including unwinding.

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::clock::Deadline;
use crate::error::Elapsed;
use crate::raw::RawRwLock;

/// A reader-writer lock protecting a value of type `T`.
///
/// Any number of readers may hold the lock concurrently via [`read`],
/// [`try_read`], or [`read_before`]; a writer obtained via [`write`],
/// [`try_write`], or [`write_before`] excludes all other holders. All
/// acquisitions are busy-waiting with a spin-then-yield backoff rather than
/// parking on an OS wait queue — this lock is meant for short critical
/// sections.
///
/// [`read`]: RwLock::read
/// [`try_read`]: RwLock::try_read
/// [`read_before`]: RwLock::read_before
/// [`write`]: RwLock::write
/// [`try_write`]: RwLock::try_write
/// [`write_before`]: RwLock::write_before
pub struct RwLock<T: ?Sized> {
    raw: RawRwLock,
    data: UnsafeCell<T>,
}

unsafe impl<T: ?Sized + Send> Send for RwLock<T> {}
unsafe impl<T: ?Sized + Send + Sync> Sync for RwLock<T> {}

impl<T> RwLock<T> {
    /// Create a new, unlocked lock wrapping `value`.
    pub const fn new(value: T) -> Self {
        Self {
            raw: RawRwLock::new(),
            data: UnsafeCell::new(value),
        }
    }

    /// Consume the lock, returning the wrapped value.
    ///
    /// Takes `self` by value, so the borrow checker guarantees no guard
    /// can be outstanding.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> RwLock<T> {
    /// Acquire shared (read) access, spinning until admitted.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.raw.acquire_shared();
        RwLockReadGuard { lock: self }
    }

    /// Attempt shared access once. Returns `None` if a writer currently
    /// holds the lock.
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
        self.raw.try_acquire_shared().ok()?;
        Some(RwLockReadGuard { lock: self })
    }

    /// Acquire shared access, spinning until admitted or `deadline` passes.
    pub fn read_before(&self, deadline: Deadline) -> Result<RwLockReadGuard<'_, T>, Elapsed> {
        self.raw.acquire_shared_before(deadline)?;
        Ok(RwLockReadGuard { lock: self })
    }

    /// Acquire exclusive (write) access, spinning until admitted.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.raw.acquire_exclusive();
        RwLockWriteGuard { lock: self }
    }

    /// Attempt exclusive access once. Returns `None` if the lock is
    /// currently held, by a writer or by any readers.
    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
        self.raw.try_acquire_exclusive().ok()?;
        Some(RwLockWriteGuard { lock: self })
    }

    /// Acquire exclusive access, spinning until admitted or `deadline`
    /// passes.
    pub fn write_before(&self, deadline: Deadline) -> Result<RwLockWriteGuard<'_, T>, Elapsed> {
        self.raw.acquire_exclusive_before(deadline)?;
        Ok(RwLockWriteGuard { lock: self })
    }

    /// Return a mutable reference to the wrapped value without locking.
    ///
    /// Since this borrows the lock mutably, the borrow checker statically
    /// guarantees no reader or writer guard can be outstanding.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T: Default> Default for RwLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("RwLock");
        match self.try_read() {
            Some(guard) => {
                d.field("data", &&*guard);
            }
            None => {
                d.field("data", &format_args!("<locked>"));
            }
        }
        d.finish()
    }
}

impl<T> From<T> for RwLock<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// RAII guard granting shared read access to the value protected by an
/// [`RwLock`]. Dropping the guard releases the shared hold.
#[must_use = "if unused the RwLock will immediately unlock"]
pub struct RwLockReadGuard<'a, T: ?Sized> {
    lock: &'a RwLock<T>,
}

// A shared guard only ever hands out `&T`, so moving or sharing it across
// threads needs `T: Sync`, not `T: Send` — mirrors std's own read guard.
unsafe impl<'a, T: ?Sized + Sync> Send for RwLockReadGuard<'a, T> {}
unsafe impl<'a, T: ?Sized + Sync> Sync for RwLockReadGuard<'a, T> {}

impl<'a, T: ?Sized> Deref for RwLockReadGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: construction of this guard is gated on a successful
        // shared acquire, which excludes any exclusive holder for the
        // guard's lifetime.
        unsafe { &*self.lock.data.get() }
    }
}

impl<'a, T: ?Sized> Drop for RwLockReadGuard<'a, T> {
    fn drop(&mut self) {
        self.lock.raw.release_shared();
    }
}

impl<'a, T: ?Sized + fmt::Debug> fmt::Debug for RwLockReadGuard<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// RAII guard granting exclusive write access to the value protected by an
/// [`RwLock`]. Dropping the guard releases the exclusive hold.
#[must_use = "if unused the RwLock will immediately unlock"]
pub struct RwLockWriteGuard<'a, T: ?Sized> {
    lock: &'a RwLock<T>,
}

unsafe impl<'a, T: ?Sized + Send> Send for RwLockWriteGuard<'a, T> {}
unsafe impl<'a, T: ?Sized + Sync> Sync for RwLockWriteGuard<'a, T> {}

impl<'a, T: ?Sized> Deref for RwLockWriteGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'a, T: ?Sized> DerefMut for RwLockWriteGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: construction of this guard is gated on a successful
        // exclusive acquire, which excludes every other holder for the
        // guard's lifetime.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<'a, T: ?Sized> Drop for RwLockWriteGuard<'a, T> {
    fn drop(&mut self) {
        self.lock.raw.release_exclusive();
    }
}

impl<'a, T: ?Sized + fmt::Debug> fmt::Debug for RwLockWriteGuard<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
