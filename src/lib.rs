// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// A shared-exclusive (reader-writer) spin lock for short critical sections.
// Built from two plain atomics (a writer flag and a reader count) with a
// spin-then-yield backoff, targeting uses where an OS-level blocking
// primitive would dominate the cost of the critical section it protects.
//
// `RwLock<T>` is the safe entry point: it pairs the raw protocol with the
// protected value and hands out RAII guards. `RawRwLock` is the bare
// protocol with no payload, for callers that need to embed the lock state
// directly (e.g. inside a larger struct driven through `&RawRwLock`) instead
// of through a generic wrapper.

mod backoff;
mod clock;
mod config;
mod error;
mod lock;
mod raw;

pub use clock::Deadline;
pub use config::{BackoffConfig, CACHE_LINE_SIZE};
pub use error::{Elapsed, TryLockError};
pub use lock::{RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use raw::RawRwLock;
