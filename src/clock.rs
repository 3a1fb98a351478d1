// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Monotonic-clock helper for timed acquire. `std::time::Instant` is already
// monotonic; the only thing this module adds is a stable nanosecond scale
// (relative to a lazily-initialized process-wide epoch) so that a `Deadline`
// is a plain `u64` comparison rather than an `Instant` comparison threaded
// through every backoff loop.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

/// Nanoseconds elapsed since the process-wide monotonic epoch.
#[inline]
fn now_nanos() -> u64 {
    epoch().elapsed().as_nanos() as u64
}

/// An absolute deadline, normalized to the same nanosecond scale as
/// `now_nanos`, so that timed-acquire loops compare a single integer
/// inequality instead of juggling `Instant`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(u64);

impl Deadline {
    /// A deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self(now_nanos().saturating_add(timeout.as_nanos() as u64))
    }

    /// A deadline at a specific `Instant`. Instants before the process epoch
    /// (impossible in practice, since the epoch is set on first use of this
    /// module) saturate to zero rather than underflowing.
    pub fn at(instant: Instant) -> Self {
        let nanos = instant
            .checked_duration_since(epoch())
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self(nanos)
    }

    /// Whether `now` is at or past this deadline.
    #[inline]
    pub(crate) fn has_passed(&self) -> bool {
        now_nanos() >= self.0
    }
}
