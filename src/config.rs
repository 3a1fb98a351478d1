// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Tunables for the spin/backoff schedule used while waiting on `RawRwLock`.
// Grouped into a single record so a caller can override all of them at once
// via `RawRwLock::with_config` instead of threading individual constants
// through every acquire call.

/// Cache line size in bytes, probed by `build.rs` and exposed as an
/// environment variable at compile time. Falls back to 64 (the common case
/// on x86_64 and most aarch64) if the probe did not run or produced nothing
/// usable.
pub const CACHE_LINE_SIZE: usize = match option_env!("CARGO_RWLOCK_CACHE_LINE_SIZE") {
    Some(s) => parse_usize_or(s, 64),
    None => 64,
};

const fn parse_usize_or(s: &str, default: usize) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut out: usize = 0;
    if bytes.is_empty() {
        return default;
    }
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return default;
        }
        out = out * 10 + (b - b'0') as usize;
        i += 1;
    }
    out
}

/// Tunables for the backoff schedule used by shared and exclusive acquire.
///
/// The progression itself (doubling per iteration) is not a knob: only the
/// caps and the yield threshold are. See `Backoff::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Cap on the spin count while readers wait for a writer flag to clear.
    pub max_writer_wait_spins: u32,
    /// Cap on the spin count while a writer drains readers.
    pub max_reader_wait_spins: u32,
    /// Spin count past which `Backoff::spin` yields the thread instead of
    /// spending another round of pause hints.
    pub yield_threshold: u32,
}

impl BackoffConfig {
    /// The defaults used by `RawRwLock::new`.
    pub const DEFAULT: Self = Self {
        max_writer_wait_spins: 1024,
        max_reader_wait_spins: 1024,
        yield_threshold: 512,
    };

    /// Construct a config, as a `const fn` so it can be used to initialize
    /// statics alongside `RawRwLock::with_config`.
    pub const fn new(max_writer_wait_spins: u32, max_reader_wait_spins: u32, yield_threshold: u32) -> Self {
        Self {
            max_writer_wait_spins,
            max_reader_wait_spins,
            yield_threshold,
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
