// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Stress-test program: spins up a mix of reader and writer threads against a
// single shared counter for a fixed duration and reports how much work each
// role got done. Not part of the library's public contract — this is a
// runnable demonstration, in this crate's `src/bin/` convention.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use spin_rwlock::RwLock;

struct Stats {
    iterations: u64,
    elapsed: Duration,
}

impl Stats {
    fn iterations_per_sec(&self) -> f64 {
        self.iterations as f64 / self.elapsed.as_secs_f64()
    }
}

/// Run `n_threads` threads against one `RwLock<u64>` for `duration`, with
/// `writer_fraction` of them incrementing the counter under exclusive hold
/// and the rest reading it under shared hold. Returns the total iterations
/// performed by writers (the counter's final value) and reader/writer stats.
fn run_stress(n_threads: usize, writer_fraction: f64, duration: Duration) -> (u64, Stats, Stats) {
    let lock = Arc::new(RwLock::new(0u64));
    let stop = Arc::new(AtomicBool::new(false));

    let n_writers = ((n_threads as f64) * writer_fraction).round() as usize;

    let mut handles = Vec::with_capacity(n_threads);
    for i in 0..n_threads {
        let lock = Arc::clone(&lock);
        let stop = Arc::clone(&stop);
        let is_writer = i < n_writers;
        handles.push(thread::spawn(move || {
            let mut iterations: u64 = 0;
            while !stop.load(Ordering::Relaxed) {
                if is_writer {
                    let mut guard = lock.write();
                    *guard += 1;
                } else {
                    let guard = lock.read();
                    std::hint::black_box(*guard);
                }
                iterations += 1;
            }
            (is_writer, iterations)
        }));
    }

    let start = Instant::now();
    thread::sleep(duration);
    stop.store(true, Ordering::Relaxed);

    let mut writer_iterations = 0u64;
    let mut reader_iterations = 0u64;
    for h in handles {
        let (is_writer, iterations) = h.join().expect("stress thread panicked");
        if is_writer {
            writer_iterations += iterations;
        } else {
            reader_iterations += iterations;
        }
    }
    let elapsed = start.elapsed();

    let final_count = *lock.read();
    assert_eq!(
        final_count, writer_iterations,
        "counter must equal the number of writer iterations performed"
    );

    (
        final_count,
        Stats {
            iterations: writer_iterations,
            elapsed,
        },
        Stats {
            iterations: reader_iterations,
            elapsed,
        },
    )
}

fn main() {
    let n_threads = 32;
    let writer_fraction = 0.25;
    let duration = Duration::from_secs(2);

    println!(
        "stress: {n_threads} threads, {:.0}% writers, {:.1}s",
        writer_fraction * 100.0,
        duration.as_secs_f64()
    );

    let (final_count, writer_stats, reader_stats) = run_stress(n_threads, writer_fraction, duration);

    println!("final counter value: {final_count}");
    println!(
        "writer iterations: {} ({:.0}/s)",
        writer_stats.iterations,
        writer_stats.iterations_per_sec()
    );
    println!(
        "reader iterations: {} ({:.0}/s)",
        reader_stats.iterations,
        reader_stats.iterations_per_sec()
    );
}
