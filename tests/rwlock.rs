// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use spin_rwlock::RwLock;

#[test]
fn single_thread_write_then_read() {
    let lock = RwLock::new(0i32);
    {
        let mut guard = lock.write();
        *guard = 10;
    }
    {
        let guard = lock.read();
        assert_eq!(*guard, 10);
    }
}

#[test]
fn multiple_write_cycles() {
    let lock = RwLock::new(0i32);
    for _ in 0..100 {
        *lock.write() += 1;
    }
    assert_eq!(*lock.read(), 100);
}

#[test]
fn multiple_read_cycles() {
    let lock = RwLock::new(7i32);
    for _ in 0..100 {
        assert_eq!(*lock.read(), 7);
    }
}

#[test]
fn write_lock_protection() {
    let lock = Arc::new(RwLock::new(0i32));
    let iterations = 500;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                for _ in 0..iterations {
                    *lock.write() += 1;
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(*lock.read(), iterations * 2);
}

#[test]
fn concurrent_readers() {
    let lock = Arc::new(RwLock::new(0i32));
    let concurrent_readers = Arc::new(AtomicI32::new(0));
    let max_concurrent = Arc::new(AtomicI32::new(0));
    let num_readers = 5;

    let handles: Vec<_> = (0..num_readers)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let cr = Arc::clone(&concurrent_readers);
            let mc = Arc::clone(&max_concurrent);
            thread::spawn(move || {
                for _ in 0..20 {
                    let _guard = lock.read();

                    let current = cr.fetch_add(1, Ordering::SeqCst) + 1;
                    let mut current_max = mc.load(Ordering::Relaxed);
                    while current > current_max {
                        match mc.compare_exchange_weak(current_max, current, Ordering::Relaxed, Ordering::Relaxed) {
                            Ok(_) => break,
                            Err(v) => current_max = v,
                        }
                    }

                    thread::sleep(Duration::from_micros(100));
                    cr.fetch_sub(1, Ordering::SeqCst);
                    thread::yield_now();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert!(
        max_concurrent.load(Ordering::Relaxed) > 1,
        "should have had multiple concurrent readers"
    );
}

#[test]
fn writer_exclusive_access() {
    let lock = Arc::new(RwLock::new(0i32));
    let writer_in_cs = Arc::new(AtomicBool::new(false));
    let violation = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let wics = Arc::clone(&writer_in_cs);
            let viol = Arc::clone(&violation);
            thread::spawn(move || {
                for _ in 0..50 {
                    let _guard = lock.write();
                    if wics.swap(true, Ordering::SeqCst) {
                        viol.store(true, Ordering::SeqCst);
                    }
                    thread::sleep(Duration::from_micros(50));
                    wics.store(false, Ordering::SeqCst);
                    thread::yield_now();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert!(!violation.load(Ordering::SeqCst));
}

// thread A holds a shared lock; thread B's try_write must observe busy and
// leave the reader count unchanged.
#[test]
fn try_exclusive_busy_while_reader_active() {
    let lock = Arc::new(RwLock::new(0i32));
    let reader_ready = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));

    let lock_a = Arc::clone(&lock);
    let ready_a = Arc::clone(&reader_ready);
    let release_a = Arc::clone(&release);
    let a = thread::spawn(move || {
        let _guard = lock_a.read();
        ready_a.store(true, Ordering::SeqCst);
        while !release_a.load(Ordering::SeqCst) {
            thread::yield_now();
        }
    });

    while !reader_ready.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    assert!(lock.try_write().is_none());

    release.store(true, Ordering::SeqCst);
    a.join().unwrap();

    assert!(lock.try_write().is_some() || lock.try_read().is_some());
}

#[test]
fn many_readers_one_writer_counter_matches_writer_iterations() {
    let lock = Arc::new(RwLock::new(0i32));
    let read_count = Arc::new(AtomicI32::new(0));
    let num_readers = 10;

    let mut handles: Vec<_> = (0..num_readers)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let rc = Arc::clone(&read_count);
            thread::spawn(move || {
                for _ in 0..50 {
                    let _ = *lock.read();
                    rc.fetch_add(1, Ordering::Relaxed);
                    thread::yield_now();
                }
            })
        })
        .collect();

    let lock_w = Arc::clone(&lock);
    handles.push(thread::spawn(move || {
        for _ in 0..100 {
            *lock_w.write() += 1;
            thread::yield_now();
        }
    }));

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(*lock.read(), 100);
    assert_eq!(read_count.load(Ordering::Relaxed), num_readers * 50);
}

#[test]
fn rapid_mixed_operations() {
    let lock = Arc::new(RwLock::new(0i32));

    let lock_r1 = Arc::clone(&lock);
    let r1 = thread::spawn(move || {
        for _ in 0..1000 {
            let _ = *lock_r1.read();
        }
    });
    let lock_r2 = Arc::clone(&lock);
    let r2 = thread::spawn(move || {
        for _ in 0..1000 {
            let _ = *lock_r2.read();
        }
    });
    let lock_w1 = Arc::clone(&lock);
    let w1 = thread::spawn(move || {
        for _ in 0..500 {
            *lock_w1.write() += 1;
        }
    });

    r1.join().unwrap();
    r2.join().unwrap();
    w1.join().unwrap();

    assert_eq!(*lock.read(), 500);
}
