use hal_sync::exchange;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const UNLOCKED: u32 = 0;
const LOCKED: u32 = 1;

/// A counter that only the holder of the test lock may touch. Deliberately
/// not atomic: its consistency at the end *is* the mutual-exclusion property
/// under test.
///
/// All access goes through `&self` methods so a `move` closure captures the
/// whole struct — and with it the `Send` claim — rather than just the inner
/// `Arc<UnsafeCell<_>>` under disjoint closure capture.
struct GuardedCount(Arc<UnsafeCell<usize>>);

// SAFETY: every increment happens while holding the test lock; the final
// read happens after all threads are joined.
unsafe impl Send for GuardedCount {}

impl GuardedCount {
    fn new() -> Self {
        Self(Arc::new(UnsafeCell::new(0)))
    }

    fn share(&self) -> Self {
        Self(Arc::clone(&self.0))
    }

    /// # Safety
    /// The caller must hold the lock guarding this counter.
    unsafe fn bump(&self) {
        unsafe { *self.0.get() += 1 }
    }

    fn into_total(self) -> usize {
        unsafe { *self.0.get() }
    }
}

#[test]
fn exchange_round_trips_values() {
    let slot = AtomicU32::new(0xCAFE);
    assert_eq!(exchange(&slot, 0xBEEF), 0xCAFE);
    assert_eq!(exchange(&slot, 0), 0xBEEF);
    assert_eq!(slot.load(Ordering::SeqCst), 0);
}

/// Two contexts swapping distinct values against the same slot: exactly one
/// observes the initial value, the other observes its peer's value, and the
/// final content is one of the two — no interleaved or partial write.
#[test]
fn concurrent_exchanges_never_tear() {
    for _ in 0..200 {
        let slot = Arc::new(AtomicU32::new(0));
        let start = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [0x1111_1111u32, 0x2222_2222]
            .into_iter()
            .map(|val| {
                let slot = Arc::clone(&slot);
                let start = Arc::clone(&start);
                thread::spawn(move || {
                    start.wait();
                    exchange(&slot, val)
                })
            })
            .collect();

        let seen: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let last = slot.load(Ordering::SeqCst);

        // One swap went first and saw 0; the other saw the first one's value.
        assert_eq!(seen.iter().filter(|&&v| v == 0).count(), 1);
        let first = [0x1111_1111, 0x2222_2222]
            .into_iter()
            .find(|v| *v != last)
            .unwrap();
        assert!(seen.contains(&first));
        assert!(last == 0x1111_1111 || last == 0x2222_2222);
    }
}

/// A contended spin lock built the way callers are meant to build one: a
/// lock is acquired when the exchange returns the unlocked marker. Every
/// successful acquisition increments a counter that only the lock holder may
/// touch; the totals must match exactly.
#[test]
fn contended_lock_acquisitions_are_exact() {
    let threads = 8;
    let iters = 5_000;

    let lock = Arc::new(AtomicU32::new(UNLOCKED));
    let acquisitions = Arc::new(AtomicUsize::new(0));
    let start = Arc::new(Barrier::new(threads));
    let guarded = GuardedCount::new();

    let mut handles = Vec::with_capacity(threads);
    for _ in 0..threads {
        let lock = Arc::clone(&lock);
        let acquisitions = Arc::clone(&acquisitions);
        let start = Arc::clone(&start);
        let guarded = guarded.share();
        handles.push(thread::spawn(move || {
            start.wait();
            for _ in 0..iters {
                // Acquire: spin until the swap observes the unlocked marker.
                while exchange(&lock, LOCKED) != UNLOCKED {
                    thread::yield_now();
                }
                acquisitions.fetch_add(1, Ordering::SeqCst);
                unsafe { guarded.bump() };
                // Release.
                let prev = exchange(&lock, UNLOCKED);
                assert_eq!(prev, LOCKED, "lock released while not held");
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(acquisitions.load(Ordering::SeqCst), threads * iters);
    assert_eq!(guarded.into_total(), threads * iters);
    assert_eq!(lock.load(Ordering::SeqCst), UNLOCKED);
}
