use core::sync::atomic::{AtomicU32, Ordering};

/// Atomically store `new` into `slot` and return the value it previously
/// held, as one indivisible operation visible to every CPU sharing the
/// memory.
///
/// Sequentially-consistent, which on x86 compiles to a single `lock xchg`:
/// the swap is globally ordered and its result is visible to all CPUs the
/// moment it completes. It may not be interleaved with, torn by, or
/// reordered around any other access to `slot`.
///
/// This is the sole concurrency building block this HAL provides. A caller
/// implements a lock by exchanging a "locked" marker into the slot:
/// observing the "unlocked" marker as the return value means the lock was
/// acquired; anything else means it was busy, and retry/backoff policy is
/// entirely the caller's.
#[inline]
pub fn exchange(slot: &AtomicU32, new: u32) -> u32 {
    slot.swap(new, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_previous_value_and_stores_the_new_one() {
        let slot = AtomicU32::new(17);
        assert_eq!(exchange(&slot, 42), 17);
        assert_eq!(slot.load(Ordering::SeqCst), 42);
        assert_eq!(exchange(&slot, 7), 42);
        assert_eq!(slot.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn swapping_the_same_value_is_observable_but_harmless() {
        let slot = AtomicU32::new(5);
        assert_eq!(exchange(&slot, 5), 5);
        assert_eq!(slot.load(Ordering::SeqCst), 5);
    }
}
