//! # Repeated-Store Memory Fills
//!
//! Pattern fills using the CPU's own repeat-prefixed store instructions
//! (`rep stosb` / `rep stosd`), for zeroing or initializing buffers without a
//! software loop. Used by allocators and early-boot code before anything
//! fancier exists.
//!
//! Both operations declare a full memory side effect to the compiler: the
//! destination is written behind the optimizer's back, so nothing may be
//! reordered across the call and no cached reads of the region survive it.
//!
//! Filling is idempotent: filling the same region twice with the same pattern
//! is indistinguishable from filling it once.
//!
//! ## Testing
//!
//! The fill tests exercise the instructions themselves, so they exist only
//! for IA-32 test targets (`cargo test --target i686-unknown-linux-gnu` or a
//! QEMU run); a host invocation on another architecture compiles them out
//! along with the fills.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

/// Fill `cnt` bytes at `dst` with `value`.
///
/// Uses `cld; rep stosb`. EDI and ECX advance inside the instruction and are
/// dead after the call.
///
/// # Safety
/// - `dst..dst + cnt` bytes must be valid, writable memory owned by the
///   caller for the duration of the call.
/// - No other thread of control may read or write the region concurrently;
///   `rep stosb` is not atomic and may be interrupted between stores.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn fill_bytes(dst: *mut u8, value: u8, cnt: usize) {
    unsafe {
        core::arch::asm!(
            "cld",
            "rep stosb",
            inout("edi") dst => _,
            inout("ecx") cnt => _,
            in("al") value,
            options(nostack)
        );
    }
}

/// Fill `cnt` dwords at `dst` with `value`.
///
/// Uses `cld; rep stosd`. Byte-for-byte equivalent to [`fill_bytes`] when
/// `value` replicates a single byte, but four times fewer stores.
///
/// # Safety
/// - `dst..dst + cnt` dwords must be valid, writable memory owned by the
///   caller for the duration of the call.
/// - No other thread of control may touch the region concurrently.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn fill_dwords(dst: *mut u32, value: u32, cnt: usize) {
    unsafe {
        core::arch::asm!(
            "cld",
            "rep stosd",
            inout("edi") dst => _,
            inout("ecx") cnt => _,
            in("eax") value,
            options(nostack)
        );
    }
}

#[cfg(all(test, feature = "asm", target_arch = "x86"))]
mod tests {
    use super::*;

    #[test]
    fn fill_bytes_covers_exactly_the_requested_region() {
        let mut buf = [0xEEu8; 8];
        unsafe { fill_bytes(buf[1..].as_mut_ptr(), 0x5A, 5) };
        assert_eq!(buf, [0xEE, 0x5A, 0x5A, 0x5A, 0x5A, 0x5A, 0xEE, 0xEE]);
    }

    #[test]
    fn fill_dwords_stores_the_full_pattern() {
        let mut buf = [0u32; 4];
        unsafe { fill_dwords(buf.as_mut_ptr(), 0xDEAD_BEEF, 3) };
        assert_eq!(buf, [0xDEAD_BEEF, 0xDEAD_BEEF, 0xDEAD_BEEF, 0]);
    }

    #[test]
    fn refilling_is_idempotent() {
        let mut once = [0u8; 16];
        let mut twice = [0u8; 16];
        unsafe {
            fill_bytes(once.as_mut_ptr(), 7, 16);
            fill_bytes(twice.as_mut_ptr(), 7, 16);
            fill_bytes(twice.as_mut_ptr(), 7, 16);
        }
        assert_eq!(once, twice);
    }
}
