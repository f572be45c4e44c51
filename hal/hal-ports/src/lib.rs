//! # x86 I/O Port Access
//!
//! Low-level access to the x86 I/O port address space: thin wrappers around
//! the `in`/`out` instructions (single transfers) and their `rep ins`/`rep
//! outs` string forms (block transfers) for devices that use port-mapped I/O
//! rather than MMIO.
//!
//! ## Architecture Details
//!
//! * **16-bit Addressing**: Port numbers range from 0x0000 to 0xFFFF, a space
//!   completely distinct from physical memory.
//! * **Special Instructions**: Accessed only via `in`/`out`, never via loads
//!   and stores.
//! * **Privilege Controlled**: Access is gated by CPL, IOPL, and the I/O
//!   permission bitmap; a disallowed access raises `#GP`.
//!
//! ### Common Port Ranges
//! ```text
//! 0x0020-0x0021   Programmable Interrupt Controller (PIC) #1
//! 0x0040-0x0043   Programmable Interval Timer (PIT)
//! 0x0060-0x0064   Keyboard Controller
//! 0x0070-0x0071   CMOS/RTC
//! 0x00A0-0x00A1   PIC #2
//! 0x01F0-0x01F7   Primary IDE Controller
//! 0x03F8-0x03FF   Serial Port #1
//! ```
//!
//! ## Ordering
//!
//! `in`/`out` order with respect to each other but are **not** general memory
//! fences. The block forms (`insl`/`outsl`) do touch normal memory, so they
//! are declared to the compiler as reading/writing memory: unrelated accesses
//! are not reordered across them and the transferred buffer is not cached
//! stale. Cross-CPU ordering is whatever the instructions give (nothing).
//!
//! ## Design Philosophy
//!
//! Thin wrappers, no validation, no buffering: a wrong port number is a
//! device-protocol violation or a hardware fault, never a recoverable error
//! value. Safety is documented, not checked.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

/// Read one byte from an I/O port.
///
/// Uses `in al, dx`.
///
/// # Safety
/// - **Privilege:** Execute at CPL 0 **or** with IOPL/IO-bitmap permission
///   for `port`; otherwise the CPU raises `#GP`.
/// - **Correct port:** `port` must be a readable register of the intended
///   device; reads can have side effects (many status registers clear on
///   read).
/// - **Concurrency:** Coordinate with interrupt handlers and other CPUs that
///   drive the same device so multi-step handshakes are not torn.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn inb(port: u16) -> u8 {
    let v: u8;
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") v,
            options(nomem, nostack, preserves_flags)
        );
    }
    v
}

/// Write one byte to an I/O port.
///
/// Uses `out dx, al`.
///
/// # Safety
/// - **Privilege:** Execute at CPL 0 **or** with IOPL/IO-bitmap permission
///   for `port`; otherwise the CPU raises `#GP`.
/// - **Correct port:** Writing the wrong port or value can wedge the device
///   or the system (e.g. masking the PIC, reprogramming the PIT).
/// - **Concurrency:** Serialize with other code driving the same device.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Write one 16-bit word to an I/O port.
///
/// Uses `out dx, ax`.
///
/// # Safety
/// Same requirements as [`outb`]; additionally the device register must be
/// word-wide (word writes to byte registers hit the neighbouring port).
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn outw(port: u16, val: u16) {
    unsafe {
        core::arch::asm!(
            "out dx, ax",
            in("dx") port,
            in("ax") val,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Block-read `cnt` dwords from `port` into the buffer at `dst`.
///
/// Uses `cld; rep insd`: the CPU advances EDI and decrements ECX itself;
/// both are dead after the call. The destination is written behind the
/// compiler's back, so this declares a memory clobber.
///
/// # Safety
/// - Same port requirements as [`inb`].
/// - `dst..dst + cnt` dwords must be valid, writable memory owned by the
///   caller for the duration of the call.
/// - The device must actually deliver `cnt` dwords; `rep insd` does not time
///   out on a wedged device.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn insl(port: u16, dst: *mut u32, cnt: usize) {
    unsafe {
        core::arch::asm!(
            "cld",
            "rep insd",
            in("dx") port,
            inout("edi") dst => _,
            inout("ecx") cnt => _,
            options(nostack)
        );
    }
}

/// Block-write `cnt` dwords from the buffer at `src` to `port`.
///
/// Uses `cld; rep outsd`; ESI and ECX advance inside the instruction and are
/// dead after the call. The source buffer is read by the instruction, so the
/// asm is declared `readonly` rather than `nomem`.
///
/// # Safety
/// - Same port requirements as [`outb`].
/// - `src..src + cnt` dwords must be valid, readable memory for the duration
///   of the call.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn outsl(port: u16, src: *const u32, cnt: usize) {
    unsafe {
        core::arch::asm!(
            "cld",
            "rep outsd",
            in("dx") port,
            inout("esi") src => _,
            inout("ecx") cnt => _,
            options(readonly, nostack)
        );
    }
}
