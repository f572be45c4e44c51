//! # QEMU Development and Debug Support
//!
//! Logging and tracing for kernels running under QEMU, via the emulator's
//! debug port: every byte written to port `0x402` (with
//! `-debugcon`/`isa-debugcon` configured) appears on the host side.
//!
//! Two surfaces:
//!
//! * [`qemu_trace!`] — direct, zero-allocation formatted output to the debug
//!   port, available from the first instruction of kernel setup.
//! * [`QemuLogger`] — a [`log::Log`] backend routing the standard `log`
//!   macros to the same port, so the rest of the kernel logs through the
//!   facade and never mentions QEMU.
//!
//! The `enabled` feature (default on) compiles the backend in; without it —
//! or on a non-IA-32 host, where the port-output primitive does not exist —
//! everything degrades to no-ops with zero overhead.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;

pub use logger::QemuLogger;

#[cfg(all(feature = "enabled", target_arch = "x86"))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt::{self, Write};

    /// The port number for QEMU's debug port.
    const QEMU_DEBUG_PORT: u16 = 0x402;

    /// Write a single byte to QEMU's debug port.
    #[inline]
    pub fn dbg_putc(c: u8) {
        // Nothing is decoded at this address on real hardware; the write is
        // simply ignored there.
        unsafe { hal_ports::outb(QEMU_DEBUG_PORT, c) }
    }

    /// A `fmt::Write` sink over the debug port. Unbuffered; QEMU consumes
    /// bytes as fast as the `out` instructions retire.
    pub struct QemuSink;

    impl Write for QemuSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                dbg_putc(b);
            }
            Ok(())
        }

        #[inline]
        fn write_char(&mut self, c: char) -> fmt::Result {
            // UTF-8 encode without allocation.
            let mut buf = [0u8; 4];
            let s = c.encode_utf8(&mut buf);
            self.write_str(s)
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // Ignore errors; this is best-effort debug output.
        let _ = fmt::write(&mut QemuSink, args);
    }
}

#[cfg(not(all(feature = "enabled", target_arch = "x86")))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(_: fmt::Arguments) {
        // no-op when the backend is compiled out
    }
}

/// Formatted output straight to QEMU's debug port, `format!`-style.
///
/// No allocation: `format_args!` builds a lightweight `Arguments` that the
/// sink streams byte by byte.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
