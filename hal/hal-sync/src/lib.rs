//! # Cross-CPU and local-CPU exclusion primitives
//!
//! Two very different tools live here, and the distinction matters on
//! multiprocessor machines:
//!
//! - [`exchange`] — the atomic 32-bit swap (`lock xchg`). The **only**
//!   primitive in this HAL that is safe for concurrent use from multiple
//!   CPUs on the same memory; every cross-CPU lock is built from it by
//!   higher layers.
//! - [`IrqGuard`] and the `cli`/`sti` wrappers — interrupt masking. Strictly
//!   **per-CPU**: masking interrupts on one CPU does nothing to the others,
//!   so this alone never protects shared memory on SMP. It protects a CPU
//!   from its own interrupt handlers, nothing more.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod exchange;
pub mod irq;

pub use exchange::exchange;
#[cfg(all(feature = "asm", target_arch = "x86"))]
pub use irq::IrqGuard;
