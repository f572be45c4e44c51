//! Interrupt-flag control for short, local critical sections.
//!
//! While interrupts are disabled the current CPU delivers no maskable
//! interrupt until they are re-enabled; the window should be short. The
//! interrupt flag is per-CPU state — disabling here says nothing about other
//! CPUs, which is why cross-CPU exclusion must be layered on
//! [`exchange`](crate::exchange) instead.

#[cfg(all(feature = "asm", target_arch = "x86"))]
use hal_registers::{Eflags, LoadRegister};

/// Disables hardware interrupts (`cli`).
///
/// # Safety & Privilege
///
/// Safe to *call*, but must only run in contexts where `cli` is permitted
/// (CPL ≤ IOPL, in practice: kernel mode). Leaving interrupts disabled for
/// long stretches stalls the whole CPU's event handling.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub fn cli_stop_interrupts() {
    unsafe { core::arch::asm!("cli", options(nomem, nostack, preserves_flags)) }
}

/// Enables hardware interrupts (`sti`).
///
/// # Safety & Privilege
///
/// Must only be called in contexts where `sti` is permitted. Typically used
/// to restore a previously disabled interrupt state.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub fn sti_enable_interrupts() {
    unsafe { core::arch::asm!("sti", options(nomem, nostack, preserves_flags)) }
}

/// Whether the current CPU is delivering maskable interrupts (EFLAGS.IF).
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
#[must_use]
pub fn interrupts_enabled() -> bool {
    Eflags::load().if_interrupt_enable()
}

/// RAII guard for an interrupts-disabled critical section.
///
/// On construction, saves whether interrupts were enabled and disables them;
/// on drop, re-enables them **only if** they were enabled before. Guards
/// therefore nest correctly: the innermost drop is a no-op and the outermost
/// restores delivery.
///
/// # Platform
///
/// Uses `cli`/`sti` and the EFLAGS read, so it exists only on IA-32 builds
/// with the `asm` feature.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[must_use = "interrupts are re-enabled when the guard drops"]
pub struct IrqGuard {
    was_enabled: bool,
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl IrqGuard {
    /// Save the current interrupt state and disable interrupts.
    #[inline]
    pub fn new() -> Self {
        let was_enabled = interrupts_enabled();
        cli_stop_interrupts();
        Self { was_enabled }
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl Default for IrqGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl Drop for IrqGuard {
    #[inline]
    fn drop(&mut self) {
        if self.was_enabled {
            sti_enable_interrupts();
        }
    }
}
