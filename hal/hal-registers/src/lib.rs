//! # Typed IA-32 Registers
//!
//! Bit-exact models of the CPU registers this HAL touches (EFLAGS, CR2, CR3,
//! segment selectors), plus the privileged instructions that move them.
//!
//! The register *models* are plain value types and build on any host; the
//! instruction layer is gated behind the `asm` feature and only exists on
//! `target_arch = "x86"`, since the encodings are IA-32 specific.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(feature = "cr2")]
pub mod cr2;

#[cfg(feature = "cr3")]
pub mod cr3;

#[cfg(feature = "eflags")]
pub mod eflags;

pub mod segment;

#[cfg(feature = "cr2")]
pub use cr2::Cr2;
#[cfg(feature = "cr3")]
pub use cr3::Cr3;
#[cfg(feature = "eflags")]
pub use eflags::Eflags;
pub use segment::{Rpl, SegmentSelector, Table};

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn store_unsafe(self);
}

pub trait LoadRegister {
    /// # Safety
    /// It is generally safe to load this register even from user mode.
    fn load() -> Self;
}

pub trait StoreRegister {
    /// # Safety
    /// It is generally safe to store this register even from user mode.
    fn store(self);
}

impl<T> LoadRegisterUnsafe for T
where
    T: LoadRegister,
{
    #[inline]
    unsafe fn load_unsafe() -> Self {
        <Self as LoadRegister>::load()
    }
}

impl<T> StoreRegisterUnsafe for T
where
    T: StoreRegister,
{
    #[inline]
    unsafe fn store_unsafe(self) {
        <Self as StoreRegister>::store(self);
    }
}
