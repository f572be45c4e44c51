//! # Virtual and Physical Memory Address Types
//!
//! Strongly typed wrappers for raw 32-bit memory addresses.
//!
//! ## Overview
//!
//! Several privileged operations in this HAL take or return plain addresses
//! whose *kind* matters even though their representation is just a `u32`:
//!
//! | Concept | Meaning |
//! |----------|----------|
//! | [`VirtualAddress`] | A linear address, translated through the active page directory. |
//! | [`PhysicalAddress`] | A physical address, as seen on the memory bus. |
//!
//! `CR2` reports the *linear* address of a page fault; `CR3` takes the
//! *physical* base of a page directory; `lgdt`/`lidt` take *linear* table
//! bases. Mixing the two silently produces a running-but-wrong kernel, so the
//! distinction lives at the type level while staying a zero-cost `u32`.
//!
//! Page/frame arithmetic is deliberately absent: paging structures are owned
//! by the memory manager, not this layer.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod physical_address;
mod virtual_address;

pub use physical_address::PhysicalAddress;
pub use virtual_address::VirtualAddress;
