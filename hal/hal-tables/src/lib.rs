//! # Descriptor-Table Control
//!
//! Loading the CPU's descriptor-table registers: GDTR (`lgdt`), IDTR
//! (`lidt`), and the task register (`ltr`).
//!
//! This crate owns the *loading* mechanism only. The descriptor and gate
//! record layouts are an external collaborator's responsibility — here they
//! are opaque types whose address and byte size are all we ever touch.
//!
//! ## Failure semantics
//!
//! None of these operations validate table contents. An invalid table loads
//! just fine and faults on the *next* use of a descriptor from it. That is a
//! documented hazard of the hardware interface, not something this layer can
//! or should catch.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

use core::marker::PhantomData;
use hal_addresses::VirtualAddress;

/// A single GDT entry. Never defined here; the segmentation layer owns the
/// real layout. This crate only takes its address.
#[repr(C)]
pub struct SegmentDescriptor {
    _opaque: [u8; 0],
    _marker: PhantomData<*mut u8>,
}

/// A single IDT entry (interrupt/trap gate). Never defined here; the
/// interrupt layer owns the real layout.
#[repr(C)]
pub struct GateDescriptor {
    _opaque: [u8; 0],
    _marker: PhantomData<*mut u8>,
}

/// Pointer format required by `lgdt` and `lidt`.
///
/// The CPU reads exactly `limit + 1` bytes starting at `base` when walking
/// the table, so the limit stores the table size **minus one**.
#[repr(C, packed)]
#[derive(Copy, Clone)]
pub struct DescriptorTablePointer {
    /// Size of the table **minus one** in bytes.
    limit: u16,
    /// Base **linear address** of the table in memory.
    base: u32,
}

impl DescriptorTablePointer {
    /// Pack a table base and its exact byte size into the hardware operand.
    ///
    /// `size` is the full byte length of the table; the `size - 1` limit
    /// encoding happens here and nowhere else.
    ///
    /// # Panics
    /// In debug builds, if `size` is zero or exceeds the architectural
    /// maximum of 65536 bytes.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(base: VirtualAddress, size: usize) -> Self {
        debug_assert!(size > 0, "a descriptor table cannot be empty");
        debug_assert!(size <= 0x1_0000, "descriptor-table limit is 16 bits");
        Self {
            limit: (size - 1) as u16,
            base: base.as_u32(),
        }
    }

    /// The encoded limit field (`size - 1`).
    #[inline]
    #[must_use]
    pub const fn limit(self) -> u16 {
        self.limit
    }

    /// The table's linear base address.
    #[inline]
    #[must_use]
    pub const fn base(self) -> VirtualAddress {
        VirtualAddress::new(self.base)
    }
}

// The CPU reads this operand as 2 + 4 bytes with no padding anywhere.
const _: () = {
    assert!(core::mem::size_of::<DescriptorTablePointer>() == 6);
    assert!(core::mem::align_of::<DescriptorTablePointer>() == 1);
};

/// Install a new Global Descriptor Table.
///
/// Packs `(size - 1, base)` into a transient [`DescriptorTablePointer`] on
/// the stack and issues `lgdt`.
///
/// # Safety
/// - Requires CPL 0.
/// - `gdt` must point to a fully initialized table of exactly `size` bytes
///   whose memory stays **mapped and readable** for as long as it is active;
///   the CPU fetches descriptors from it on every segment load.
/// - Callers must ensure no interrupt or fault observes a half-installed
///   state (the usual pattern loads with interrupts disabled).
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn load_gdt(gdt: *const SegmentDescriptor, size: usize) {
    let ptr = DescriptorTablePointer::new(VirtualAddress::from_ptr(gdt), size);

    unsafe {
        core::arch::asm!(
            "lgdt [{}]",
            in(reg) &raw const ptr,
            options(readonly, nostack, preserves_flags)
        );
    }
}

/// Install a new Interrupt Descriptor Table.
///
/// Identical contract to [`load_gdt`], issuing `lidt`.
///
/// # Safety
/// - Requires CPL 0.
/// - `idt` must point to a fully initialized gate table of exactly `size`
///   bytes that stays mapped and readable while active; the CPU reads a gate
///   from it on every interrupt and exception.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn load_idt(idt: *const GateDescriptor, size: usize) {
    let ptr = DescriptorTablePointer::new(VirtualAddress::from_ptr(idt), size);

    unsafe {
        core::arch::asm!(
            "lidt [{}]",
            in(reg) &raw const ptr,
            options(readonly, nostack, preserves_flags)
        );
    }
}

/// Load the Task Register with a TSS selector.
///
/// The selector must refer to a **present, available TSS** system descriptor
/// in the current GDT; the CPU marks it busy as a side effect.
///
/// # Safety
/// - Requires CPL 0, and the GDT containing `sel` must already be active.
/// - The TSS memory must remain resident; the CPU reads the kernel stack
///   pointer from it on every ring crossing.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn load_task_register(sel: hal_registers::SegmentSelector) {
    let sel = sel.encode();
    unsafe {
        core::arch::asm!(
            "ltr {0:x}",
            in(reg) sel,
            options(nostack, preserves_flags)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_encodes_size_minus_one() {
        // A 256-entry GDT of 8-byte descriptors.
        let ptr = DescriptorTablePointer::new(VirtualAddress::new(0x0010_0000), 256 * 8);
        assert_eq!(ptr.limit(), 0x07FF);
    }

    #[test]
    fn base_splits_into_the_hardware_halves() {
        let base = VirtualAddress::new(0x8011_A020);
        let ptr = DescriptorTablePointer::new(base, 8);
        assert_eq!(ptr.base(), base);
        assert_eq!(ptr.base().low16(), 0xA020);
        assert_eq!(ptr.base().high16(), 0x8011);
    }

    #[test]
    fn maximum_table_size_fits_the_limit_field() {
        let ptr = DescriptorTablePointer::new(VirtualAddress::zero(), 0x1_0000);
        assert_eq!(ptr.limit(), 0xFFFF);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot be empty")]
    fn empty_table_is_rejected_in_debug() {
        let _ = DescriptorTablePointer::new(VirtualAddress::zero(), 0);
    }
}
