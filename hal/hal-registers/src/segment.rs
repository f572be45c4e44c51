//! # Segment selectors and segment-register loads
//!
//! Segment selectors are 16-bit values loaded into CS/DS/ES/FS/GS/SS (and TR
//! for the TSS). A selector encodes:
//!
//! ```text
//!  15            3 2  1  0
//! +----------------+--+----+
//! |   Index[12:0]  |TI| RPL|
//! +----------------+--+----+  (TI=0 → GDT, TI=1 → LDT; RPL=0..3)
//! ```
//!
//! This module adds a thin type layer so you can't accidentally feed a random
//! `u16` to `ltr` or `mov gs`, while still exposing the **raw** encoding for
//! trap frames and inline asm.

use bitfield_struct::bitfield;

/// Requested Privilege Level — the low 2 bits of a selector.
///
/// Don't confuse it with **CPL** (taken from the running CS) or **DPL**
/// (stored in the target descriptor). For data-segment loads the CPU checks
/// `max(CPL, RPL) ≤ DPL`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum Rpl {
    Ring0 = 0,
    Ring1 = 1,
    Ring2 = 2,
    Ring3 = 3,
}

impl Rpl {
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Ring0,
            1 => Self::Ring1,
            2 => Self::Ring2,
            _ => Self::Ring3,
        }
    }

    #[inline]
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// Which descriptor table a selector addresses.
///
/// Only the GDT is used here; LDT is provided for completeness.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum Table {
    /// Global Descriptor Table
    Gdt = 0,
    /// Local Descriptor Table
    Ldt = 1,
}

impl Table {
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        if bits == 0 { Self::Gdt } else { Self::Ldt }
    }

    #[inline]
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// 16-bit segment selector (index/TI/RPL).
#[bitfield(u16)]
#[derive(Eq, PartialEq)]
pub struct SegmentSelector {
    /// Requested Privilege Level (bits 0..1).
    #[bits(2)]
    pub rpl: Rpl,
    /// Table Indicator (bit 2): 0 = GDT, 1 = LDT.
    #[bits(1)]
    pub ti: Table,
    /// Descriptor index (bits 3..15).
    #[bits(13)]
    pub index: u16,
}

impl SegmentSelector {
    /// Create a GDT selector from a descriptor index and RPL.
    #[inline]
    #[must_use]
    pub const fn gdt(index: u16, rpl: Rpl) -> Self {
        Self::new().with_index(index).with_ti(Table::Gdt).with_rpl(rpl)
    }

    /// The raw 16-bit encoding the CPU actually loads.
    #[inline]
    #[must_use]
    pub const fn encode(self) -> u16 {
        self.into_bits()
    }

    /// Reinterpret a raw selector value, e.g. the CS saved in a trap frame.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self::from_bits(raw)
    }
}

// Encoding sanity: (index << 3) | (TI << 2) | RPL.
const _: () = {
    assert!(SegmentSelector::gdt(1, Rpl::Ring0).encode() == 0x08);
    assert!(SegmentSelector::gdt(2, Rpl::Ring0).encode() == 0x10);
    assert!(SegmentSelector::gdt(3, Rpl::Ring3).encode() == 0x1B);
    assert!(SegmentSelector::gdt(4, Rpl::Ring3).encode() == 0x23);
};

/// Load a selector into GS.
///
/// GS is the segment this kernel dedicates to per-CPU/thread-local data;
/// after the load, every `gs:`-relative access resolves through the new
/// selector's descriptor.
///
/// # Safety
/// - The selector must reference a present, readable data descriptor in the
///   active GDT (or be null). A bad selector raises `#GP` *here*; a stale
///   descriptor faults on the next `gs:` access.
/// - Callers at CPL 0 loading a user-RPL selector must know what they are
///   doing; the usual pattern loads the per-CPU data selector during CPU
///   bring-up and on every return from user mode.
#[cfg(all(feature = "asm", target_arch = "x86"))]
#[inline]
pub unsafe fn load_gs(sel: SegmentSelector) {
    let sel = sel.encode();
    unsafe {
        core::arch::asm!(
            "mov gs, {0:x}",
            in(reg) sel,
            options(nostack, preserves_flags)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip_preserves_fields() {
        let sel = SegmentSelector::from_raw(0x2B);
        assert_eq!(sel.index(), 5);
        assert_eq!(sel.ti(), Table::Gdt);
        assert_eq!(sel.rpl(), Rpl::Ring3);
        assert_eq!(sel.encode(), 0x2B);
    }

    #[test]
    fn ldt_bit_is_bit_2() {
        let sel = SegmentSelector::new().with_index(1).with_ti(Table::Ldt);
        assert_eq!(sel.encode(), 0b1100);
    }
}
