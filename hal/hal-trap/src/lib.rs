//! # Trap-Frame Layout
//!
//! The fixed-order record of CPU register state saved on the kernel stack
//! when control transfers into the kernel on an interrupt, exception, or
//! explicit trap.
//!
//! ## Who builds it, who reads it
//!
//! Nothing in software ever *constructs* a [`TrapFrame`]. It comes into
//! existence in three layers, top of stack last:
//!
//! 1. **Hardware** pushes EFLAGS, CS, EIP (and, when the trap crossed from a
//!    lower ring, the previous SS:ESP first), plus an error code for the
//!    vectors that have one.
//! 2. The **vector stub** pushes a zero error code where the hardware didn't,
//!    then the vector number.
//! 3. The common **entry stub** pushes DS, ES, FS, GS and then the eight
//!    general-purpose registers with a single `pushal`, and hands the
//!    dispatcher a pointer to the completed frame.
//!
//! The dispatcher may read any field and may rewrite fields (say, `eip` to
//! change the resume address) before the stub pops everything back and
//! returns with `iretd`.
//!
//! ## Layout is the contract
//!
//! Every byte offset below is dictated by that push sequence. Reordering a
//! field, or dropping the never-read `oesp` slot, would shift every offset
//! after it and desynchronize the struct from the stack image — the kind of
//! bug no amount of ordinary testing catches. The offsets are therefore
//! pinned twice: compile-time size assertions here, `offset_of!` tests below.

#![cfg_attr(not(any(test, doctest)), no_std)]

use hal_registers::{Eflags, Rpl, SegmentSelector};

pub mod vector;

/// Complete saved CPU state for one trap, as laid out on the kernel stack.
///
/// Field order is the exact memory order; see the module docs for who pushes
/// what. The trailing [`esp`](Self::esp)/[`ss`](Self::ss) pair is only
/// meaningful when [`crossed_rings`](Self::crossed_rings) is true — on a
/// same-ring trap the hardware pushes neither, and the frame ends after
/// [`eflags`](Self::eflags).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TrapFrame {
    // Pushed by `pushal` in the entry stub.
    pub edi: u32,
    pub esi: u32,
    pub ebp: u32,
    /// The stack pointer `pushal` saved. Useless & ignored: it points into
    /// the frame itself, not at anything the dispatcher may trust. The slot
    /// exists because `pushal` unconditionally writes it; it stays so the
    /// offsets of everything after it match the hardware.
    pub oesp: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,

    // Segment registers pushed by the entry stub. The stack slots are
    // 32 bits wide, so each 16-bit selector carries 16 bits of padding.
    pub gs: u16,
    _pad_gs: u16,
    pub fs: u16,
    _pad_fs: u16,
    pub es: u16,
    _pad_es: u16,
    pub ds: u16,
    _pad_ds: u16,

    /// Which event this is; see [`vector`].
    pub trap_no: u32,

    // Below here defined by the hardware (the vector stub pushes a zero
    // error code for vectors that don't have one).
    pub error_code: u32,
    /// Instruction pointer the trap will resume at. The dispatcher may
    /// rewrite it to redirect the return.
    pub eip: u32,
    pub cs: u16,
    _pad_cs: u16,
    /// Flags at the moment of the trap; restored by `iretd`.
    pub eflags: Eflags,

    // Below here only when crossing rings, such as from user to kernel.
    pub esp: u32,
    pub ss: u16,
    _pad_ss: u16,
}

impl TrapFrame {
    /// Frame size in bytes for a ring-crossing trap (user → kernel).
    pub const SIZE: usize = 76;

    /// Frame size in bytes for a same-ring trap, where the hardware pushes
    /// no SS:ESP and the frame ends after `eflags`.
    pub const SIZE_SAME_RING: usize = 68;

    /// Whether this trap arrived from a lower privilege level.
    ///
    /// Decided by the RPL of the saved CS: only then did the hardware switch
    /// stacks and push the previous SS:ESP, i.e. only then are
    /// [`esp`](Self::esp) and [`ss`](Self::ss) part of the frame.
    #[inline]
    #[must_use]
    pub fn crossed_rings(&self) -> bool {
        SegmentSelector::from_raw(self.cs).rpl() != Rpl::Ring0
    }
}

const _: () = {
    assert!(core::mem::size_of::<TrapFrame>() == TrapFrame::SIZE);
    assert!(core::mem::align_of::<TrapFrame>() == 4);
};

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    /// Every offset the entry stub and the hardware agree on, computed from
    /// the documented push sequence: eight 32-bit general-purpose slots,
    /// four padded selectors, vector, error code, then the iret image.
    #[test]
    fn field_offsets_match_the_stack_image() {
        assert_eq!(offset_of!(TrapFrame, edi), 0);
        assert_eq!(offset_of!(TrapFrame, esi), 4);
        assert_eq!(offset_of!(TrapFrame, ebp), 8);
        assert_eq!(offset_of!(TrapFrame, oesp), 12);
        assert_eq!(offset_of!(TrapFrame, ebx), 16);
        assert_eq!(offset_of!(TrapFrame, edx), 20);
        assert_eq!(offset_of!(TrapFrame, ecx), 24);
        assert_eq!(offset_of!(TrapFrame, eax), 28);

        assert_eq!(offset_of!(TrapFrame, gs), 32);
        assert_eq!(offset_of!(TrapFrame, fs), 36);
        assert_eq!(offset_of!(TrapFrame, es), 40);
        assert_eq!(offset_of!(TrapFrame, ds), 44);

        assert_eq!(offset_of!(TrapFrame, trap_no), 48);
        assert_eq!(offset_of!(TrapFrame, error_code), 52);
        assert_eq!(offset_of!(TrapFrame, eip), 56);
        assert_eq!(offset_of!(TrapFrame, cs), 60);
        assert_eq!(offset_of!(TrapFrame, eflags), 64);

        assert_eq!(offset_of!(TrapFrame, esp), 68);
        assert_eq!(offset_of!(TrapFrame, ss), 72);
    }

    #[test]
    fn selector_padding_keeps_32_bit_slots() {
        assert_eq!(offset_of!(TrapFrame, _pad_gs), 34);
        assert_eq!(offset_of!(TrapFrame, _pad_fs), 38);
        assert_eq!(offset_of!(TrapFrame, _pad_es), 42);
        assert_eq!(offset_of!(TrapFrame, _pad_ds), 46);
        assert_eq!(offset_of!(TrapFrame, _pad_cs), 62);
        assert_eq!(offset_of!(TrapFrame, _pad_ss), 74);
    }

    #[test]
    fn same_ring_layout_ends_before_the_stack_switch_fields() {
        assert_eq!(TrapFrame::SIZE_SAME_RING, offset_of!(TrapFrame, esp));
        assert_eq!(core::mem::size_of::<TrapFrame>(), TrapFrame::SIZE);
    }

    #[test]
    fn ring_crossing_is_read_from_the_saved_cs_rpl() {
        let mut frame: TrapFrame = unsafe { core::mem::zeroed() };
        frame.cs = SegmentSelector::gdt(1, Rpl::Ring0).encode();
        assert!(!frame.crossed_rings());

        frame.cs = SegmentSelector::gdt(4, Rpl::Ring3).encode();
        assert!(frame.crossed_rings());
    }
}
