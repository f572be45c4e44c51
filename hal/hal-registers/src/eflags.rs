use bitfield_struct::bitfield;

/// Architectural EFLAGS model for IA-32 protected mode.
///
/// Bits that are architecturally fixed are modeled with defaults so a fresh
/// value is already well-formed (bit 1 is always 1, reserved bits are 0).
///
/// Of interest to this layer is mostly `IF` (bit 9): whether maskable
/// interrupts are delivered. The interrupt-disable guard in `hal-sync` reads
/// it through this model before touching `cli`/`sti`.
#[bitfield(u32, order = Lsb)]
pub struct Eflags {
    /// Carry Flag
    pub cf_carry: bool, // 0

    /// Always 1.
    #[bits(default = true)]
    _always1: bool, // 1

    /// Parity Flag
    pub pf_parity: bool, // 2

    /// Reserved (always 0)
    #[bits(default = false)]
    _rsvd3: bool, // 3

    /// Adjust Flag
    pub af_adjust: bool, // 4

    /// Reserved (always 0)
    #[bits(default = false)]
    _rsvd5: bool, // 5

    /// Zero Flag
    pub zf_zero: bool, // 6

    /// Sign Flag
    pub sf_sign: bool, // 7

    /// Trap Flag
    pub tf_trap: bool, // 8

    /// Interrupt Enable Flag
    pub if_interrupt_enable: bool, // 9

    /// Direction Flag
    pub df_direction: bool, // 10

    /// Overflow Flag
    pub of_overflow: bool, // 11

    /// I/O Privilege Level (2 bits)
    #[bits(2)]
    pub iopl: u8, // 12–13

    /// Nested Task
    pub nt_nested: bool, // 14

    /// Reserved (always 0)
    #[bits(default = false)]
    _rsvd15: bool, // 15

    /// Resume Flag
    pub rf_resume: bool, // 16

    /// Virtual-8086 Mode
    pub vm_virtual_8086: bool, // 17

    /// Alignment Check
    pub ac_alignment_check: bool, // 18

    /// Virtual Interrupt Flag
    pub vif_virtual_interrupt: bool, // 19

    /// Virtual Interrupt Pending
    pub vip_virtual_interrupt_pending: bool, // 20

    /// ID Flag: allows toggling CPUID.
    pub id_cpuid: bool, // 21

    /// Reserved 22–31 (all zero)
    #[bits(10)]
    _reserved_rest: u16,
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl crate::LoadRegister for Eflags {
    /// Read the current EFLAGS via `pushfd`/`pop`.
    ///
    /// Reading the flags is unprivileged and disturbs no other CPU state.
    fn load() -> Self {
        let flags: u32;
        unsafe {
            core::arch::asm!(
                "pushfd",
                "pop {}",
                out(reg) flags,
                options(nomem, preserves_flags)
            );
        }
        Self::from_bits(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_enable_is_bit_9() {
        let flags = Eflags::from_bits(1 << 9);
        assert!(flags.if_interrupt_enable());
        assert!(!Eflags::from_bits(0).if_interrupt_enable());
    }

    #[test]
    fn fresh_value_has_fixed_bit_1_set() {
        assert_eq!(Eflags::new().into_bits(), 0b10);
    }

    #[test]
    fn iopl_occupies_bits_12_and_13() {
        let flags = Eflags::new().with_iopl(3);
        assert_eq!(flags.into_bits() & 0x3000, 0x3000);
    }
}
