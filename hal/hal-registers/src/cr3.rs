use bitfield_struct::bitfield;
use hal_addresses::PhysicalAddress;

/// CR3 — Page-Directory Base Register (IA-32, non-PAE).
///
/// Holds the physical base address of the page directory and cache-control
/// flags for page-directory walks. Assumes standard 4 KiB alignment.
///
/// Storing CR3 is the address-space switch: the CPU flushes its non-global
/// TLB entries and every subsequent memory access is translated through the
/// new directory.
#[bitfield(u32)]
pub struct Cr3 {
    /// Bits 0–2 — Reserved (must be 0).
    #[bits(3)]
    pub reserved0: u8,

    /// Bit 3 — PWT: Page-level Write-Through for page-directory accesses.
    pub pwt: bool,

    /// Bit 4 — PCD: Page-level Cache Disable for page-directory accesses.
    pub pcd: bool,

    /// Bits 5–11 — Reserved (must be 0 when written).
    #[bits(7)]
    pub reserved1: u8,

    /// Bits 12–31 — Page-directory physical base >> 12.
    ///
    /// To get the full physical address:
    /// `pd_base_phys = pd_base_4k << 12`.
    #[bits(20)]
    pd_base_4k: u32,
}

impl Cr3 {
    /// Create a `Cr3` value from a page-directory physical base and flags.
    ///
    /// `pd_phys` must be 4 KiB-aligned.
    #[must_use]
    pub fn from_page_directory_phys(pd_phys: PhysicalAddress, pwt: bool, pcd: bool) -> Self {
        debug_assert!(pd_phys.is_page_aligned(), "page directory must be 4K-aligned");
        Self::new()
            .with_pwt(pwt)
            .with_pcd(pcd)
            .with_pd_base_4k(pd_phys.as_u32() >> 12)
    }

    /// Return the full physical address of the page-directory base.
    #[must_use]
    pub const fn page_directory_phys(self) -> PhysicalAddress {
        PhysicalAddress::new(self.pd_base_4k() << 12)
    }

}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl Cr3 {
    /// Install this value as the active page directory.
    ///
    /// # Safety
    /// - Requires CPL 0.
    /// - The page directory must be a valid, resident translation for all
    ///   memory the kernel touches afterwards — including the instruction
    ///   stream executing this store. A wrong directory does not fail here;
    ///   it faults (or silently mistranslates) on the *next* access.
    #[inline]
    pub unsafe fn switch_address_space(self) {
        unsafe { <Self as crate::StoreRegisterUnsafe>::store_unsafe(self) }
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl crate::StoreRegisterUnsafe for Cr3 {
    unsafe fn store_unsafe(self) {
        let cr3 = self.into_bits();
        unsafe {
            core::arch::asm!(
                "mov cr3, {}",
                in(reg) cr3,
                options(nostack, preserves_flags)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_round_trips_through_the_bitfield() {
        let pd = PhysicalAddress::new(0x003F_D000);
        let cr3 = Cr3::from_page_directory_phys(pd, false, false);
        assert_eq!(cr3.page_directory_phys(), pd);
        assert_eq!(cr3.into_bits(), 0x003F_D000);
    }

    #[test]
    fn cache_flags_land_in_bits_3_and_4() {
        let cr3 = Cr3::from_page_directory_phys(PhysicalAddress::zero(), true, true);
        assert_eq!(cr3.into_bits(), 0b1_1000);
    }
}
