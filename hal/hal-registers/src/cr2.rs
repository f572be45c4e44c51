use hal_addresses::VirtualAddress;

/// CR2 — Page-Fault Linear Address.
///
/// The CPU latches the linear address that caused the most recent page fault
/// into CR2 before delivering the `#PF` trap. The page-fault handler must
/// read it immediately on entry: the next page fault (on any code path,
/// including one taken inside the handler) overwrites it.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cr2(VirtualAddress);

impl Cr2 {
    /// The linear address whose translation faulted.
    #[inline]
    #[must_use]
    pub const fn faulting_address(self) -> VirtualAddress {
        self.0
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl crate::LoadRegisterUnsafe for Cr2 {
    /// # Safety
    /// `mov` from a control register is privileged; the caller must be
    /// running at CPL 0. The value is only meaningful inside a page-fault
    /// handler; at any other time it is stale.
    unsafe fn load_unsafe() -> Self {
        let addr: u32;
        unsafe {
            core::arch::asm!(
                "mov {}, cr2",
                out(reg) addr,
                options(nomem, nostack, preserves_flags)
            );
        }
        Self(VirtualAddress::new(addr))
    }
}
