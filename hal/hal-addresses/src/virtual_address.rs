use core::fmt;
use core::ops::{Add, AddAssign};
use core::ptr::NonNull;

/// Virtual (linear) memory address.
///
/// A thin wrapper around `u32` that denotes **virtual** addresses. It does
/// not validate anything at runtime; it only carries the *kind* of address at
/// the type level so you don't accidentally mix virtual and physical values.
///
/// ### Invariants
/// - No invariant beyond "this is intended to be a linear address".
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(u32);

impl VirtualAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The linear address of `ptr`.
    ///
    /// Pointers are 32 bits wide on the only target this HAL supports; on a
    /// wider host (tests) the low 32 bits are taken.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as u32)
    }

    #[inline]
    #[must_use]
    pub fn from_nonnull<T>(ptr: NonNull<T>) -> Self {
        Self::from_ptr(ptr.as_ptr())
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Low 16 bits, as packed into hardware descriptor-pointer operands.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn low16(self) -> u16 {
        self.0 as u16
    }

    /// High 16 bits, as packed into hardware descriptor-pointer operands.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn high16(self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA(0x{:08X})", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<u32> for VirtualAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl Add<u32> for VirtualAddress {
    type Output = Self;

    #[inline]
    fn add(self, rhs: u32) -> Self {
        Self(self.0.wrapping_add(rhs))
    }
}

impl AddAssign<u32> for VirtualAddress {
    #[inline]
    fn add_assign(&mut self, rhs: u32) {
        self.0 = self.0.wrapping_add(rhs);
    }
}
