//! Trap vector numbers.
//!
//! The architectural exception vectors (0–19), plus where this kernel maps
//! the rest: external interrupts start at [`IRQ_BASE`] (the low 32 vectors
//! are reserved by the CPU), and the system-call gate sits at [`SYSCALL`].
//!
//! What happens for each vector is the dispatcher's business; these constants
//! only give [`TrapFrame::trap_no`](crate::TrapFrame::trap_no) a name.

pub const DIVIDE_ERROR: u32 = 0;
pub const DEBUG: u32 = 1;
pub const NMI: u32 = 2;
pub const BREAKPOINT: u32 = 3;
pub const OVERFLOW: u32 = 4;
pub const BOUND_RANGE: u32 = 5;
pub const INVALID_OPCODE: u32 = 6;
pub const DEVICE_NOT_AVAILABLE: u32 = 7;
pub const DOUBLE_FAULT: u32 = 8;
pub const INVALID_TSS: u32 = 10;
pub const SEGMENT_NOT_PRESENT: u32 = 11;
pub const STACK_FAULT: u32 = 12;
pub const GENERAL_PROTECTION: u32 = 13;
/// The faulting linear address is latched in CR2; read it first.
pub const PAGE_FAULT: u32 = 14;
pub const FPU_ERROR: u32 = 16;
pub const ALIGNMENT_CHECK: u32 = 17;
pub const MACHINE_CHECK: u32 = 18;
pub const SIMD_ERROR: u32 = 19;

/// First vector available for external (maskable) interrupts.
pub const IRQ_BASE: u32 = 32;

/// Software trap gate for system calls.
pub const SYSCALL: u32 = 64;
