//! The `RegisterPage` capability trait.
//!
//! Both backends (simulated heap page, mmap'd device window) produce an
//! identical addressable region; everything above this trait is
//! backend-agnostic. The backend is chosen once at startup by the factory in
//! [`registry`](crate::registry) — protocol code never branches on it.

use crate::regs::Reg;

/// A device page addressed as fixed-offset 32-bit slots.
///
/// All accesses must have volatile semantics: the backing store may be
/// mutated by something outside the program's control flow (hardware, or the
/// simulated peer), so no access may be reordered, cached, or elided.
/// Releasing the region belongs to the implementor's `Drop`.
///
/// `write_slot` takes `&self` because slot writes do not mutate any Rust
/// state the type tracks; exclusivity of the region is enforced by ownership
/// of the page itself (exactly one live handle per region).
pub trait RegisterPage {
    /// Volatile read of one slot.
    fn read_slot(&self, reg: Reg) -> u32;

    /// Volatile write of one slot.
    fn write_slot(&self, reg: Reg, value: u32);
}

impl<P: RegisterPage + ?Sized> RegisterPage for Box<P> {
    #[inline]
    fn read_slot(&self, reg: Reg) -> u32 {
        (**self).read_slot(reg)
    }

    #[inline]
    fn write_slot(&self, reg: Reg, value: u32) {
        (**self).write_slot(reg, value)
    }
}
