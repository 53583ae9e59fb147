//! Simulated page backend.
//!
//! Allocates a zeroed heap page and seeds it the way real hardware presents
//! itself after reset: STATUS = ready, plus representative latency and
//! throughput values so callers observe plausible metrics without hardware.
//!
//! The backend also models the peer side of the handshake, because a channel
//! is useless without something raising status bits: a CONTROL write carrying
//! the submit command latches the staged update into the best-bid or best-ask
//! result slots, and a CONTROL write carrying the query command marks the
//! result slots valid. The model is intentionally minimal — one price level
//! per side, no matching — since order-book logic lives on the other side of
//! the page by design.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ptr;

use axl_core::error::AxlError;

use crate::page::RegisterPage;
use crate::regs::{PAGE_SIZE, Reg, SIM_LATENCY_NS, SIM_THROUGHPUT, ctrl, status};

/// A simulated device page backed by a zeroed heap allocation.
///
/// Exclusively owns its allocation; the region is released on drop.
pub struct SimPage {
    base: *mut u32,
    /// Whether the in-process peer model reacts to CONTROL writes. Disabled
    /// only for protocol tests that need a silent peer.
    peer: bool,
}

// SAFETY: the page is exclusively owned and the pointer never escapes.
unsafe impl Send for SimPage {}

impl SimPage {
    /// Allocate and seed a simulated page with the peer model enabled.
    pub fn new() -> Result<Self, AxlError> {
        Self::with_peer(true)
    }

    /// A page whose peer never advances any status bit past the seeded
    /// READY state. Used to exercise timeout and status-bit isolation.
    pub fn inert() -> Result<Self, AxlError> {
        Self::with_peer(false)
    }

    fn with_peer(peer: bool) -> Result<Self, AxlError> {
        let layout = Layout::from_size_align(PAGE_SIZE, PAGE_SIZE)
            .map_err(|e| AxlError::AllocationFailed(format!("page layout: {e}")))?;

        // SAFETY: layout is non-zero; the pointer is checked before use and
        // the region is zeroed on allocation.
        let base = unsafe { alloc_zeroed(layout) } as *mut u32;
        if base.is_null() {
            return Err(AxlError::AllocationFailed("simulated page allocation".into()));
        }

        let page = Self { base, peer };
        page.write_slot(Reg::Status, status::READY);
        page.write_slot(Reg::Latency, SIM_LATENCY_NS);
        page.write_slot(Reg::Throughput, SIM_THROUGHPUT);
        Ok(page)
    }

    /// Peer reaction to a CONTROL write. Runs synchronously inside the
    /// writer's call, which is indistinguishable from a fast peer as far as
    /// the protocol layer is concerned.
    fn peer_step(&self, control: u32) {
        if control & ctrl::QUERY != 0 {
            let st = self.read_slot(Reg::Status);
            self.raw_write(Reg::Status, st | status::BOOK_VALID);
        } else if control & ctrl::VALID != 0 {
            // Latch the staged update into the matching side of the book.
            let (price_h, price_l, qty) = (
                self.read_slot(Reg::PriceH),
                self.read_slot(Reg::PriceL),
                self.read_slot(Reg::Quantity),
            );
            if control & ctrl::BID != 0 {
                self.raw_write(Reg::BestBidH, price_h);
                self.raw_write(Reg::BestBidL, price_l);
                self.raw_write(Reg::BestBidQty, qty);
            } else {
                self.raw_write(Reg::BestAskH, price_h);
                self.raw_write(Reg::BestAskL, price_l);
                self.raw_write(Reg::BestAskQty, qty);
            }
            let st = self.read_slot(Reg::Status);
            self.raw_write(Reg::Status, st | status::READY);
        }
    }

    /// Slot write without the peer hook (the peer writing its own slots).
    #[inline]
    fn raw_write(&self, reg: Reg, value: u32) {
        // SAFETY: reg.offset() < PAGE_SLOTS, within the allocation.
        unsafe { ptr::write_volatile(self.base.add(reg.offset()), value) }
    }
}

impl RegisterPage for SimPage {
    #[inline]
    fn read_slot(&self, reg: Reg) -> u32 {
        // SAFETY: reg.offset() < PAGE_SLOTS, within the allocation.
        unsafe { ptr::read_volatile(self.base.add(reg.offset())) }
    }

    #[inline]
    fn write_slot(&self, reg: Reg, value: u32) {
        self.raw_write(reg, value);
        if self.peer && reg == Reg::Control {
            self.peer_step(value);
        }
    }
}

impl Drop for SimPage {
    fn drop(&mut self) {
        if !self.base.is_null()
            && let Ok(layout) = Layout::from_size_align(PAGE_SIZE, PAGE_SIZE)
        {
            // SAFETY: base came from alloc_zeroed with this exact layout.
            unsafe { dealloc(self.base as *mut u8, layout) }
        }
    }
}
