//! The register file layout — the wire contract with the accelerator.
//!
//! The device page is addressed as fixed-offset 32-bit slots. This offset
//! table must be preserved bit-for-bit when interoperating with an existing
//! peer; it is the only thing both sides agree on.
//!
//! Ordering rules (the entire correctness argument of the protocol):
//! - Slot writes before CONTROL are unobservable by the peer; CONTROL is
//!   written last and is the synchronization point.
//! - One outstanding request per channel: submit and query share the
//!   CONTROL/STATUS pair.
//! - Each request kind completes on its own STATUS bit, so a caller cannot
//!   mistake one completion for the other.

/// Size of the device page in bytes (one BAR page).
pub const PAGE_SIZE: usize = 4096;

/// Number of 32-bit slots in the page.
pub const PAGE_SLOTS: usize = PAGE_SIZE / 4;

/// Named slot offsets within the device page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Reg {
    /// Instrument symbol, 4 bytes packed into one word.
    Symbol = 0,
    /// High 32 bits of the fixed-point price.
    PriceH = 1,
    /// Low 32 bits of the fixed-point price.
    PriceL = 2,
    /// Update quantity.
    Quantity = 3,
    /// Request control word — written last, see [`ctrl`].
    Control = 4,
    /// Completion status word — polled, see [`status`].
    Status = 5,
    /// High 32 bits of the best bid price.
    BestBidH = 6,
    /// Low 32 bits of the best bid price.
    BestBidL = 7,
    /// High 32 bits of the best ask price.
    BestAskH = 8,
    /// Low 32 bits of the best ask price.
    BestAskL = 9,
    /// Quantity at the best bid.
    BestBidQty = 10,
    /// Quantity at the best ask.
    BestAskQty = 11,
    /// Measured latency in nanoseconds, maintained by the peer.
    Latency = 12,
    /// Measured throughput in operations per second, maintained by the peer.
    Throughput = 13,
}

impl Reg {
    /// Slot offset within the page (in 32-bit units).
    #[inline]
    pub const fn offset(self) -> usize {
        self as usize
    }
}

/// CONTROL slot bit assignments.
pub mod ctrl {
    /// Request valid — a market update is staged in the input slots.
    pub const VALID: u32 = 0x1;
    /// Side flag for a submit: set = bid, clear = ask.
    pub const BID: u32 = 0x2;
    /// Order book query command. Mutually exclusive with a submit request.
    pub const QUERY: u32 = 0x4;
}

/// STATUS slot bit assignments. Disjoint per request kind.
pub mod status {
    /// Previous submit acknowledged; peer ready for the next request.
    pub const READY: u32 = 0x1;
    /// Order book result slots hold a valid snapshot.
    pub const BOOK_VALID: u32 = 0x2;
}

/// Representative latency (ns) seeded into a simulated page.
pub const SIM_LATENCY_NS: u32 = 100;

/// Representative throughput (ops/s) seeded into a simulated page.
pub const SIM_THROUGHPUT: u32 = 1_000_000;
