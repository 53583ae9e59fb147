//! Market data structures flowing over the register channel.

use serde::{Deserialize, Serialize};

/// Book side of a market update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// One market update submitted to the accelerator.
///
/// Transient: constructed by the caller, written into the device page by the
/// channel's submit operation, then discarded. Only the first 4 bytes of
/// `symbol` cross the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketUpdate {
    /// Instrument symbol (e.g. `"AAPL"`). Truncated to 4 bytes on the wire.
    pub symbol: String,
    /// Price; encoded as 64-bit fixed-point at 10⁻⁶ resolution.
    pub price: f64,
    /// Quantity at that price level.
    pub quantity: u32,
    /// Bid or ask.
    pub side: Side,
    /// Local receive timestamp (ns since epoch). Advisory only — never
    /// written to the page.
    pub recv_time_ns: u64,
}

/// Best bid/ask snapshot returned by an order book query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub best_bid_price: f64,
    pub best_ask_price: f64,
    pub best_bid_qty: u32,
    pub best_ask_qty: u32,
    /// Local time the snapshot was read (ns since epoch).
    pub recv_time_ns: u64,
}
