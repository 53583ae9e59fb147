//! Shared data types for the AXL accelerator gateway.

pub mod market;
pub mod symbol;

pub use market::{MarketUpdate, OrderBookSnapshot, Side};
pub use symbol::{SYMBOL_WORD_LEN, pack_symbol, unpack_symbol};
