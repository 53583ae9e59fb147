//! The register channel protocol engine.
//!
//! One `RegisterChannel` owns one device page and drives the
//! request/acknowledge handshake over its CONTROL/STATUS slot pair. Two
//! request kinds exist — submit a market update, query the order book — and
//! they share the pair, so at most one request may be outstanding per
//! channel. The engine provides no internal locking: callers issuing
//! requests from multiple threads must serialize externally around the whole
//! request/handshake sequence.
//!
//! Every handshake wait is bounded. The poll spins for a configurable number
//! of reads, then sleeps between reads so a slow peer does not starve the
//! rest of the process, and fails with [`AxlError::Timeout`] at the deadline.

use std::hint;
use std::thread;
use std::time::{Duration, Instant};

use axl_core::config::PollSettings;
use axl_core::error::AxlError;
use axl_core::fixed::{from_fixed, to_fixed};
use axl_core::types::{MarketUpdate, OrderBookSnapshot, Side, pack_symbol};
use tracing::trace;

use crate::page::RegisterPage;
use crate::regs::{Reg, ctrl, status};

/// Bounded-poll parameters for the control/status handshake.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Deadline for one handshake.
    pub timeout: Duration,
    /// Spin reads before the poll starts sleeping.
    pub spin_iters: u32,
    /// Sleep between reads after the spin phase.
    pub sleep: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(1), spin_iters: 10_000, sleep: Duration::from_micros(10) }
    }
}

impl From<&PollSettings> for PollConfig {
    fn from(s: &PollSettings) -> Self {
        let d = Self::default();
        Self {
            timeout: s.timeout_ms.map(Duration::from_millis).unwrap_or(d.timeout),
            spin_iters: s.spin_iters.unwrap_or(d.spin_iters),
            sleep: s.sleep_us.map(Duration::from_micros).unwrap_or(d.sleep),
        }
    }
}

/// The protocol engine. Owns its page for the channel's lifetime.
pub struct RegisterChannel<P: RegisterPage> {
    page: P,
    poll: PollConfig,
}

impl<P: RegisterPage> RegisterChannel<P> {
    /// Wrap an acquired page. The channel takes exclusive ownership; the
    /// region and its OS resource are released when the channel drops.
    pub fn new(page: P, poll: PollConfig) -> Self {
        Self { page, poll }
    }

    /// Submit one market update to the accelerator.
    ///
    /// Input slots are written in arbitrary order — the peer may not observe
    /// them until CONTROL is written, which happens last and is the sole
    /// synchronization point. Completion is the peer raising STATUS bit 0.
    pub fn submit(&self, update: &MarketUpdate) -> Result<(), AxlError> {
        let fixed = to_fixed(update.price)?;

        self.page.write_slot(Reg::Symbol, pack_symbol(&update.symbol));
        self.page.write_slot(Reg::PriceH, (fixed >> 32) as u32);
        self.page.write_slot(Reg::PriceL, fixed as u32);
        self.page.write_slot(Reg::Quantity, update.quantity);

        let side_bit = match update.side {
            Side::Bid => ctrl::BID,
            Side::Ask => 0,
        };
        // Synchronization point: request becomes observable here.
        self.page.write_slot(Reg::Control, side_bit | ctrl::VALID);

        self.wait_status(status::READY)?;
        trace!(symbol = %update.symbol, side = %update.side, "update acknowledged");
        Ok(())
    }

    /// Query the best bid/ask for a symbol.
    ///
    /// Completion is STATUS bit 1 — disjoint from submit's ack bit, so the
    /// peer can signal either independently and neither request can consume
    /// the other's completion.
    pub fn query_order_book(&self, symbol: &str) -> Result<OrderBookSnapshot, AxlError> {
        self.page.write_slot(Reg::Symbol, pack_symbol(symbol));
        self.page.write_slot(Reg::Control, ctrl::QUERY);

        self.wait_status(status::BOOK_VALID)?;

        let best_bid = (u64::from(self.page.read_slot(Reg::BestBidH)) << 32)
            | u64::from(self.page.read_slot(Reg::BestBidL));
        let best_ask = (u64::from(self.page.read_slot(Reg::BestAskH)) << 32)
            | u64::from(self.page.read_slot(Reg::BestAskL));

        Ok(OrderBookSnapshot {
            best_bid_price: from_fixed(best_bid),
            best_ask_price: from_fixed(best_ask),
            best_bid_qty: self.page.read_slot(Reg::BestBidQty),
            best_ask_qty: self.page.read_slot(Reg::BestAskQty),
            recv_time_ns: now_ns(),
        })
    }

    /// Place an order — a thin wrapper over [`submit`](Self::submit).
    pub fn place_order(
        &self,
        symbol: &str,
        price: f64,
        quantity: u32,
        is_buy: bool,
    ) -> Result<(), AxlError> {
        self.submit(&MarketUpdate {
            symbol: symbol.to_string(),
            price,
            quantity,
            side: if is_buy { Side::Bid } else { Side::Ask },
            recv_time_ns: now_ns(),
        })
    }

    /// Cancel an order. Not supported by the current accelerator image.
    pub fn cancel_order(&self, _order_id: u64) -> Result<(), AxlError> {
        Err(AxlError::Unimplemented("cancel_order"))
    }

    /// Peer-maintained latency metric in nanoseconds.
    ///
    /// Pure volatile read, no handshake — may race a concurrent peer update,
    /// which is acceptable for advisory telemetry.
    pub fn latency_ns(&self) -> f64 {
        f64::from(self.page.read_slot(Reg::Latency))
    }

    /// Peer-maintained throughput metric in operations per second.
    pub fn throughput(&self) -> u64 {
        u64::from(self.page.read_slot(Reg::Throughput))
    }

    /// Poll STATUS until `bit` is set or the deadline expires.
    fn wait_status(&self, bit: u32) -> Result<(), AxlError> {
        let deadline = Instant::now() + self.poll.timeout;
        let mut spins = 0u32;
        loop {
            if self.page.read_slot(Reg::Status) & bit != 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AxlError::Timeout(self.poll.timeout));
            }
            if spins < self.poll.spin_iters {
                spins += 1;
                hint::spin_loop();
            } else {
                thread::sleep(self.poll.sleep);
            }
        }
    }
}

fn now_ns() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::{SIM_LATENCY_NS, SIM_THROUGHPUT};
    use crate::sim::SimPage;

    /// Short deadline so silent-peer tests fail fast.
    fn test_poll() -> PollConfig {
        PollConfig {
            timeout: Duration::from_millis(50),
            spin_iters: 100,
            sleep: Duration::from_micros(100),
        }
    }

    fn update(symbol: &str, price: f64, quantity: u32, side: Side) -> MarketUpdate {
        MarketUpdate { symbol: symbol.to_string(), price, quantity, side, recv_time_ns: 0 }
    }

    #[test]
    fn end_to_end_simulated() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());

        channel.submit(&update("AAPL", 150.25, 100, Side::Bid)).unwrap();

        let book = channel.query_order_book("AAPL").unwrap();
        assert!((book.best_bid_price - 150.25).abs() < 1e-6);
        assert_eq!(book.best_bid_qty, 100);

        assert_eq!(channel.latency_ns(), 100.0);
        assert_eq!(channel.throughput(), 1_000_000);
    }

    #[test]
    fn both_sides_reach_the_book() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());

        channel.submit(&update("AAPL", 150.25, 100, Side::Bid)).unwrap();
        channel.submit(&update("AAPL", 150.30, 40, Side::Ask)).unwrap();

        let book = channel.query_order_book("AAPL").unwrap();
        assert!((book.best_bid_price - 150.25).abs() < 1e-6);
        assert!((book.best_ask_price - 150.30).abs() < 1e-6);
        assert_eq!(book.best_bid_qty, 100);
        assert_eq!(book.best_ask_qty, 40);
    }

    #[test]
    fn symbol_truncated_to_four_bytes_on_the_wire() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());
        channel.submit(&update("GOOGLE", 2800.5, 10, Side::Ask)).unwrap();
        assert_eq!(channel.page.read_slot(Reg::Symbol), pack_symbol("GOOG"));
    }

    #[test]
    fn control_written_with_side_and_valid() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());

        channel.submit(&update("AAPL", 1.0, 1, Side::Bid)).unwrap();
        assert_eq!(channel.page.read_slot(Reg::Control), ctrl::BID | ctrl::VALID);

        channel.submit(&update("AAPL", 1.0, 1, Side::Ask)).unwrap();
        assert_eq!(channel.page.read_slot(Reg::Control), ctrl::VALID);
    }

    #[test]
    fn price_split_across_high_low_slots() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());
        // Large enough that the fixed-point value needs both slots.
        let price = 10_000_000_000.5;
        channel.submit(&update("BIG", price, 1, Side::Bid)).unwrap();

        let fixed = to_fixed(price).unwrap();
        assert_eq!(channel.page.read_slot(Reg::PriceH), (fixed >> 32) as u32);
        assert_eq!(channel.page.read_slot(Reg::PriceL), fixed as u32);
    }

    #[test]
    fn query_times_out_on_silent_peer() {
        // The inert page keeps the seeded READY bit but never raises
        // BOOK_VALID, so a query must hit the deadline, never return stale
        // result slots.
        let channel = RegisterChannel::new(SimPage::inert().unwrap(), test_poll());
        let err = channel.query_order_book("AAPL").unwrap_err();
        assert!(matches!(err, AxlError::Timeout(_)));
    }

    #[test]
    fn submit_ignores_foreign_status_bit() {
        // Peer raises only BOOK_VALID; a pending submit polls READY and must
        // not spuriously complete on the other operation's bit.
        let page = SimPage::inert().unwrap();
        page.write_slot(Reg::Status, status::BOOK_VALID);
        let channel = RegisterChannel::new(page, test_poll());

        let err = channel.submit(&update("AAPL", 1.0, 1, Side::Bid)).unwrap_err();
        assert!(matches!(err, AxlError::Timeout(_)));

        // The same bit does complete the operation it belongs to.
        let book = channel.query_order_book("AAPL").unwrap();
        assert_eq!(book.best_bid_qty, 0);
        assert_eq!(book.best_ask_qty, 0);
    }

    #[test]
    fn invalid_price_rejected_before_any_handshake() {
        // A silent peer would time out — an up-front rejection proves the
        // request never reached the page.
        let channel = RegisterChannel::new(SimPage::inert().unwrap(), test_poll());
        let err = channel.submit(&update("AAPL", -1.0, 1, Side::Bid)).unwrap_err();
        assert!(matches!(err, AxlError::InvalidPrice(_)));
    }

    #[test]
    fn place_order_maps_to_submit() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());
        channel.place_order("MSFT", 410.10, 25, true).unwrap();

        let book = channel.query_order_book("MSFT").unwrap();
        assert!((book.best_bid_price - 410.10).abs() < 1e-6);
        assert_eq!(book.best_bid_qty, 25);
    }

    #[test]
    fn cancel_order_unimplemented() {
        let channel = RegisterChannel::new(SimPage::new().unwrap(), test_poll());
        let err = channel.cancel_order(42).unwrap_err();
        assert!(matches!(err, AxlError::Unimplemented("cancel_order")));
    }

    #[test]
    fn metrics_read_without_handshake_on_silent_peer() {
        let channel = RegisterChannel::new(SimPage::inert().unwrap(), test_poll());
        assert_eq!(channel.latency_ns(), f64::from(SIM_LATENCY_NS));
        assert_eq!(channel.throughput(), u64::from(SIM_THROUGHPUT));
    }

    #[test]
    fn drop_without_completed_request_is_clean() {
        let channel = RegisterChannel::new(SimPage::inert().unwrap(), test_poll());
        let _ = channel.query_order_book("AAPL");
        // Channel drops here with the timed-out request abandoned; the page
        // allocation is still released exactly once.
    }
}
