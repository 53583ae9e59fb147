//! # axl-runner
//!
//! Demo entry point for the accelerator gateway.
//!
//! Opens a register channel per the (optional) JSON config, submits a sample
//! market update, queries the resulting order book, and prints channel
//! metrics. Everything interesting lives in `axl-channel`; this binary is
//! glue.
//!
//! # Usage
//!
//! ```bash
//! axl-runner                   # simulated channel, defaults
//! axl-runner config.json       # backend + poll settings from config
//! ```

use std::path::PathBuf;

use anyhow::Result;
use axl_core::config::ChannelConfig;
use axl_core::types::{MarketUpdate, Side};
use clap::Parser;
use tracing::{info, warn};

/// AXL Accelerator Gateway Runner.
#[derive(Parser)]
#[command(name = "axl-runner", about = "AXL Accelerator Gateway Runner")]
struct Cli {
    /// Configuration file path (JSON). Defaults to a simulated channel.
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (channel_config, module_name, log_path) = match &cli.config {
        Some(path) => {
            let config = axl_core::config::load_config(path)?;
            (
                config.channel,
                config.module_name.unwrap_or_else(|| "axl-runner".to_string()),
                config.log_path,
            )
        }
        None => (ChannelConfig::simulated(), "axl-runner".to_string(), None),
    };

    axl_core::logging::init_logging(
        &cli.log_level,
        cli.log_dir.as_deref().or(log_path.as_deref()),
        &module_name,
    );

    info!("axl-runner starting — mode={:?}", channel_config.mode);

    let channel = axl_channel::open_channel(&channel_config)?;

    // Sample market update.
    let update = MarketUpdate {
        symbol: "AAPL".to_string(),
        price: 150.25,
        quantity: 100,
        side: Side::Bid,
        recv_time_ns: now_ns(),
    };
    channel.submit(&update)?;
    info!("submitted {} {} {}@{}", update.symbol, update.side, update.quantity, update.price);

    // Query the order book back.
    let book = channel.query_order_book("AAPL")?;
    info!(
        "order book AAPL — best bid {} ({} shares), best ask {} ({} shares)",
        book.best_bid_price, book.best_bid_qty, book.best_ask_price, book.best_ask_qty,
    );

    // Channel metrics (advisory, peer-maintained).
    info!("latency: {} ns, throughput: {} ops/s", channel.latency_ns(), channel.throughput());

    // Cancellation is not supported by the current accelerator image.
    if let Err(e) = channel.cancel_order(1) {
        warn!("cancel_order: {e}");
    }

    info!("done");
    Ok(())
}

fn now_ns() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
