//! # axl-channel
//!
//! Register-mapped protocol engine for the AXL accelerator gateway:
//!
//! - **Register layout** (`regs`) — the fixed 14-slot offset table and
//!   control/status bit assignments (the wire contract)
//! - **Page abstraction** (`page`) — the `RegisterPage` capability trait
//! - **Simulated backend** (`sim`) — heap page with an in-process peer model
//! - **XDMA backend** (`xdma`) — mmap'd window of a real device node
//! - **Channel** (`channel`) — the request/acknowledge protocol engine
//! - **Registry** (`registry`) — backend factory driven by config

pub mod channel;
pub mod page;
pub mod registry;
pub mod regs;
pub mod sim;
#[cfg(unix)]
pub mod xdma;

pub use channel::{PollConfig, RegisterChannel};
pub use page::RegisterPage;
pub use registry::open_channel;
pub use sim::SimPage;
#[cfg(unix)]
pub use xdma::XdmaPage;
