//! # axl-core
//!
//! Core crate for the AXL accelerator gateway, providing:
//!
//! - **Types** (`types`) — market update / order book structs, side enum, symbol packing
//! - **Fixed-point** (`fixed`) — the 10⁻⁶-resolution price codec used on the register bus
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `AxlError` via thiserror
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod fixed;
pub mod logging;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
