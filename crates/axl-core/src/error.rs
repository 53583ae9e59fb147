//! Typed error definitions for the AXL accelerator gateway.
//!
//! Provides [`AxlError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate seamlessly with `anyhow::Result`.
//!
//! The variants deliberately keep open failures apart: a caller can tell
//! "device node absent" from "mapping denied" from "peer never acknowledged".

use std::time::Duration;

use thiserror::Error;

/// Domain-specific errors for the AXL accelerator gateway.
#[derive(Debug, Error)]
pub enum AxlError {
    /// The device node could not be opened.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device register window could not be mapped.
    #[error("mapping failed: {0}")]
    MappingFailed(String),

    /// The simulated backing page could not be allocated.
    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    /// The peer did not raise the expected status bit before the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A price that cannot cross the fixed-point bus (negative, non-finite,
    /// or too large for 64 bits at 10⁻⁶ resolution).
    #[error("price not representable as fixed-point: {0}")]
    InvalidPrice(f64),

    /// Operation not supported by the current accelerator image.
    #[error("operation not implemented: {0}")]
    Unimplemented(&'static str),

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),
}
