//! Fixed-point price codec for the register bus.
//!
//! The accelerator's register file only carries 32-bit integers, so prices
//! cross the bus as unsigned 64-bit fixed-point values at 10⁻⁶ resolution
//! (split across a high/low slot pair). Encoding truncates toward zero after
//! scaling; it is *not* exactly invertible for inputs with more than six
//! decimal digits. That is a documented precision boundary of the wire
//! format, not something this module papers over.
//!
//! Negative, non-finite, and out-of-range prices are rejected up front with
//! [`AxlError::InvalidPrice`] — the wire format has no sign bit and no
//! defined overflow behavior, so such values must never reach the page.

use crate::error::AxlError;

/// Scale factor: one price unit = 10⁻⁶.
pub const PRICE_SCALE: f64 = 1_000_000.0;

/// Encode a price as unsigned 64-bit fixed-point.
///
/// `to_fixed(x) = trunc(x × 10⁶)`. Truncation, not rounding:
/// `to_fixed(150.2599995) == 150_259_999`.
#[inline]
pub fn to_fixed(price: f64) -> Result<u64, AxlError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AxlError::InvalidPrice(price));
    }
    let scaled = price * PRICE_SCALE;
    if scaled >= u64::MAX as f64 {
        return Err(AxlError::InvalidPrice(price));
    }
    // `as` casts f64 → u64 by truncating toward zero.
    Ok(scaled as u64)
}

/// Decode a fixed-point value back to floating point.
///
/// `from_fixed(v) = v ÷ 10⁶`.
#[inline]
pub fn from_fixed(value: u64) -> f64 {
    value as f64 / PRICE_SCALE
}
