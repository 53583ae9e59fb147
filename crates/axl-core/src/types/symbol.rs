//! Symbol packing for the single 32-bit SYMBOL register slot.
//!
//! The register file gives the symbol exactly one slot, so only the first
//! four bytes of a symbol cross the bus. Longer symbols are truncated — a
//! known edge of the wire contract, not an error. Shorter symbols are
//! zero-padded.

/// Number of symbol bytes that fit in the SYMBOL slot.
pub const SYMBOL_WORD_LEN: usize = 4;

/// Pack the first four bytes of a symbol into a single 32-bit word.
///
/// Bytes are laid out in memory order (little-endian word), matching the
/// peer's view of the slot. `pack_symbol("AAPLXX") == pack_symbol("AAPL")`.
#[inline]
pub fn pack_symbol(symbol: &str) -> u32 {
    let mut buf = [0u8; SYMBOL_WORD_LEN];
    let len = symbol.len().min(SYMBOL_WORD_LEN);
    buf[..len].copy_from_slice(&symbol.as_bytes()[..len]);
    u32::from_le_bytes(buf)
}

/// Unpack a SYMBOL slot back into a string, stopping at the first null byte.
///
/// Non-UTF-8 content (possible if the peer wrote garbage) yields `""`.
#[inline]
pub fn unpack_symbol(word: u32) -> String {
    let bytes = word.to_le_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(SYMBOL_WORD_LEN);
    std::str::from_utf8(&bytes[..end]).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        assert_eq!(unpack_symbol(pack_symbol("AAPL")), "AAPL");
    }

    #[test]
    fn truncates_to_four_bytes() {
        // A 6-character symbol is stored using only its first 4 bytes.
        assert_eq!(pack_symbol("GOOGLE"), pack_symbol("GOOG"));
        assert_eq!(unpack_symbol(pack_symbol("GOOGLE")), "GOOG");
    }

    #[test]
    fn short_symbol_zero_padded() {
        assert_eq!(unpack_symbol(pack_symbol("GM")), "GM");
        assert_eq!(pack_symbol("GM") & 0xFFFF_0000, 0);
    }

    #[test]
    fn empty_symbol() {
        assert_eq!(pack_symbol(""), 0);
        assert_eq!(unpack_symbol(0), "");
    }
}
