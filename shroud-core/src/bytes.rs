//! Strict hex↔bytes conversion.
//!
//! Every hex string entering the protocol goes through [`hex_to_bytes`] so
//! validation (prefix handling, charset, length) lives in exactly one place.

use crate::error::{Result, ShroudError};

/// Decodes a hex string, stripping an optional `0x` prefix.
///
/// Fails on odd length or non-hex characters. When `expected_len` is given,
/// also fails on a byte-length mismatch.
pub fn hex_to_bytes(hex: &str, expected_len: Option<usize>) -> Result<Vec<u8>> {
    let stripped = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes = hex::decode(stripped)?;

    if let Some(expected) = expected_len {
        if bytes.len() != expected {
            return Err(ShroudError::InvalidLength {
                field: "hex input",
                expected,
                actual: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

/// Encodes bytes as lowercase hex without a prefix.
///
/// Total round-trip with [`hex_to_bytes`]: `hex_to_bytes(&bytes_to_hex(b), None)`
/// recovers `b` for any byte slice.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
