//! Error types for Shroud.
//!
//! One `thiserror` hierarchy covers the whole workspace. Derivation and
//! generation entry points fail eagerly with a format or range variant;
//! scanning never surfaces these per item (see `shroud-scanner`).

use thiserror::Error;

/// Result type alias using `ShroudError`.
pub type Result<T> = std::result::Result<T, ShroudError>;

/// Main error type for all Shroud operations.
#[derive(Debug, Error)]
pub enum ShroudError {
    // ═══════════════════════════════════════════════════════════════════════════
    // FORMAT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Malformed hex input (odd length, bad character).
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A fixed-size field had the wrong byte length.
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// Required byte length.
        expected: usize,
        /// Observed byte length.
        actual: usize,
    },

    /// Malformed stealth meta-address string.
    #[error("Invalid meta-address: {0}")]
    InvalidMetaAddress(String),

    /// Byte string is not a valid curve point.
    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),

    /// Wallet signature failed validation.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Announcement metadata failed layout validation.
    #[error("Invalid announcement metadata: {0}")]
    InvalidMetadata(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RANGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Scalar outside [1, n−1] for the secp256k1 order n.
    #[error("Scalar out of range: {0}")]
    ScalarOutOfRange(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CHAIN ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Unknown chain tag in a meta-address or configuration.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // COLLABORATOR ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// An announcement source or oracle failed.
    #[error("Source error: {0}")]
    Source(String),
}

impl ShroudError {
    /// Returns true if this is a format error (malformed hex, wrong byte
    /// length, malformed meta-address/signature/metadata).
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            ShroudError::InvalidHex(_)
                | ShroudError::InvalidLength { .. }
                | ShroudError::InvalidMetaAddress(_)
                | ShroudError::InvalidPoint(_)
                | ShroudError::InvalidSignature(_)
                | ShroudError::InvalidMetadata(_)
        )
    }

    /// Returns true if this is a range error (scalar outside [1, n−1]).
    pub fn is_range(&self) -> bool {
        matches!(self, ShroudError::ScalarOutOfRange(_))
    }
}
