//! Key types for Shroud.
//!
//! - [`SecretScalar`]: a 32-byte secp256k1 private scalar, zeroized on drop
//! - [`CompressedPublicKey`]: a 33-byte SEC1 compressed public key
//! - [`StealthKeyPair`]: secret + public half of one key
//! - [`StealthKeys`]: spending + viewing pairs plus the meta-address

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{COMPRESSED_PUBKEY_SIZE, SCALAR_SIZE};
use crate::error::{Result, ShroudError};
use crate::types::StealthMetaAddress;

// ═══════════════════════════════════════════════════════════════════════════════
// SECRET SCALAR
// ═══════════════════════════════════════════════════════════════════════════════

/// A secp256k1 private scalar.
///
/// The wrapper has no human-readable representation: `Debug` prints
/// `[REDACTED]` and there is deliberately no `Display` or serde support, so
/// key material cannot end up in logs or serialized output by accident.
/// Memory is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar {
    bytes: [u8; SCALAR_SIZE],
}

impl SecretScalar {
    /// Creates a secret scalar from raw bytes.
    ///
    /// # Errors
    /// Returns an error if `bytes` is not exactly 32 bytes. Range validation
    /// against the curve order happens in `shroud-crypto`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_SIZE {
            return Err(ShroudError::InvalidLength {
                field: "private scalar",
                expected: SCALAR_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; SCALAR_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates a secret scalar from a fixed-size array.
    pub fn from_array(bytes: [u8; SCALAR_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    ///
    /// # Security
    /// Handle the returned bytes carefully; do not log or expose them.
    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretScalar([REDACTED])")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPRESSED PUBLIC KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// A SEC1 compressed secp256k1 public key (33 bytes).
///
/// Safe to share; serialized as a hex string.
#[derive(Clone, PartialEq, Eq)]
pub struct CompressedPublicKey {
    bytes: [u8; COMPRESSED_PUBKEY_SIZE],
}

impl CompressedPublicKey {
    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    /// Returns an error if `bytes` is not exactly 33 bytes. Curve membership
    /// is checked where the point is actually decompressed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_PUBKEY_SIZE {
            return Err(ShroudError::InvalidLength {
                field: "compressed public key",
                expected: COMPRESSED_PUBKEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; COMPRESSED_PUBKEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates a public key from a fixed-size array.
    pub fn from_array(bytes: [u8; COMPRESSED_PUBKEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBKEY_SIZE] {
        &self.bytes
    }

    /// Returns the hex-encoded key (lowercase, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parses a public key from hex (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = crate::bytes::hex_to_bytes(s, Some(COMPRESSED_PUBKEY_SIZE))?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for CompressedPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show first/last 4 bytes for readability
        write!(
            f,
            "CompressedPublicKey({}...{})",
            hex::encode(&self.bytes[..4]),
            hex::encode(&self.bytes[COMPRESSED_PUBKEY_SIZE - 4..])
        )
    }
}

impl Serialize for CompressedPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CompressedPublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIRS
// ═══════════════════════════════════════════════════════════════════════════════

/// One stealth key: secret scalar plus its public key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StealthKeyPair {
    /// Secret half (auto-zeroized).
    pub secret: SecretScalar,
    /// Public half (safe to share).
    #[zeroize(skip)]
    pub public: CompressedPublicKey,
}

impl StealthKeyPair {
    /// Creates a key pair from its halves.
    pub fn new(secret: SecretScalar, public: CompressedPublicKey) -> Self {
        Self { secret, public }
    }
}

impl std::fmt::Debug for StealthKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthKeyPair")
            .field("secret", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}

/// A complete derived key set: spending pair, viewing pair, and the
/// meta-address built from the two public keys.
///
/// Immutable value object, created per derivation call (root, per-port,
/// per-fog-wallet) and never persisted by this core.
#[derive(Clone, ZeroizeOnDrop)]
pub struct StealthKeys {
    /// Keys for spending from stealth addresses.
    pub spending: StealthKeyPair,
    /// Keys for scanning announcements.
    pub viewing: StealthKeyPair,
    /// The publishable meta-address for this key set.
    #[zeroize(skip)]
    pub meta_address: StealthMetaAddress,
}

impl StealthKeys {
    /// Creates a key set from its parts.
    pub fn new(
        spending: StealthKeyPair,
        viewing: StealthKeyPair,
        meta_address: StealthMetaAddress,
    ) -> Self {
        Self {
            spending,
            viewing,
            meta_address,
        }
    }
}

impl std::fmt::Debug for StealthKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthKeys")
            .field("spending", &"[REDACTED]")
            .field("viewing", &"[REDACTED]")
            .field("meta_address", &self.meta_address)
            .finish()
    }
}
