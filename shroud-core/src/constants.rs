//! Protocol constants for Shroud.
//!
//! Derivation-constant tables (domain strings, default salt) are immutable
//! process-wide configuration. They are named constants, never mutable state,
//! and changing any of them is a breaking protocol change.

// ═══════════════════════════════════════════════════════════════════════════════
// SECP256K1 SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a private scalar in bytes (256 bits).
pub const SCALAR_SIZE: usize = 32;

/// Size of a SEC1 compressed public key in bytes (parity byte + x-coordinate).
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point encoding in bytes (0x04 prefix + x + y).
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// Minimum size of a wallet signature used as derivation input material.
/// Standard ECDSA signatures are 64 or 65 bytes.
pub const SIGNATURE_MIN_SIZE: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of an Ethereum-style address in bytes (20 bytes = 160 bits).
pub const ETH_ADDRESS_SIZE: usize = 20;

/// Size of a keccak256 hash output.
pub const KECCAK256_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW TAG CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a view tag in bytes.
/// One byte gives a 1/256 false-positive rate during scanning, so ~99.6% of
/// unrelated announcements are rejected without any curve arithmetic.
pub const VIEW_TAG_SIZE: usize = 1;

// ═══════════════════════════════════════════════════════════════════════════════
// META-ADDRESS FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Scheme prefix of the stealth meta-address string (`st:<chain>:0x...`).
pub const META_ADDRESS_SCHEME: &str = "st";

/// Number of key bytes encoded in a meta-address (spending pub ‖ viewing pub).
pub const META_ADDRESS_KEY_BYTES: usize = 2 * COMPRESSED_PUBKEY_SIZE;

/// Number of hex characters after the `st:<chain>:0x` prefix.
pub const META_ADDRESS_HEX_CHARS: usize = 2 * META_ADDRESS_KEY_BYTES;

// ═══════════════════════════════════════════════════════════════════════════════
// DOMAIN SEPARATORS
// ═══════════════════════════════════════════════════════════════════════════════
// Each HKDF invocation uses a unique domain separator so outputs from
// different derivation purposes never collide, even for the same signature.
// Ports and fog wallets live under two distinct roots: compromising the whole
// port tree reveals nothing about any fog wallet, and vice versa.

/// Domain separator for the root spending key.
pub const DOMAIN_SPENDING: &[u8] = b"shroud-stealth-spending-v1";

/// Domain separator for the root viewing key.
pub const DOMAIN_VIEWING: &[u8] = b"shroud-stealth-viewing-v1";

/// Domain separator for per-port spending keys.
pub const DOMAIN_PORT_SPENDING: &[u8] = b"shroud-port-derivation-v1-spending";

/// Domain separator for per-port viewing keys.
pub const DOMAIN_PORT_VIEWING: &[u8] = b"shroud-port-derivation-v1-viewing";

/// Domain separator for fog-wallet spending keys.
pub const DOMAIN_FOG_SPENDING: &[u8] = b"shroud-fog-derivation-v1-spending";

/// Domain separator for fog-wallet viewing keys.
pub const DOMAIN_FOG_VIEWING: &[u8] = b"shroud-fog-derivation-v1-viewing";

/// Default HKDF salt: a fixed non-zero 32-byte constant, avoiding the HKDF
/// zero-salt degenerate case.
pub const DEFAULT_SALT: [u8; 32] = *b"shroud-stealth-hkdf-salt-v1.0001";

// ═══════════════════════════════════════════════════════════════════════════════
// ANNOUNCEMENT METADATA LAYOUT (version 1)
// ═══════════════════════════════════════════════════════════════════════════════
// Canonical wire layout:
//
//   byte  0        view tag
//   byte  1        layout version (0x01)
//   bytes [2,34)   receipt hash (32)
//   bytes [34,66)  port id: big-endian u32 zero-padded to 32 bytes
//   bytes [66,86)  token address (20)        (long form only)
//   bytes [86,118) amount, big-endian u256   (long form only)
//
// Exactly 66 or 118 bytes. Version dispatch is explicit: there is no
// length-based guessing between historical layouts.

/// Current announcement-metadata layout version.
pub const METADATA_VERSION: u8 = 1;

/// Size of the metadata base form (no token transfer).
pub const METADATA_BASE_SIZE: usize = 2 + KECCAK256_SIZE + 32;

/// Size of the metadata long form (token address + amount).
pub const METADATA_FULL_SIZE: usize = METADATA_BASE_SIZE + ETH_ADDRESS_SIZE + 32;

// ═══════════════════════════════════════════════════════════════════════════════
// SCANNING DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default page size when scanning an announcement source.
pub const DEFAULT_SCAN_BATCH_SIZE: usize = 1000;

/// Maximum announcements accepted in a single source page.
pub const MAX_SCAN_BATCH_SIZE: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_address_sizes() {
        assert_eq!(META_ADDRESS_KEY_BYTES, 66);
        assert_eq!(META_ADDRESS_HEX_CHARS, 132);
    }

    #[test]
    fn test_metadata_sizes() {
        assert_eq!(METADATA_BASE_SIZE, 66);
        assert_eq!(METADATA_FULL_SIZE, 118);
    }

    #[test]
    fn test_default_salt_is_non_zero() {
        assert_eq!(DEFAULT_SALT.len(), 32);
        assert!(DEFAULT_SALT.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_domain_separators_unique() {
        let domains = [
            DOMAIN_SPENDING,
            DOMAIN_VIEWING,
            DOMAIN_PORT_SPENDING,
            DOMAIN_PORT_VIEWING,
            DOMAIN_FOG_SPENDING,
            DOMAIN_FOG_VIEWING,
        ];

        for (i, a) in domains.iter().enumerate() {
            for (j, b) in domains.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Domain separators must be unique");
                }
            }
        }
    }

    #[test]
    fn test_port_and_fog_roots_distinct() {
        // The two derivation trees must stay isolated even for equal indices.
        assert!(!DOMAIN_PORT_SPENDING.starts_with(b"shroud-fog"));
        assert!(!DOMAIN_FOG_SPENDING.starts_with(b"shroud-port"));
    }
}
