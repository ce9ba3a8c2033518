//! Announcement and scanned-payment types.
//!
//! [`Announcement`] mirrors the on-chain record and is untrusted input: the
//! scanner treats every field as adversarial. [`ScannedPayment`] is the
//! confirmed result and carries spendable key material.

use serde::{Deserialize, Serialize};

use crate::constants::COMPRESSED_PUBKEY_SIZE;
use crate::types::{EthAddress, SecretScalar};

// ═══════════════════════════════════════════════════════════════════════════════
// ANNOUNCEMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// An on-chain stealth-payment announcement.
///
/// Produced by payers and read back by recipients during scanning. Nothing
/// here is validated at construction; a malformed announcement is simply
/// skipped by the scanner, never an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Announcement {
    /// Stealth address the payment was sent to (hex string, any casing).
    pub stealth_address: String,
    /// The payer's ephemeral public key (expected 33 bytes).
    #[serde(with = "hex")]
    pub ephemeral_pub_key: Vec<u8>,
    /// Announcement metadata; byte 0 is the view tag.
    #[serde(with = "hex")]
    pub metadata: Vec<u8>,
    /// Transaction hash of the announcing transaction.
    pub tx_hash: String,
    /// Block the announcement was included in.
    pub block_number: u64,
}

impl Announcement {
    /// Creates an announcement.
    pub fn new(
        stealth_address: impl Into<String>,
        ephemeral_pub_key: Vec<u8>,
        metadata: Vec<u8>,
        tx_hash: impl Into<String>,
        block_number: u64,
    ) -> Self {
        Self {
            stealth_address: stealth_address.into(),
            ephemeral_pub_key,
            metadata,
            tx_hash: tx_hash.into(),
            block_number,
        }
    }

    /// Cheap structural check used as the scanner's first filter: the
    /// ephemeral key must be 33 bytes, the metadata must carry at least the
    /// view-tag byte, and the stealth address must be present.
    pub fn is_well_formed(&self) -> bool {
        self.ephemeral_pub_key.len() == COMPRESSED_PUBKEY_SIZE
            && !self.metadata.is_empty()
            && !self.stealth_address.is_empty()
    }

    /// Returns the view tag (first metadata byte), if present.
    pub fn view_tag(&self) -> Option<u8> {
        self.metadata.first().copied()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCANNED PAYMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// A confirmed incoming payment recovered during scanning.
///
/// Contains the spendable stealth private key. The type intentionally
/// implements neither `Serialize` nor a revealing `Debug`; it is owned by the
/// caller and dropped (zeroizing the key) once funds are swept.
#[derive(Clone)]
pub struct ScannedPayment {
    /// The one-time address holding the funds.
    pub stealth_address: EthAddress,
    /// Private key controlling `stealth_address`.
    pub stealth_private_key: SecretScalar,
    /// Token amount from the metadata long form; 0 for the base form.
    pub amount: u128,
    /// Token contract, or `None` for a native-asset payment.
    pub token: Option<EthAddress>,
    /// Receipt hash carried in the metadata.
    pub receipt_hash: [u8; 32],
    /// Port the payment was addressed to.
    pub port_index: u32,
    /// Block the announcement was included in.
    pub block_number: u64,
}

impl std::fmt::Debug for ScannedPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannedPayment")
            .field("stealth_address", &self.stealth_address)
            .field("stealth_private_key", &"[REDACTED]")
            .field("amount", &self.amount)
            .field("token", &self.token)
            .field("port_index", &self.port_index)
            .field("block_number", &self.block_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_announcement() -> Announcement {
        Announcement::new(
            "0x4fd7356d8100da1ac4953448de4427013e173988",
            vec![0x02; COMPRESSED_PUBKEY_SIZE],
            vec![0x69, 0x01],
            "0xabcd",
            1234,
        )
    }

    #[test]
    fn test_well_formed() {
        assert!(sample_announcement().is_well_formed());
    }

    #[test]
    fn test_short_ephemeral_key_rejected() {
        let mut ann = sample_announcement();
        ann.ephemeral_pub_key = vec![0x02; 10];
        assert!(!ann.is_well_formed());
    }

    #[test]
    fn test_empty_metadata_rejected() {
        let mut ann = sample_announcement();
        ann.metadata.clear();
        assert!(!ann.is_well_formed());
        assert_eq!(ann.view_tag(), None);
    }

    #[test]
    fn test_missing_address_rejected() {
        let mut ann = sample_announcement();
        ann.stealth_address.clear();
        assert!(!ann.is_well_formed());
    }

    #[test]
    fn test_view_tag_is_first_metadata_byte() {
        assert_eq!(sample_announcement().view_tag(), Some(0x69));
    }

    #[test]
    fn test_announcement_serde_roundtrip() {
        let ann = sample_announcement();
        let json = serde_json::to_string(&ann).unwrap();
        let back: Announcement = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stealth_address, ann.stealth_address);
        assert_eq!(back.ephemeral_pub_key, ann.ephemeral_pub_key);
        assert_eq!(back.metadata, ann.metadata);
    }

    #[test]
    fn test_scanned_payment_debug_redacts_key() {
        let payment = ScannedPayment {
            stealth_address: EthAddress::zero(),
            stealth_private_key: SecretScalar::from_array([0x42; 32]),
            amount: 10,
            token: None,
            receipt_hash: [0; 32],
            port_index: 0,
            block_number: 1,
        };
        let debug = format!("{:?}", payment);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("4242"));
    }
}
