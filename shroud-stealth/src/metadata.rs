//! Announcement metadata codec.
//!
//! Canonical wire layout, version 1:
//!
//! ```text
//! byte  0        view tag
//! byte  1        layout version (0x01)
//! bytes [2,34)   receipt hash (32)
//! bytes [34,66)  port id: big-endian u32 zero-padded to 32 bytes
//! bytes [66,86)  token address (20)        (long form only)
//! bytes [86,118) amount, big-endian u256   (long form only)
//! ```
//!
//! Dispatch is on the explicit version byte, never on length: exactly 66 or
//! 118 bytes are accepted, unknown versions are rejected, and the padding
//! regions of the port-id and amount fields must be zero. A legacy or
//! corrupted announcement therefore fails parsing instead of being
//! misinterpreted.

use shroud_core::constants::{
    ETH_ADDRESS_SIZE, KECCAK256_SIZE, METADATA_BASE_SIZE, METADATA_FULL_SIZE, METADATA_VERSION,
};
use shroud_core::{EthAddress, Result, ShroudError};

/// Parsed announcement metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnouncementMetadata {
    /// View tag (byte 0).
    pub view_tag: u8,
    /// Receipt hash binding the payment to an off-chain receipt.
    pub receipt_hash: [u8; KECCAK256_SIZE],
    /// Port the payment is addressed to.
    pub port_index: u32,
    /// Token contract for an ERC-20 payment; `None` for the native asset.
    pub token: Option<EthAddress>,
    /// Token amount; 0 in the base form.
    pub amount: u128,
}

/// Encodes announcement metadata in the canonical layout.
///
/// # Errors
/// `InvalidLength` unless `receipt_hash` is exactly 32 bytes. Token and
/// amount lengths are enforced by their types.
pub fn build_announcement_metadata(
    view_tag: u8,
    receipt_hash: &[u8],
    port_index: u32,
    transfer: Option<(&EthAddress, u128)>,
) -> Result<Vec<u8>> {
    if receipt_hash.len() != KECCAK256_SIZE {
        return Err(ShroudError::InvalidLength {
            field: "receipt hash",
            expected: KECCAK256_SIZE,
            actual: receipt_hash.len(),
        });
    }

    let size = if transfer.is_some() {
        METADATA_FULL_SIZE
    } else {
        METADATA_BASE_SIZE
    };
    let mut bytes = Vec::with_capacity(size);

    bytes.push(view_tag);
    bytes.push(METADATA_VERSION);
    bytes.extend_from_slice(receipt_hash);
    bytes.extend_from_slice(&[0u8; 28]);
    bytes.extend_from_slice(&port_index.to_be_bytes());

    if let Some((token, amount)) = transfer {
        bytes.extend_from_slice(token.as_bytes());
        bytes.extend_from_slice(&[0u8; 16]);
        bytes.extend_from_slice(&amount.to_be_bytes());
    }

    Ok(bytes)
}

/// Parses announcement metadata in the canonical layout.
///
/// # Errors
/// `InvalidMetadata` for a truncated buffer, an unknown version byte, a
/// length other than 66/118, or non-zero padding in the port-id/amount
/// fields.
pub fn parse_announcement_metadata(bytes: &[u8]) -> Result<AnnouncementMetadata> {
    if bytes.len() < 2 {
        return Err(ShroudError::InvalidMetadata(format!(
            "too short: {} bytes",
            bytes.len()
        )));
    }

    let version = bytes[1];
    if version != METADATA_VERSION {
        return Err(ShroudError::InvalidMetadata(format!(
            "unknown layout version {}",
            version
        )));
    }

    if bytes.len() != METADATA_BASE_SIZE && bytes.len() != METADATA_FULL_SIZE {
        return Err(ShroudError::InvalidMetadata(format!(
            "expected {} or {} bytes, got {}",
            METADATA_BASE_SIZE,
            METADATA_FULL_SIZE,
            bytes.len()
        )));
    }

    let mut receipt_hash = [0u8; KECCAK256_SIZE];
    receipt_hash.copy_from_slice(&bytes[2..2 + KECCAK256_SIZE]);

    let port_field = &bytes[34..66];
    if port_field[..28].iter().any(|&b| b != 0) {
        return Err(ShroudError::InvalidMetadata("port id out of range".into()));
    }
    let port_index = u32::from_be_bytes(
        port_field[28..]
            .try_into()
            .map_err(|_| ShroudError::InvalidMetadata("invalid port id".into()))?,
    );

    let (token, amount) = if bytes.len() == METADATA_FULL_SIZE {
        let token = EthAddress::from_bytes(&bytes[66..66 + ETH_ADDRESS_SIZE])?;
        let amount_field = &bytes[86..118];
        if amount_field[..16].iter().any(|&b| b != 0) {
            return Err(ShroudError::InvalidMetadata("amount out of range".into()));
        }
        let amount = u128::from_be_bytes(
            amount_field[16..]
                .try_into()
                .map_err(|_| ShroudError::InvalidMetadata("invalid amount".into()))?,
        );
        (Some(token), amount)
    } else {
        (None, 0)
    };

    Ok(AnnouncementMetadata {
        view_tag: bytes[0],
        receipt_hash,
        port_index,
        token,
        amount,
    })
}
