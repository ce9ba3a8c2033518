//! Address types for Shroud.
//!
//! - [`ChainPrefix`]: the supported chain tags (`eth`, `mnt`)
//! - [`EthAddress`]: a 20-byte EVM address
//! - [`StealthMetaAddress`]: the published `st:<chain>:0x…` identifier

use serde::{Deserialize, Serialize};

use crate::bytes::hex_to_bytes;
use crate::constants::{
    COMPRESSED_PUBKEY_SIZE, ETH_ADDRESS_SIZE, META_ADDRESS_HEX_CHARS, META_ADDRESS_KEY_BYTES,
    META_ADDRESS_SCHEME,
};
use crate::error::{Result, ShroudError};
use crate::types::CompressedPublicKey;

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN PREFIX
// ═══════════════════════════════════════════════════════════════════════════════

/// Chain tag carried inside a stealth meta-address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainPrefix {
    /// Ethereum mainnet.
    Eth,
    /// Mantle.
    Mnt,
}

impl ChainPrefix {
    /// Returns the tag as it appears in the meta-address string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainPrefix::Eth => "eth",
            ChainPrefix::Mnt => "mnt",
        }
    }

    /// Parses a chain tag.
    ///
    /// # Errors
    /// `UnsupportedChain` for anything other than `eth` or `mnt`.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "eth" => Ok(ChainPrefix::Eth),
            "mnt" => Ok(ChainPrefix::Mnt),
            other => Err(ShroudError::UnsupportedChain(other.to_string())),
        }
    }
}

impl std::fmt::Display for ChainPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ETH ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A 20-byte EVM address.
///
/// Stored in binary form, so comparison is case-insensitive by construction:
/// parsing accepts any hex casing and equality is byte equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress {
    bytes: [u8; ETH_ADDRESS_SIZE],
}

impl EthAddress {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ETH_ADDRESS_SIZE {
            return Err(ShroudError::InvalidLength {
                field: "address",
                expected: ETH_ADDRESS_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; ETH_ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates an address from a fixed-size array.
    pub fn from_array(bytes: [u8; ETH_ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses from a hex string (any casing, with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex_to_bytes(s, Some(ETH_ADDRESS_SIZE))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ETH_ADDRESS_SIZE] {
        &self.bytes
    }

    /// Returns the `0x`-prefixed lowercase hex string.
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Returns the zero address.
    pub fn zero() -> Self {
        Self {
            bytes: [0u8; ETH_ADDRESS_SIZE],
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl std::fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EthAddress({})", self.to_hex_string())
    }
}

impl std::fmt::Display for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STEALTH META-ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// The published receiving identifier: `st:<chain>:0x` followed by exactly
/// 132 hex characters (33-byte spending public key ‖ 33-byte viewing public
/// key).
///
/// Round-trip invariant: `StealthMetaAddress::parse(&m.encode())` recovers
/// `m` for any well-formed value. Serialized as the string form.
#[derive(Clone, PartialEq, Eq)]
pub struct StealthMetaAddress {
    /// Chain this meta-address is scoped to.
    pub chain: ChainPrefix,
    /// Spending public key (first 33 bytes).
    pub spending_pub: CompressedPublicKey,
    /// Viewing public key (last 33 bytes).
    pub viewing_pub: CompressedPublicKey,
}

impl StealthMetaAddress {
    /// Builds a meta-address from its parts.
    pub fn new(
        chain: ChainPrefix,
        spending_pub: CompressedPublicKey,
        viewing_pub: CompressedPublicKey,
    ) -> Self {
        Self {
            chain,
            spending_pub,
            viewing_pub,
        }
    }

    /// Parses a `st:<chain>:0x…` string.
    ///
    /// # Errors
    /// `InvalidMetaAddress` for structural problems, `UnsupportedChain` for an
    /// unknown chain tag, and hex/length errors for malformed key material.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let scheme = parts.next().unwrap_or_default();
        let chain_tag = parts
            .next()
            .ok_or_else(|| ShroudError::InvalidMetaAddress("missing chain tag".into()))?;
        let payload = parts
            .next()
            .ok_or_else(|| ShroudError::InvalidMetaAddress("missing key payload".into()))?;

        if scheme != META_ADDRESS_SCHEME {
            return Err(ShroudError::InvalidMetaAddress(format!(
                "expected `{}:` prefix, got `{}:`",
                META_ADDRESS_SCHEME, scheme
            )));
        }

        let chain = ChainPrefix::parse(chain_tag)?;

        let hex_part = payload.strip_prefix("0x").ok_or_else(|| {
            ShroudError::InvalidMetaAddress("key payload must be 0x-prefixed".into())
        })?;
        if hex_part.len() != META_ADDRESS_HEX_CHARS {
            return Err(ShroudError::InvalidMetaAddress(format!(
                "expected {} hex chars, got {}",
                META_ADDRESS_HEX_CHARS,
                hex_part.len()
            )));
        }

        let bytes = hex_to_bytes(hex_part, Some(META_ADDRESS_KEY_BYTES))?;
        let spending_pub = CompressedPublicKey::from_bytes(&bytes[..COMPRESSED_PUBKEY_SIZE])?;
        let viewing_pub = CompressedPublicKey::from_bytes(&bytes[COMPRESSED_PUBKEY_SIZE..])?;

        Ok(Self {
            chain,
            spending_pub,
            viewing_pub,
        })
    }

    /// Encodes to the canonical string form.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:0x{}{}",
            META_ADDRESS_SCHEME,
            self.chain,
            self.spending_pub.to_hex(),
            self.viewing_pub.to_hex()
        )
    }
}

impl std::fmt::Display for StealthMetaAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::fmt::Debug for StealthMetaAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StealthMetaAddress({})", self.encode())
    }
}

impl Serialize for StealthMetaAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for StealthMetaAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_meta() -> StealthMetaAddress {
        StealthMetaAddress::new(
            ChainPrefix::Mnt,
            CompressedPublicKey::from_array([0x02; COMPRESSED_PUBKEY_SIZE]),
            CompressedPublicKey::from_array([0x03; COMPRESSED_PUBKEY_SIZE]),
        )
    }

    #[test]
    fn test_chain_prefix_parse() {
        assert_eq!(ChainPrefix::parse("eth").unwrap(), ChainPrefix::Eth);
        assert_eq!(ChainPrefix::parse("mnt").unwrap(), ChainPrefix::Mnt);
        assert!(matches!(
            ChainPrefix::parse("sol"),
            Err(ShroudError::UnsupportedChain(_))
        ));
    }

    #[test]
    fn test_eth_address_case_insensitive() {
        let lower = EthAddress::from_hex("0x4fd7356d8100da1ac4953448de4427013e173988").unwrap();
        let upper = EthAddress::from_hex("0x4FD7356D8100DA1AC4953448DE4427013E173988").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_eth_address_formatting() {
        let addr = EthAddress::from_array([0xAB; ETH_ADDRESS_SIZE]);
        let s = addr.to_hex_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 42);
        assert_eq!(EthAddress::from_hex(&s).unwrap(), addr);
    }

    #[test]
    fn test_eth_address_zero() {
        assert!(EthAddress::zero().is_zero());
        assert!(!EthAddress::from_array([1; ETH_ADDRESS_SIZE]).is_zero());
    }

    #[test]
    fn test_meta_address_roundtrip() {
        let meta = sample_meta();
        let encoded = meta.encode();
        assert!(encoded.starts_with("st:mnt:0x"));
        assert_eq!(encoded.len(), "st:mnt:0x".len() + META_ADDRESS_HEX_CHARS);

        let parsed = StealthMetaAddress::parse(&encoded).unwrap();
        assert_eq!(parsed, meta);
        assert_eq!(parsed.encode(), encoded);
    }

    #[test]
    fn test_meta_address_chain_resolution() {
        let mut meta = sample_meta();
        meta.chain = ChainPrefix::Eth;
        let parsed = StealthMetaAddress::parse(&meta.encode()).unwrap();
        assert_eq!(parsed.chain, ChainPrefix::Eth);
    }

    #[test_case("" ; "empty string")]
    #[test_case("st:mnt" ; "missing payload")]
    #[test_case("sx:mnt:0x00" ; "wrong scheme")]
    #[test_case("st:mnt:00ff" ; "missing 0x")]
    #[test_case("st:mnt:0xabcd" ; "payload too short")]
    fn test_meta_address_malformed(input: &str) {
        assert!(matches!(
            StealthMetaAddress::parse(input),
            Err(ShroudError::InvalidMetaAddress(_))
        ));
    }

    #[test]
    fn test_meta_address_unknown_chain() {
        let encoded = sample_meta().encode().replace("st:mnt:", "st:btc:");
        assert!(matches!(
            StealthMetaAddress::parse(&encoded),
            Err(ShroudError::UnsupportedChain(_))
        ));
    }

    #[test]
    fn test_meta_address_bad_hex_payload() {
        let mut encoded = sample_meta().encode();
        encoded.replace_range(encoded.len() - 2.., "zz");
        assert!(StealthMetaAddress::parse(&encoded).unwrap_err().is_format());
    }

    #[test]
    fn test_meta_address_serde_as_string() {
        let meta = sample_meta();
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("st:mnt:0x"));
        let back: StealthMetaAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
