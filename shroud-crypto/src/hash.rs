//! Keccak256 hashing.
//!
//! Note: keccak256 is NOT SHA3-256; they use different padding. Ethereum
//! addresses and this protocol's shared secrets both use keccak256.

use sha3::{Digest, Keccak256};

/// Computes keccak256 over `input`.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    Digest::update(&mut hasher, input);
    hasher.finalize().into()
}
