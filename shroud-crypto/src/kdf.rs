//! HKDF-SHA256 derivation primitive.
//!
//! Every key tree in the protocol (root stealth keys, per-port keys,
//! fog-wallet keys, the sibling pool secrets) goes through the single
//! [`hkdf_scalar`] primitive with a different domain tag and salt. Keeping
//! one primitive makes the domain-separation property auditable in one place.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use shroud_core::constants::SCALAR_SIZE;
use shroud_core::SecretScalar;

use crate::scalar::{scalar_from_bytes, scalar_to_bytes};

/// Derives a private scalar from input key material.
///
/// `HKDF-SHA256(salt, ikm)` expanded with `info = domain`, reduced modulo the
/// curve order (zero mapping to 1, see [`scalar_from_bytes`]).
pub fn hkdf_scalar(ikm: &[u8], domain: &[u8], salt: &[u8; 32]) -> SecretScalar {
    let hk = Hkdf::<Sha256>::new(Some(&salt[..]), ikm);
    let mut okm = [0u8; SCALAR_SIZE];
    hk.expand(domain, &mut okm)
        .expect("32 bytes is a valid HKDF-SHA256 output length");

    let scalar = scalar_from_bytes(&okm);
    okm.zeroize();
    SecretScalar::from_array(scalar_to_bytes(&scalar))
}

/// Builds the salt for an indexed sub-derivation (ports, fog wallets): the
/// big-endian 4-byte index, zero-padded on the left to 32 bytes.
///
/// Distinct indices give distinct HKDF salts and therefore independent key
/// material; compromising one index reveals nothing about any other.
pub fn index_salt(index: u32) -> [u8; 32] {
    let mut salt = [0u8; 32];
    salt[28..].copy_from_slice(&index.to_be_bytes());
    salt
}
