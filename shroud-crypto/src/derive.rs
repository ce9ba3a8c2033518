//! Wallet-signature key derivation.
//!
//! A single wallet signature is the root secret for every key set a user
//! owns. Three derivation trees hang off it:
//!
//! ```text
//! signature (ikm)
//!    ├─ default salt ──────────── root stealth keys
//!    ├─ index salt, port root ─── per-port keys      (port 0, 1, …)
//!    └─ index salt, fog root ──── fog-wallet keys    (fog 0, 1, …)
//! ```
//!
//! The port and fog roots are distinct domain strings, so the two trees are
//! cryptographically isolated even for equal indices.

use zeroize::Zeroizing;

use shroud_core::constants::{
    DEFAULT_SALT, DOMAIN_FOG_SPENDING, DOMAIN_FOG_VIEWING, DOMAIN_PORT_SPENDING,
    DOMAIN_PORT_VIEWING, DOMAIN_SPENDING, DOMAIN_VIEWING, SIGNATURE_MIN_SIZE,
};
use shroud_core::{
    hex_to_bytes, ChainPrefix, Result, ShroudError, StealthKeyPair, StealthKeys,
    StealthMetaAddress,
};

use crate::kdf::{hkdf_scalar, index_salt};
use crate::point::public_key_for;
use crate::scalar::scalar_from_secret;

/// Derives the root stealth key set from a wallet signature.
///
/// # Errors
/// `InvalidSignature` unless the signature is `0x`-prefixed hex decoding to
/// at least 64 bytes; hex errors for a malformed payload.
pub fn derive_stealth_keys(signature: &str, chain: ChainPrefix) -> Result<StealthKeys> {
    let ikm = signature_ikm(signature)?;
    derive_key_set(&ikm, DOMAIN_SPENDING, DOMAIN_VIEWING, &DEFAULT_SALT, chain)
}

/// Derives the key set for payment port `port_index`.
///
/// Ports partition incoming traffic (per counterparty, per invoice stream)
/// under one root signature while staying mutually independent.
pub fn derive_port_keys(
    signature: &str,
    port_index: u32,
    chain: ChainPrefix,
) -> Result<StealthKeys> {
    let ikm = signature_ikm(signature)?;
    derive_key_set(
        &ikm,
        DOMAIN_PORT_SPENDING,
        DOMAIN_PORT_VIEWING,
        &index_salt(port_index),
        chain,
    )
}

/// Derives the key set for fog wallet `fog_index`.
///
/// Same mechanics as [`derive_port_keys`] under a separate domain root; the
/// fog tree must stay isolated from the port tree even for equal indices.
pub fn derive_fog_keys(signature: &str, fog_index: u32, chain: ChainPrefix) -> Result<StealthKeys> {
    let ikm = signature_ikm(signature)?;
    derive_key_set(
        &ikm,
        DOMAIN_FOG_SPENDING,
        DOMAIN_FOG_VIEWING,
        &index_salt(fog_index),
        chain,
    )
}

/// Validates a wallet signature and returns its bytes as derivation input.
fn signature_ikm(signature: &str) -> Result<Zeroizing<Vec<u8>>> {
    let stripped = signature.strip_prefix("0x").ok_or_else(|| {
        ShroudError::InvalidSignature("signature must be 0x-prefixed hex".into())
    })?;

    let bytes = Zeroizing::new(hex_to_bytes(stripped, None)?);
    if bytes.len() < SIGNATURE_MIN_SIZE {
        return Err(ShroudError::InvalidSignature(format!(
            "signature must decode to at least {} bytes, got {}",
            SIGNATURE_MIN_SIZE,
            bytes.len()
        )));
    }

    Ok(bytes)
}

fn derive_key_set(
    ikm: &[u8],
    spending_domain: &[u8],
    viewing_domain: &[u8],
    salt: &[u8; 32],
    chain: ChainPrefix,
) -> Result<StealthKeys> {
    let spending_secret = hkdf_scalar(ikm, spending_domain, salt);
    let viewing_secret = hkdf_scalar(ikm, viewing_domain, salt);

    let spending_pub = public_key_for(&scalar_from_secret(&spending_secret))?;
    let viewing_pub = public_key_for(&scalar_from_secret(&viewing_secret))?;

    let meta_address = StealthMetaAddress::new(chain, spending_pub.clone(), viewing_pub.clone());

    Ok(StealthKeys::new(
        StealthKeyPair::new(spending_secret, spending_pub),
        StealthKeyPair::new(viewing_secret, viewing_pub),
        meta_address,
    ))
}
