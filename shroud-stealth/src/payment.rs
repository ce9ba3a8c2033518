//! Stealth address generation (payer side).
//!
//! The payer parses the recipient's meta-address `(K, V)`, draws an ephemeral
//! scalar `r`, and derives:
//!
//! ```text
//! R             = r·G                      (published ephemeral key)
//! shared_secret = keccak256((r·V).x)
//! stealth_point = K + scalar(shared_secret)·G
//! address       = keccak256(stealth_point.uncompressed[1..])[12..]
//! view_tag      = shared_secret[0]
//! ```
//!
//! Only the recipient's viewing key can reproduce `shared_secret` from `R`,
//! so the address is unlinkable to the meta-address for everyone else.

use k256::{NonZeroScalar, ProjectivePoint};
use serde::{Deserialize, Serialize};

use shroud_core::constants::SCALAR_SIZE;
use shroud_core::{
    CompressedPublicKey, EthAddress, Result, ShroudError, StealthMetaAddress,
};
use shroud_crypto::{
    checked_scalar, decompress, eth_address, public_key_for, scalar_from_bytes,
    shared_secret_hash,
};

/// Everything a payer needs after generating a one-time address: where to
/// send funds, and what to publish in the announcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthPaymentAddress {
    /// The one-time address to send funds to.
    pub stealth_address: EthAddress,
    /// The ephemeral public key `R`, published with the payment.
    pub ephemeral_public_key: CompressedPublicKey,
    /// View tag: first byte of the shared secret.
    pub view_tag: u8,
}

/// Generates a stealth address with a fresh random ephemeral scalar.
pub fn generate_stealth_address(meta: &StealthMetaAddress) -> Result<StealthPaymentAddress> {
    let ephemeral = NonZeroScalar::random(&mut rand::thread_rng());
    generate_with_scalar(meta, &ephemeral)
}

/// Generates a stealth address with a caller-supplied ephemeral scalar.
///
/// Needed for reproducible flows; the scalar must be exactly 32 bytes
/// (`InvalidLength`) and in [1, n−1] (`ScalarOutOfRange`), so degenerate
/// ephemerals are rejected instead of silently reduced.
pub fn generate_stealth_address_deterministic(
    meta: &StealthMetaAddress,
    ephemeral_private_key: &[u8],
) -> Result<StealthPaymentAddress> {
    let ephemeral = checked_scalar(ephemeral_private_key)?;
    generate_with_scalar(meta, &ephemeral)
}

fn generate_with_scalar(
    meta: &StealthMetaAddress,
    ephemeral: &NonZeroScalar,
) -> Result<StealthPaymentAddress> {
    let ephemeral_public_key = public_key_for(ephemeral)?;

    let viewing_point = decompress(&meta.viewing_pub)?;
    let shared_secret = shared_secret_hash(&(viewing_point * ephemeral.as_ref()))?;
    let view_tag = shared_secret[0];

    let spending_point = decompress(&meta.spending_pub)?;
    let stealth_point =
        spending_point + ProjectivePoint::GENERATOR * scalar_from_bytes(&shared_secret);

    Ok(StealthPaymentAddress {
        stealth_address: eth_address(&stealth_point)?,
        ephemeral_public_key,
        view_tag,
    })
}

/// Computes the view tag for an announcement from the recipient side.
///
/// Uses ECDH commutativity (`v·R == r·V`) to reproduce the shared secret
/// without deriving the full address; this is the O(1) scanning pre-filter.
pub fn compute_view_tag(ephemeral_public_key: &[u8], viewing_private_key: &[u8]) -> Result<u8> {
    let ephemeral = CompressedPublicKey::from_bytes(ephemeral_public_key)?;
    if viewing_private_key.len() != SCALAR_SIZE {
        return Err(ShroudError::InvalidLength {
            field: "viewing private key",
            expected: SCALAR_SIZE,
            actual: viewing_private_key.len(),
        });
    }
    let mut scalar_bytes = [0u8; SCALAR_SIZE];
    scalar_bytes.copy_from_slice(viewing_private_key);

    let ephemeral_point = decompress(&ephemeral)?;
    let shared_secret = shared_secret_hash(&(ephemeral_point * scalar_from_bytes(&scalar_bytes)))?;
    Ok(shared_secret[0])
}
