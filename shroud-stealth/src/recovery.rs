//! Stealth key recovery (recipient side).
//!
//! The recipient reproduces the payer's shared secret from the announced
//! ephemeral key and their viewing key, then offsets their spending key:
//!
//! ```text
//! shared_secret       = keccak256((v·R).x)           (== keccak256((r·V).x))
//! stealth_private_key = (spending + scalar(shared_secret)) mod n
//! ```
//!
//! The recovered key's public key is exactly the stealth point the generator
//! computed, so both sides land on the same address bit for bit.

use k256::elliptic_curve::Field;
use k256::ProjectivePoint;

use shroud_core::{CompressedPublicKey, EthAddress, Result, SecretScalar, ShroudError};
use shroud_crypto::{
    decompress, eth_address, scalar_from_bytes, scalar_from_secret, scalar_to_bytes,
    shared_secret_hash,
};

/// A recovered stealth key: the one-time address and the private key that
/// controls it. `Debug` never prints the key.
#[derive(Clone)]
pub struct RecoveredStealthKey {
    /// The one-time address the payment went to.
    pub stealth_address: EthAddress,
    /// Private key controlling `stealth_address` (zeroized on drop).
    pub stealth_private_key: SecretScalar,
}

impl std::fmt::Debug for RecoveredStealthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveredStealthKey")
            .field("stealth_address", &self.stealth_address)
            .field("stealth_private_key", &"[REDACTED]")
            .finish()
    }
}

/// Derives the stealth private key for an announced payment.
///
/// # Errors
/// `InvalidLength` for wrong input sizes (33/32/32 bytes), `InvalidPoint`
/// for an off-curve ephemeral key, `ScalarOutOfRange` in the negligible case
/// where the key sum is zero.
pub fn derive_stealth_private_key(
    ephemeral_public_key: &[u8],
    spending_private_key: &[u8],
    viewing_private_key: &[u8],
) -> Result<RecoveredStealthKey> {
    let ephemeral = CompressedPublicKey::from_bytes(ephemeral_public_key)?;
    let spending = SecretScalar::from_bytes(spending_private_key)?;
    let viewing = SecretScalar::from_bytes(viewing_private_key)?;

    let ephemeral_point = decompress(&ephemeral)?;
    let shared_secret = shared_secret_hash(&(ephemeral_point * scalar_from_secret(&viewing)))?;

    let stealth_scalar = scalar_from_secret(&spending) + scalar_from_bytes(&shared_secret);
    if bool::from(stealth_scalar.is_zero()) {
        return Err(ShroudError::ScalarOutOfRange(
            "derived stealth key is zero".into(),
        ));
    }

    let stealth_point = ProjectivePoint::GENERATOR * stealth_scalar;

    Ok(RecoveredStealthKey {
        stealth_address: eth_address(&stealth_point)?,
        stealth_private_key: SecretScalar::from_array(scalar_to_bytes(&stealth_scalar)),
    })
}
