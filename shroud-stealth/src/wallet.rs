//! Chain-scoped wallet facade.
//!
//! [`StealthWallet`] bundles the derivation, generation-support, and
//! recovery operations behind one chain-configured object: the master
//! signature stays inside (zeroized on drop), the root key set is cached,
//! and port/fog key sets are derived on demand.

use zeroize::{Zeroizing, ZeroizeOnDrop};

use shroud_core::{ChainPrefix, Result, StealthKeys, StealthMetaAddress};
use shroud_crypto::{derive_fog_keys, derive_port_keys, derive_stealth_keys};

use crate::payment::compute_view_tag;
use crate::recovery::{derive_stealth_private_key, RecoveredStealthKey};

/// A session wallet for one user on one chain.
///
/// Holds the master signature and the root key set. Nothing here is
/// persisted; the caller owns the wallet for the session and drops it when
/// done (zeroizing all secrets).
#[derive(ZeroizeOnDrop)]
pub struct StealthWallet {
    #[zeroize(skip)]
    chain: ChainPrefix,
    signature: Zeroizing<String>,
    keys: StealthKeys,
}

impl StealthWallet {
    /// Creates a wallet by deriving the root key set from a wallet signature.
    ///
    /// # Errors
    /// Propagates signature validation errors from
    /// [`derive_stealth_keys`].
    pub fn from_signature(signature: &str, chain: ChainPrefix) -> Result<Self> {
        let keys = derive_stealth_keys(signature, chain)?;
        Ok(Self {
            chain,
            signature: Zeroizing::new(signature.to_owned()),
            keys,
        })
    }

    /// The chain this wallet is scoped to.
    pub fn chain(&self) -> ChainPrefix {
        self.chain
    }

    /// The cached root key set.
    pub fn keys(&self) -> &StealthKeys {
        &self.keys
    }

    /// The root meta-address to publish.
    pub fn meta_address(&self) -> &StealthMetaAddress {
        &self.keys.meta_address
    }

    /// Derives the key set for payment port `index`.
    pub fn port_keys(&self, index: u32) -> Result<StealthKeys> {
        derive_port_keys(&self.signature, index, self.chain)
    }

    /// Derives the key set for fog wallet `index`.
    pub fn fog_keys(&self, index: u32) -> Result<StealthKeys> {
        derive_fog_keys(&self.signature, index, self.chain)
    }

    /// Computes the view tag this wallet expects for an announced ephemeral
    /// key. Used as the cheap pre-filter before full recovery.
    pub fn expected_view_tag(&self, ephemeral_public_key: &[u8]) -> Result<u8> {
        compute_view_tag(ephemeral_public_key, self.keys.viewing.secret.as_bytes())
    }

    /// Recovers the stealth private key for an announced payment addressed
    /// to the root key set.
    pub fn recover_payment(&self, ephemeral_public_key: &[u8]) -> Result<RecoveredStealthKey> {
        derive_stealth_private_key(
            ephemeral_public_key,
            self.keys.spending.secret.as_bytes(),
            self.keys.viewing.secret.as_bytes(),
        )
    }
}

impl std::fmt::Debug for StealthWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthWallet")
            .field("chain", &self.chain)
            .field("meta_address", &self.keys.meta_address)
            .field("signature", &"[REDACTED]")
            .field("keys", &"[REDACTED]")
            .finish()
    }
}
