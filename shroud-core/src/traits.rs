//! Collaborator interfaces.
//!
//! These traits are implemented outside this workspace (indexer, RPC layer,
//! privacy-pool engine). Declaring them here keeps the core testable with
//! in-memory fakes and pins down exactly what the core consumes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Announcement, EthAddress, SecretScalar};

// ═══════════════════════════════════════════════════════════════════════════════
// ANNOUNCEMENT SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Paginated access to on-chain announcements for one chain.
///
/// Implementations own retrieval, retry, and cancellation policy; the
/// scanner only pages through whatever they return.
#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    /// Returns up to `limit` announcements starting at `offset`.
    ///
    /// An empty page signals the end of the stream.
    async fn fetch_page(
        &self,
        chain_id: u64,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<Announcement>>;

    /// Total number of announcements available for `chain_id`.
    async fn count(&self, chain_id: u64) -> Result<u64>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// BALANCE ORACLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Balance queries for discovered stealth addresses.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Native-asset balance of `address`.
    async fn native_balance(&self, address: &EthAddress) -> Result<u128>;

    /// ERC-20 balance of `address` for `token`.
    async fn token_balance(&self, token: &EthAddress, address: &EthAddress) -> Result<u128>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRIVACY-POOL SECRET DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Secret derivation consumed by the sibling privacy-pool engine.
///
/// The pool shares the HKDF-from-signature philosophy but is a separate
/// subsystem; only this derivation surface is visible from here.
pub trait PoolSecretDerivation: Send + Sync {
    /// Derives the deposit-commitment secret for `index`.
    fn deposit_secret(&self, signature: &str, index: u32) -> Result<SecretScalar>;

    /// Derives the withdrawal-nullifier secret for `index`.
    fn withdrawal_secret(&self, signature: &str, index: u32) -> Result<SecretScalar>;
}
