//! # Shroud Scanner
//!
//! Batch scanning of untrusted announcements to discover incoming payments.
//!
//! ## Contract
//!
//! - Key material is validated once, up front; bad keys are an error
//! - Everything per announcement is adversarial input: a malformed,
//!   off-curve, or corrupted item becomes "no match", never an error, and
//!   never aborts the batch
//! - The view tag (`metadata[0]`) filters ~255/256 of unrelated items
//!   before any curve arithmetic runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use shroud_scanner::Scanner;
//!
//! let scanner = Scanner::from_wallet(&wallet);
//! let payments = scanner.scan(&announcements);
//! for payment in &payments {
//!     println!("found {}", payment.stealth_address);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, info, instrument};

use shroud_core::constants::{DEFAULT_SCAN_BATCH_SIZE, MAX_SCAN_BATCH_SIZE};
use shroud_core::{
    Announcement, AnnouncementSource, EthAddress, Result, ScannedPayment, SecretScalar,
    ShroudError,
};
use shroud_stealth::wallet::StealthWallet;
use shroud_stealth::{compute_view_tag, derive_stealth_private_key, parse_announcement_metadata};

// ═══════════════════════════════════════════════════════════════════════════════
// FREE FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Checks a single announcement against a key pair.
///
/// Returns `Ok(None)` for anything that is not a confirmed match: malformed
/// structure, view-tag mismatch, tag collision, broken metadata.
///
/// # Errors
/// Only for invalid key material (wrong byte length).
pub fn check_announcement(
    announcement: &Announcement,
    spending_private_key: &[u8],
    viewing_private_key: &[u8],
) -> Result<Option<ScannedPayment>> {
    let (spending, viewing) = validate_keys(spending_private_key, viewing_private_key)?;
    Ok(evaluate(announcement, &spending, &viewing).into_payment())
}

/// Scans a batch of announcements, returning exactly the confirmed matches.
///
/// There is no partial-batch failure mode: one adversarial item cannot
/// suppress any other item or abort the scan.
///
/// # Errors
/// Only for invalid key material (wrong byte length).
pub fn scan_announcements(
    announcements: &[Announcement],
    spending_private_key: &[u8],
    viewing_private_key: &[u8],
) -> Result<Vec<ScannedPayment>> {
    let (spending, viewing) = validate_keys(spending_private_key, viewing_private_key)?;
    Ok(announcements
        .iter()
        .filter_map(|announcement| evaluate(announcement, &spending, &viewing).into_payment())
        .collect())
}

fn validate_keys(
    spending_private_key: &[u8],
    viewing_private_key: &[u8],
) -> Result<(SecretScalar, SecretScalar)> {
    let spending = SecretScalar::from_bytes(spending_private_key)?;
    let viewing = SecretScalar::from_bytes(viewing_private_key)?;
    Ok((spending, viewing))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-ITEM EVALUATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of evaluating one announcement. Per-item failures are data, not
/// errors: every arm except `Matched` means "not a payment for these keys".
enum ItemOutcome {
    /// Structural/curve-level garbage (short ephemeral key, off-curve point,
    /// missing fields).
    Malformed,
    /// View tag did not match; filtered without curve arithmetic.
    Filtered,
    /// View tag matched but the address or metadata did not confirm: the
    /// expected 1/256 collision, or a corrupted payload.
    Collision,
    /// Confirmed payment.
    Matched(Box<ScannedPayment>),
}

impl ItemOutcome {
    fn into_payment(self) -> Option<ScannedPayment> {
        match self {
            ItemOutcome::Matched(payment) => Some(*payment),
            _ => None,
        }
    }
}

/// The failure boundary around one announcement: every fallible step either
/// produces a value or downgrades the item, so scanning always proceeds to
/// the next item.
fn evaluate(
    announcement: &Announcement,
    spending: &SecretScalar,
    viewing: &SecretScalar,
) -> ItemOutcome {
    if !announcement.is_well_formed() {
        return ItemOutcome::Malformed;
    }
    let announced_tag = announcement.metadata[0];

    let expected_tag =
        match compute_view_tag(&announcement.ephemeral_pub_key, viewing.as_bytes()) {
            Ok(tag) => tag,
            Err(_) => return ItemOutcome::Malformed,
        };
    if !bool::from(expected_tag.ct_eq(&announced_tag)) {
        return ItemOutcome::Filtered;
    }

    let recovered = match derive_stealth_private_key(
        &announcement.ephemeral_pub_key,
        spending.as_bytes(),
        viewing.as_bytes(),
    ) {
        Ok(recovered) => recovered,
        Err(_) => return ItemOutcome::Collision,
    };

    let announced_address = match EthAddress::from_hex(&announcement.stealth_address) {
        Ok(address) => address,
        Err(_) => return ItemOutcome::Collision,
    };
    let derived = recovered.stealth_address.as_bytes();
    if !bool::from(derived[..].ct_eq(&announced_address.as_bytes()[..])) {
        return ItemOutcome::Collision;
    }

    let metadata = match parse_announcement_metadata(&announcement.metadata) {
        Ok(metadata) => metadata,
        Err(_) => return ItemOutcome::Collision,
    };

    ItemOutcome::Matched(Box::new(ScannedPayment {
        stealth_address: recovered.stealth_address,
        stealth_private_key: recovered.stealth_private_key,
        amount: metadata.amount,
        token: metadata.token,
        receipt_hash: metadata.receipt_hash,
        port_index: metadata.port_index,
        block_number: announcement.block_number,
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCANNER
// ═══════════════════════════════════════════════════════════════════════════════

/// Scanner configuration.
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    /// Page size when pulling from an [`AnnouncementSource`].
    pub batch_size: usize,
    /// Stop after the first confirmed payment.
    pub stop_on_first: bool,
    /// Minimum block number to consider (inclusive).
    pub from_block: Option<u64>,
    /// Maximum block number to consider (inclusive).
    pub to_block: Option<u64>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_SCAN_BATCH_SIZE,
            stop_on_first: false,
            from_block: None,
            to_block: None,
        }
    }
}

impl ScannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source page size (clamped to the protocol maximum).
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.clamp(1, MAX_SCAN_BATCH_SIZE);
        self
    }

    /// Stops scanning after the first confirmed payment.
    pub fn stop_on_first(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    /// Restricts scanning to a block range (inclusive).
    pub fn block_range(mut self, from: u64, to: u64) -> Self {
        self.from_block = Some(from);
        self.to_block = Some(to);
        self
    }
}

/// Scanning statistics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Announcements evaluated.
    pub total_scanned: u64,
    /// Items rejected structurally before or during the tag check.
    pub skipped_malformed: u64,
    /// Items whose view tag matched (collisions included).
    pub view_tag_matches: u64,
    /// Confirmed payments.
    pub discoveries: u64,
    /// Wall-clock duration of the last scan in milliseconds.
    pub duration_ms: u64,
}

impl ScanStats {
    /// Creates an empty stats record.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, outcome: &ItemOutcome) {
        self.total_scanned += 1;
        match outcome {
            ItemOutcome::Malformed => self.skipped_malformed += 1,
            ItemOutcome::Filtered => {}
            ItemOutcome::Collision => self.view_tag_matches += 1,
            ItemOutcome::Matched(_) => {
                self.view_tag_matches += 1;
                self.discoveries += 1;
            }
        }
    }

    /// Scan rate in announcements per second.
    pub fn rate(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            (self.total_scanned as f64 / self.duration_ms as f64) * 1000.0
        }
    }

    /// Percentage of announcements rejected by the view-tag filter.
    pub fn filter_efficiency(&self) -> f64 {
        if self.total_scanned == 0 {
            0.0
        } else {
            ((self.total_scanned - self.view_tag_matches) as f64 / self.total_scanned as f64)
                * 100.0
        }
    }
}

/// Batch scanner owning one validated key pair.
///
/// All scanning methods are safe to call from multiple threads; the only
/// shared state is the stats cell.
pub struct Scanner {
    spending: SecretScalar,
    viewing: SecretScalar,
    config: ScannerConfig,
    stats: RwLock<ScanStats>,
}

impl Scanner {
    /// Creates a scanner from raw key bytes.
    ///
    /// # Errors
    /// `InvalidLength` unless both keys are exactly 32 bytes.
    pub fn new(spending_private_key: &[u8], viewing_private_key: &[u8]) -> Result<Self> {
        Self::with_config(
            spending_private_key,
            viewing_private_key,
            ScannerConfig::default(),
        )
    }

    /// Creates a scanner with a custom configuration.
    pub fn with_config(
        spending_private_key: &[u8],
        viewing_private_key: &[u8],
        config: ScannerConfig,
    ) -> Result<Self> {
        let (spending, viewing) = validate_keys(spending_private_key, viewing_private_key)?;
        Ok(Self {
            spending,
            viewing,
            config,
            stats: RwLock::new(ScanStats::new()),
        })
    }

    /// Creates a scanner over a wallet's root key set.
    pub fn from_wallet(wallet: &StealthWallet) -> Self {
        Self {
            spending: wallet.keys().spending.secret.clone(),
            viewing: wallet.keys().viewing.secret.clone(),
            config: ScannerConfig::default(),
            stats: RwLock::new(ScanStats::new()),
        }
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> ScanStats {
        self.stats.read().clone()
    }

    /// Resets the statistics.
    pub fn reset_stats(&self) {
        *self.stats.write() = ScanStats::new();
    }

    /// Checks a single announcement, recording stats.
    pub fn check(&self, announcement: &Announcement) -> Option<ScannedPayment> {
        let outcome = evaluate(announcement, &self.spending, &self.viewing);
        self.stats.write().record(&outcome);
        outcome.into_payment()
    }

    /// Scans a batch, applying the configured block range and stop-on-first
    /// behavior. Always completes; returns exactly the confirmed matches.
    pub fn scan(&self, announcements: &[Announcement]) -> Vec<ScannedPayment> {
        let start = Instant::now();
        let mut payments = Vec::new();

        for announcement in announcements {
            if !self.in_block_range(announcement.block_number) {
                continue;
            }

            let outcome = evaluate(announcement, &self.spending, &self.viewing);
            self.stats.write().record(&outcome);

            if let Some(payment) = outcome.into_payment() {
                payments.push(payment);
                if self.config.stop_on_first {
                    break;
                }
            }
        }

        let mut stats = self.stats.write();
        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            scanned = stats.total_scanned,
            discoveries = stats.discoveries,
            "batch scan complete"
        );

        payments
    }

    /// Scans every announcement an [`AnnouncementSource`] has for `chain_id`,
    /// page by page.
    ///
    /// # Errors
    /// Propagates source errors; per-announcement failures still only skip
    /// the item.
    #[instrument(skip(self, source))]
    pub async fn scan_source(
        &self,
        source: &dyn AnnouncementSource,
        chain_id: u64,
    ) -> Result<Vec<ScannedPayment>> {
        let start = Instant::now();
        let total = source.count(chain_id).await?;
        info!(total, "starting source scan");

        let mut payments = Vec::new();
        let mut offset = 0u64;

        loop {
            let page = source
                .fetch_page(chain_id, offset, self.config.batch_size)
                .await?;
            if page.is_empty() {
                break;
            }
            if page.len() > MAX_SCAN_BATCH_SIZE {
                return Err(ShroudError::Source(format!(
                    "source page exceeds maximum size: {} > {}",
                    page.len(),
                    MAX_SCAN_BATCH_SIZE
                )));
            }
            offset += page.len() as u64;

            payments.extend(self.scan(&page));
            if self.config.stop_on_first && !payments.is_empty() {
                break;
            }
        }

        let mut stats = self.stats.write();
        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            scanned = stats.total_scanned,
            discoveries = stats.discoveries,
            duration_ms = stats.duration_ms,
            "source scan complete"
        );

        Ok(payments)
    }

    fn in_block_range(&self, block_number: u64) -> bool {
        if let Some(from) = self.config.from_block {
            if block_number < from {
                return false;
            }
        }
        if let Some(to) = self.config.to_block {
            if block_number > to {
                return false;
            }
        }
        true
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("spending", &"[REDACTED]")
            .field("viewing", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use shroud_core::ChainPrefix;
    use shroud_crypto::{derive_port_keys, derive_stealth_keys, keccak256};
    use shroud_stealth::{build_announcement_metadata, generate_stealth_address};

    const TEST_SIGNATURE: &str = "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f4041";

    fn root_keys() -> shroud_core::StealthKeys {
        derive_stealth_keys(TEST_SIGNATURE, ChainPrefix::Mnt).unwrap()
    }

    fn receipt() -> [u8; 32] {
        keccak256(b"invoice-0001")
    }

    /// A real announcement for `keys`, built exactly as a payer would.
    fn announcement_for(keys: &shroud_core::StealthKeys, block_number: u64) -> Announcement {
        let payment = generate_stealth_address(&keys.meta_address).unwrap();
        let metadata =
            build_announcement_metadata(payment.view_tag, &receipt(), 7, None).unwrap();
        Announcement::new(
            payment.stealth_address.to_hex_string(),
            payment.ephemeral_public_key.as_bytes().to_vec(),
            metadata,
            "0xfeed",
            block_number,
        )
    }

    #[test]
    fn test_scan_finds_own_payment() {
        let keys = root_keys();
        let announcements = vec![announcement_for(&keys, 100)];

        let payments = scan_announcements(
            &announcements,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();

        assert_eq!(payments.len(), 1);
        let payment = &payments[0];
        assert_eq!(
            payment.stealth_address.to_hex_string(),
            announcements[0].stealth_address
        );
        assert_eq!(payment.receipt_hash, receipt());
        assert_eq!(payment.port_index, 7);
        assert_eq!(payment.token, None);
        assert_eq!(payment.block_number, 100);
    }

    #[test]
    fn test_recovered_key_controls_address() {
        let keys = root_keys();
        let announcements = vec![announcement_for(&keys, 1)];
        let payments = scan_announcements(
            &announcements,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();

        let payment = &payments[0];
        let public = shroud_crypto::public_key_for(&shroud_crypto::scalar_from_secret(
            &payment.stealth_private_key,
        ))
        .unwrap();
        let point = shroud_crypto::decompress(&public).unwrap();
        assert_eq!(
            shroud_crypto::eth_address(&point).unwrap(),
            payment.stealth_address
        );
    }

    #[test]
    fn test_unrelated_keys_find_nothing() {
        let keys = root_keys();
        let other = derive_port_keys(TEST_SIGNATURE, 0, ChainPrefix::Mnt).unwrap();
        let announcements = vec![announcement_for(&keys, 1)];

        let payments = scan_announcements(
            &announcements,
            other.spending.secret.as_bytes(),
            other.viewing.secret.as_bytes(),
        )
        .unwrap();

        assert!(payments.is_empty());
    }

    #[test]
    fn test_invalid_item_does_not_poison_batch() {
        let keys = root_keys();

        let mut broken = announcement_for(&keys, 2);
        broken.ephemeral_pub_key = vec![0x02; 10];

        let mut off_curve = announcement_for(&keys, 3);
        off_curve.ephemeral_pub_key = vec![0xFF; 33];

        let announcements = vec![
            broken,
            announcement_for(&keys, 4),
            off_curve,
            announcement_for(&keys, 5),
        ];

        let payments = scan_announcements(
            &announcements,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();

        assert_eq!(payments.len(), 2);
    }

    #[test]
    fn test_view_tag_mismatch_is_filtered() {
        let keys = root_keys();
        let mut announcement = announcement_for(&keys, 1);
        announcement.metadata[0] = announcement.metadata[0].wrapping_add(1);

        let result = check_announcement(
            &announcement,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_wrong_address_with_matching_tag_is_collision() {
        let keys = root_keys();
        let mut announcement = announcement_for(&keys, 1);
        // Tag still matches, but the announced address belongs to nobody.
        announcement.stealth_address =
            "0x000000000000000000000000000000000000dead".to_string();

        let result = check_announcement(
            &announcement,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_truncated_metadata_is_no_match() {
        let keys = root_keys();
        let mut announcement = announcement_for(&keys, 1);
        // Keep only the (correct) view-tag byte.
        announcement.metadata.truncate(1);

        let result = check_announcement(
            &announcement,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_address_comparison_is_case_insensitive() {
        let keys = root_keys();
        let mut announcement = announcement_for(&keys, 1);
        announcement.stealth_address = announcement.stealth_address.to_uppercase();
        // `0X` prefix is not valid hex input; restore a lowercase prefix.
        announcement.stealth_address =
            format!("0x{}", &announcement.stealth_address[2..]);

        let result = check_announcement(
            &announcement,
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
        )
        .unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_bad_keys_fail_fast() {
        let keys = root_keys();
        let announcements = vec![announcement_for(&keys, 1)];

        let err = scan_announcements(&announcements, &[0u8; 31], keys.viewing.secret.as_bytes())
            .unwrap_err();
        assert!(err.is_format());

        let err = scan_announcements(&announcements, keys.spending.secret.as_bytes(), &[0u8; 33])
            .unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_scanner_stats() {
        let keys = root_keys();
        let other = derive_port_keys(TEST_SIGNATURE, 1, ChainPrefix::Mnt).unwrap();

        let mut announcements = vec![announcement_for(&keys, 1)];
        for _ in 0..5 {
            announcements.push(announcement_for(&other, 2));
        }

        let scanner =
            Scanner::new(keys.spending.secret.as_bytes(), keys.viewing.secret.as_bytes()).unwrap();
        let payments = scanner.scan(&announcements);

        assert_eq!(payments.len(), 1);
        let stats = scanner.stats();
        assert_eq!(stats.total_scanned, 6);
        assert_eq!(stats.discoveries, 1);
        assert!(stats.view_tag_matches >= 1);

        scanner.reset_stats();
        assert_eq!(scanner.stats().total_scanned, 0);
    }

    #[test]
    fn test_block_range_filter() {
        let keys = root_keys();
        let announcements = vec![
            announcement_for(&keys, 10),
            announcement_for(&keys, 20),
            announcement_for(&keys, 30),
        ];

        let scanner = Scanner::with_config(
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
            ScannerConfig::new().block_range(15, 25),
        )
        .unwrap();

        let payments = scanner.scan(&announcements);
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].block_number, 20);
    }

    #[test]
    fn test_stop_on_first() {
        let keys = root_keys();
        let announcements = vec![announcement_for(&keys, 1), announcement_for(&keys, 2)];

        let scanner = Scanner::with_config(
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
            ScannerConfig::new().stop_on_first(),
        )
        .unwrap();

        assert_eq!(scanner.scan(&announcements).len(), 1);
    }

    #[test]
    fn test_scanner_from_wallet() {
        let wallet = StealthWallet::from_signature(TEST_SIGNATURE, ChainPrefix::Mnt).unwrap();
        let keys = root_keys();
        let announcements = vec![announcement_for(&keys, 1)];

        let scanner = Scanner::from_wallet(&wallet);
        assert_eq!(scanner.scan(&announcements).len(), 1);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ASYNC SOURCE SCANNING
    // ═══════════════════════════════════════════════════════════════════════

    struct MemorySource {
        announcements: Vec<Announcement>,
    }

    #[async_trait]
    impl AnnouncementSource for MemorySource {
        async fn fetch_page(
            &self,
            _chain_id: u64,
            offset: u64,
            limit: usize,
        ) -> Result<Vec<Announcement>> {
            let start = (offset as usize).min(self.announcements.len());
            let end = (start + limit).min(self.announcements.len());
            Ok(self.announcements[start..end].to_vec())
        }

        async fn count(&self, _chain_id: u64) -> Result<u64> {
            Ok(self.announcements.len() as u64)
        }
    }

    #[tokio::test]
    async fn test_scan_source_pages_through_everything() {
        let keys = root_keys();
        let other = derive_port_keys(TEST_SIGNATURE, 2, ChainPrefix::Mnt).unwrap();

        let mut announcements = Vec::new();
        for i in 0..7 {
            announcements.push(announcement_for(&other, i));
        }
        announcements.push(announcement_for(&keys, 99));

        let source = MemorySource { announcements };
        let scanner = Scanner::with_config(
            keys.spending.secret.as_bytes(),
            keys.viewing.secret.as_bytes(),
            ScannerConfig::new().batch_size(3),
        )
        .unwrap();

        let payments = scanner.scan_source(&source, 5000).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].block_number, 99);
        assert_eq!(scanner.stats().total_scanned, 8);
    }

    #[tokio::test]
    async fn test_scan_source_empty() {
        let keys = root_keys();
        let source = MemorySource {
            announcements: Vec::new(),
        };
        let scanner =
            Scanner::new(keys.spending.secret.as_bytes(), keys.viewing.secret.as_bytes()).unwrap();

        let payments = scanner.scan_source(&source, 5000).await.unwrap();
        assert!(payments.is_empty());
    }
}
