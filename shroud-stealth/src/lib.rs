//! # Shroud Stealth Address Protocol
//!
//! High-level API for creating and recovering stealth addresses.
//!
//! This crate provides:
//!
//! - **Generation** (payer side): one-time address + ephemeral key + view tag
//! - **Recovery** (recipient side): the stealth private key for a payment
//! - **Metadata codec**: the canonical announcement-metadata wire layout
//! - **Wallet facade**: chain-scoped bundle of derivation and recovery
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shroud_core::ChainPrefix;
//! use shroud_stealth::{generate_stealth_address, StealthWallet};
//!
//! // Recipient: derive keys from a wallet signature, publish the meta-address
//! let wallet = StealthWallet::from_signature(&signature, ChainPrefix::Mnt)?;
//! let meta = wallet.meta_address();
//!
//! // Payer: one-time address for this payment
//! let payment = generate_stealth_address(meta)?;
//! // send funds to payment.stealth_address,
//! // publish payment.ephemeral_public_key + view tag on-chain
//!
//! // Recipient: recover the spending key
//! let recovered = wallet.recover_payment(payment.ephemeral_public_key.as_bytes())?;
//! assert_eq!(recovered.stealth_address, payment.stealth_address);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod metadata;
pub mod payment;
pub mod recovery;
pub mod wallet;

pub use metadata::{
    build_announcement_metadata, parse_announcement_metadata, AnnouncementMetadata,
};
pub use payment::{
    compute_view_tag, generate_stealth_address, generate_stealth_address_deterministic,
    StealthPaymentAddress,
};
pub use recovery::{derive_stealth_private_key, RecoveredStealthKey};
pub use wallet::StealthWallet;
