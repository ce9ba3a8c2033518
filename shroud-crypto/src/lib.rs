//! # Shroud Cryptography
//!
//! Cryptographic primitives for the Shroud stealth-address protocol.
//!
//! This crate provides:
//!
//! - **Hash**: keccak256 (Ethereum-style addressing and shared secrets)
//! - **Scalar**: big-endian byte ⇄ secp256k1 scalar conversion with reduction
//! - **Point**: compressed-point codec, ECDH, address derivation
//! - **KDF**: the HKDF-SHA256 derivation primitive behind every key tree
//! - **Derive**: wallet-signature → spending/viewing key sets
//!
//! ## Security Properties
//!
//! - Only audited RustCrypto implementations of secp256k1, keccak256, and
//!   HKDF-SHA256 are used; there is no hand-rolled curve arithmetic
//! - Every derivation is domain-separated; ports and fog wallets live in
//!   cryptographically isolated trees
//! - Secret scalars travel inside [`shroud_core::SecretScalar`] and are
//!   zeroized on drop
//!
//! ## Example
//!
//! ```rust,ignore
//! use shroud_core::ChainPrefix;
//! use shroud_crypto::derive_stealth_keys;
//!
//! let keys = derive_stealth_keys(&wallet_signature, ChainPrefix::Mnt)?;
//! println!("publish this: {}", keys.meta_address);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod derive;
pub mod hash;
pub mod kdf;
pub mod point;
pub mod scalar;

// Re-export main functions at crate root
pub use derive::{derive_fog_keys, derive_port_keys, derive_stealth_keys};
pub use hash::keccak256;
pub use kdf::{hkdf_scalar, index_salt};
pub use point::{compress, decompress, eth_address, public_key_for, shared_secret_hash};
pub use scalar::{checked_scalar, scalar_from_bytes, scalar_from_secret, scalar_to_bytes};
