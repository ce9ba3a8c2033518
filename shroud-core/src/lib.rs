//! # Shroud Core
//!
//! Core types, errors, and traits for the Shroud stealth-address protocol.
//!
//! This crate provides the foundational building blocks used by all other Shroud crates:
//!
//! - **Types**: Domain models for keys, meta-addresses, announcements, and scanned payments
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Protocol constants, domain separators, and wire-layout sizes
//! - **Traits**: Interfaces implemented by out-of-scope collaborators (indexer, balance oracle)
//!
//! ## Example
//!
//! ```rust
//! use shroud_core::{ChainPrefix, StealthMetaAddress};
//!
//! let meta = StealthMetaAddress::parse(
//!     "st:mnt:0x\
//!      0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
//!      02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
//! ).unwrap();
//! assert_eq!(meta.chain, ChainPrefix::Mnt);
//! assert_eq!(meta.encode(), meta.to_string());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod bytes;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use bytes::{bytes_to_hex, hex_to_bytes};
pub use constants::*;
pub use error::{Result, ShroudError};
pub use traits::*;
pub use types::*;
