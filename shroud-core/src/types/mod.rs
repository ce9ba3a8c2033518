//! Domain types for Shroud.
//!
//! - [`SecretScalar`] / [`CompressedPublicKey`]: key material wrappers
//! - [`StealthKeys`]: a derived spending + viewing key set with its meta-address
//! - [`StealthMetaAddress`]: the published receiving identifier
//! - [`Announcement`]: untrusted on-chain record consumed during scanning
//! - [`ScannedPayment`]: a confirmed, spendable payment (sensitive)

mod address;
mod announcement;
mod keys;

pub use address::*;
pub use announcement::*;
pub use keys::*;
