//! Byte ⇄ secp256k1 scalar conversion.
//!
//! Two conversion policies coexist:
//!
//! - [`scalar_from_bytes`] is total: bytes are read big-endian, reduced
//!   modulo the curve order n, and a reduced value of exactly zero maps to 1
//!   so the result is always a valid private scalar. Hash outputs and HKDF
//!   material go through this path.
//! - [`checked_scalar`] is strict: the caller-supplied value must already be
//!   in [1, n−1]. Ephemeral scalars handed to the deterministic generator go
//!   through this path, so degenerate inputs are rejected instead of mangled.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{NonZeroScalar, Scalar, U256};

use shroud_core::constants::SCALAR_SIZE;
use shroud_core::{Result, SecretScalar, ShroudError};

/// Interprets `bytes` as a big-endian integer reduced modulo the curve order.
///
/// A reduced value of zero maps to 1. The probability of hitting that case
/// with uniform input is cryptographically negligible, but the mapping keeps
/// the function total.
pub fn scalar_from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Scalar {
    let reduced = <Scalar as Reduce<U256>>::reduce_bytes(&(*bytes).into());
    if bool::from(reduced.is_zero()) {
        Scalar::ONE
    } else {
        reduced
    }
}

/// Converts a [`SecretScalar`] into a curve scalar via [`scalar_from_bytes`].
pub fn scalar_from_secret(secret: &SecretScalar) -> Scalar {
    scalar_from_bytes(secret.as_bytes())
}

/// Serializes a scalar as 32 big-endian bytes.
pub fn scalar_to_bytes(scalar: &Scalar) -> [u8; SCALAR_SIZE] {
    scalar.to_bytes().into()
}

/// Validates a caller-supplied scalar without reduction.
///
/// # Errors
/// `InvalidLength` unless `bytes` is exactly 32 bytes; `ScalarOutOfRange`
/// when the value is zero or not below the curve order.
pub fn checked_scalar(bytes: &[u8]) -> Result<NonZeroScalar> {
    if bytes.len() != SCALAR_SIZE {
        return Err(ShroudError::InvalidLength {
            field: "scalar",
            expected: SCALAR_SIZE,
            actual: bytes.len(),
        });
    }

    let mut arr = [0u8; SCALAR_SIZE];
    arr.copy_from_slice(bytes);

    let scalar = Option::<Scalar>::from(Scalar::from_repr(arr.into()))
        .ok_or_else(|| ShroudError::ScalarOutOfRange("value not below the curve order".into()))?;

    Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
        .ok_or_else(|| ShroudError::ScalarOutOfRange("zero scalar".into()))
}
