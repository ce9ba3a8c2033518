//! Curve-point helpers: SEC1 codec, ECDH, Ethereum-style addressing.
//!
//! Everything that touches point encodings lives here, so the generator,
//! the view-tag shortcut, and recovery all share the same byte conventions
//! and cannot drift apart.

use k256::elliptic_curve::group::GroupEncoding;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, ProjectivePoint, Scalar};

use shroud_core::constants::{ETH_ADDRESS_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE};
use shroud_core::{CompressedPublicKey, EthAddress, Result, ShroudError};

use crate::hash::keccak256;

/// Decompresses a 33-byte SEC1 public key into a curve point.
///
/// # Errors
/// `InvalidPoint` when the bytes are not a valid compressed point on
/// secp256k1 (bad tag byte, x not on the curve).
pub fn decompress(key: &CompressedPublicKey) -> Result<ProjectivePoint> {
    let affine: Option<AffinePoint> = AffinePoint::from_bytes(key.as_bytes().into()).into();
    affine
        .map(ProjectivePoint::from)
        .ok_or_else(|| ShroudError::InvalidPoint("not a point on secp256k1".into()))
}

/// Compresses a curve point to its 33-byte SEC1 encoding.
///
/// # Errors
/// `InvalidPoint` for the point at infinity, which has no compressed form.
pub fn compress(point: &ProjectivePoint) -> Result<CompressedPublicKey> {
    let encoded = point.to_affine().to_encoded_point(true);
    CompressedPublicKey::from_bytes(encoded.as_bytes())
        .map_err(|_| ShroudError::InvalidPoint("point at infinity".into()))
}

/// Returns the compressed public key for a private scalar (`scalar · G`).
pub fn public_key_for(scalar: &Scalar) -> Result<CompressedPublicKey> {
    compress(&(ProjectivePoint::GENERATOR * scalar))
}

/// Hashes an ECDH shared point into the 32-byte shared secret.
///
/// The secret is `keccak256` over the point's x-coordinate: the uncompressed
/// SEC1 encoding with the prefix byte dropped, truncated to the first 32
/// bytes. Byte 0 of the result is the view tag.
pub fn shared_secret_hash(point: &ProjectivePoint) -> Result<[u8; 32]> {
    let encoded = point.to_affine().to_encoded_point(false);
    let bytes = encoded.as_bytes();
    if bytes.len() != UNCOMPRESSED_POINT_SIZE {
        return Err(ShroudError::InvalidPoint("point at infinity".into()));
    }
    Ok(keccak256(&bytes[1..1 + SCALAR_SIZE]))
}

/// Derives the Ethereum-style address of a curve point: the last 20 bytes of
/// `keccak256` over the uncompressed encoding with the prefix byte dropped.
pub fn eth_address(point: &ProjectivePoint) -> Result<EthAddress> {
    let encoded = point.to_affine().to_encoded_point(false);
    let bytes = encoded.as_bytes();
    if bytes.len() != UNCOMPRESSED_POINT_SIZE {
        return Err(ShroudError::InvalidPoint("point at infinity".into()));
    }

    let hash = keccak256(&bytes[1..]);
    EthAddress::from_bytes(&hash[hash.len() - ETH_ADDRESS_SIZE..])
}
