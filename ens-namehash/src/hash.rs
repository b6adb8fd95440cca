//! Keccak-256, the hash underlying every ENS identifier.

use alloy::primitives::B256;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of `input`.
///
/// Note: Keccak256 is NOT SHA3-256. They use different padding.
pub fn keccak256(input: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak256::new();
    Digest::update(&mut hasher, input.as_ref());
    let digest: [u8; 32] = hasher.finalize().into();
    B256::from(digest)
}

/// Hashes the concatenation of two 32-byte values.
pub(crate) fn keccak256_pair(left: &B256, right: &B256) -> B256 {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left.as_slice());
    combined[32..].copy_from_slice(right.as_slice());
    keccak256(combined)
}
