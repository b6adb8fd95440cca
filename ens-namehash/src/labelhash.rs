//! Label hashes and the encoded `[hex]` placeholder syntax.
//!
//! A label whose plaintext is unknown (only its hash was revealed on-chain)
//! is written as its 64 lowercase hex digits between square brackets:
//!
//! ```text
//! [4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0]
//! ```
//!
//! [`label_hash`] accepts either form, so callers can mix readable labels
//! and revealed hashes in one name.

use alloy::primitives::B256;

use ens_core::constants::ENCODED_LABEL_HASH_LEN;
use ens_core::error::{EnsError, Result};
use ens_core::types::{to_hex_string, LabelHash};

use crate::hash::keccak256;
use crate::normalize::normalize;

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Returns true if `label` is an encoded label hash: `[` + 64 lowercase hex + `]`.
pub fn is_encoded_label_hash(label: &str) -> bool {
    label.len() == ENCODED_LABEL_HASH_LEN
        && label.starts_with('[')
        && label.ends_with(']')
        && is_lower_hex(&label[1..ENCODED_LABEL_HASH_LEN - 1])
}

/// Strips the brackets of an encoded label hash and returns its bytes.
///
/// # Errors
///
/// Returns [`EnsError::Format`] if the bracket, length, or hex invariant
/// does not hold.
pub fn decode_encoded_label_hash(label: &str) -> Result<LabelHash> {
    if !(label.starts_with('[') && label.ends_with(']')) {
        return Err(EnsError::Format(
            "Expected encoded labelhash to start and end with square brackets".into(),
        ));
    }
    if label.len() != ENCODED_LABEL_HASH_LEN {
        return Err(EnsError::Format(format!(
            "Expected encoded labelhash to have a length of {}, got {}",
            ENCODED_LABEL_HASH_LEN,
            label.len()
        )));
    }

    let inner = &label[1..ENCODED_LABEL_HASH_LEN - 1];
    if !is_lower_hex(inner) {
        return Err(EnsError::Format(
            "Expected encoded labelhash to contain lowercase hex".into(),
        ));
    }

    let bytes = hex::decode(inner)?;
    Ok(B256::from_slice(&bytes))
}

/// Wraps a `0x`-prefixed 32-byte hex hash into the `[hex]` syntax.
///
/// # Errors
///
/// Returns [`EnsError::Format`] if `hash` is not `0x`-prefixed, not 66
/// characters long, or not hex.
pub fn encode_label_hash(hash: &str) -> Result<String> {
    let digits = hash
        .strip_prefix("0x")
        .ok_or_else(|| EnsError::Format("Expected label hash to start with 0x".into()))?;

    if hash.len() != ENCODED_LABEL_HASH_LEN {
        return Err(EnsError::Format(format!(
            "Expected label hash to have a length of {}, got {}",
            ENCODED_LABEL_HASH_LEN,
            hash.len()
        )));
    }

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EnsError::Format("Expected label hash to be hex".into()));
    }

    Ok(format!("[{}]", digits.to_ascii_lowercase()))
}

/// Hashes one label.
///
/// An encoded label hash is returned as-is; any other label is normalized
/// and hashed with keccak-256.
///
/// # Errors
///
/// Returns [`EnsError::InvalidName`] for an empty label, a label that fails
/// normalization, or one that normalizes into several labels (e.g. a
/// full-width dot).
pub fn label_hash(label: &str) -> Result<LabelHash> {
    if is_encoded_label_hash(label) {
        return decode_encoded_label_hash(label);
    }
    if label.is_empty() {
        return Err(EnsError::invalid_name(label, "labels cannot be empty"));
    }

    let normalized = normalize(label)?;
    if normalized.contains('.') {
        return Err(EnsError::invalid_name(label, "label normalizes to more than one label"));
    }
    Ok(keccak256(normalized.as_bytes()))
}

/// [`label_hash`] as `0x`-prefixed lowercase hex.
pub fn label_hash_hex(label: &str) -> Result<String> {
    label_hash(label).map(|hash| to_hex_string(&hash))
}

/// Returns true if no label of the dotted `name` is an encoded label hash.
pub fn is_fully_decrypted(name: &str) -> bool {
    !name.split('.').any(is_encoded_label_hash)
}
