//! The EIP-137 namehash.
//!
//! ```text
//! namehash("")           = 0x00..00
//! namehash(label.parent) = keccak256(namehash(parent) || labelhash(label))
//! ```
//!
//! Labels are folded from the last (the top-level domain) to the first, so
//! each parent's node seeds its children exactly as the registry builds them.

use ens_core::error::{EnsError, Result};
use ens_core::types::{to_hex_string, LabelHash, Node, ROOT_NODE};

use crate::hash::keccak256_pair;
use crate::labelhash::label_hash;

/// Computes the node of a dotted name.
///
/// The empty name is the root and hashes to 32 zero bytes.
///
/// # Errors
///
/// Returns [`EnsError::InvalidName`] if any label is empty (`"a..eth"`,
/// `".eth"`, `"eth."`) or fails normalization, and [`EnsError::Format`] for a
/// malformed encoded label hash.
pub fn namehash(name: &str) -> Result<Node> {
    if name.is_empty() {
        return Ok(ROOT_NODE);
    }
    if name.split('.').any(str::is_empty) {
        return Err(EnsError::invalid_name(name, "Domain cannot have empty labels"));
    }

    name.rsplit('.')
        .try_fold(ROOT_NODE, |node, label| Ok(keccak256_pair(&node, &label_hash(label)?)))
}

/// [`namehash`] as `0x`-prefixed lowercase hex.
pub fn namehash_hex(name: &str) -> Result<String> {
    namehash(name).map(|node| to_hex_string(&node))
}

/// Splits a name into the hash of its first label and the node of its parent.
///
/// `setSubnodeOwner` takes these separately rather than the combined node.
/// A single-label name has the root as its parent.
pub fn parent_and_label_hash(name: &str) -> Result<(LabelHash, Node)> {
    let (label, parent) = name.split_once('.').unwrap_or((name, ""));
    if name.split('.').any(str::is_empty) {
        return Err(EnsError::invalid_name(name, "Domain cannot have empty labels"));
    }
    Ok((label_hash(label)?, namehash(parent)?))
}
