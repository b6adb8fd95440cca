//! Node and label hash identifiers.

use alloy::primitives::{Address, B256};

/// 32-byte namehash identifying a name in the registry.
pub type Node = B256;

/// 32-byte keccak-256 hash of a single normalized label.
pub type LabelHash = B256;

/// The root node: 32 zero bytes, the seed of every namehash.
pub const ROOT_NODE: Node = B256::ZERO;

/// The zero address returned by the registry for unset owners and resolvers.
pub const EMPTY_ADDRESS: Address = Address::ZERO;

/// Formats a 32-byte value as `0x`-prefixed lowercase hex.
pub fn to_hex_string(value: &B256) -> String {
    format!("0x{}", hex::encode(value.as_slice()))
}
