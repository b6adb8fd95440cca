//! # ENS Name Hashing
//!
//! Deterministic identifiers for ENS names.
//!
//! This crate provides:
//!
//! - **Normalize**: UTS-46 mapping with STD3 ASCII rules, non-transitional
//! - **Label hash**: keccak-256 of a normalized label, or the bytes of an
//!   encoded `[hex]` label hash
//! - **Namehash**: the recursive EIP-137 node computation
//! - **Validate**: name validation and search-term classification
//!
//! ## Example
//!
//! ```rust
//! use ens_namehash::{namehash, namehash_hex};
//!
//! assert_eq!(namehash("").unwrap(), ens_core::ROOT_NODE);
//! assert_eq!(
//!     namehash_hex("eth").unwrap(),
//!     "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod hash;
pub mod labelhash;
pub mod namehash;
pub mod normalize;
pub mod validate;

// Re-export main functions at crate root
pub use hash::keccak256;
pub use labelhash::{
    decode_encoded_label_hash, encode_label_hash, is_encoded_label_hash, is_fully_decrypted,
    label_hash, label_hash_hex,
};
pub use namehash::{namehash, namehash_hex, parent_and_label_hash};
pub use normalize::normalize;
pub use validate::{check_restricted, is_label_valid, parse_search_term, reverse_name, validate_name, SearchTerm};
