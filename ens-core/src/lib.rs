//! # ENS Core
//!
//! Core types, errors, and traits shared by the ENS client crates.
//!
//! - **Types**: Node and label hash identifiers, content hash and ABI records
//! - **Errors**: The error taxonomy every crate reports through
//! - **Constants**: Registry deployments, multicodecs, ABI content types
//! - **Traits**: The contract-call capability consumed from the environment
//!
//! ## Example
//!
//! ```rust
//! use ens_core::{registry_address_for_chain, ENS_REGISTRY_ADDRESS};
//!
//! assert_eq!(registry_address_for_chain(1), Some(ENS_REGISTRY_ADDRESS));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{EnsError, Result};
pub use traits::*;
pub use types::*;
