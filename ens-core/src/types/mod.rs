//! Domain types shared across the ENS client crates.

mod abi;
mod content;
mod node;

pub use abi::*;
pub use content::*;
pub use node::*;
