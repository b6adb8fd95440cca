//! # ENS Client
//!
//! Registry, resolver and reverse-registrar facades for the Ethereum Name
//! Service.
//!
//! Every network round trip goes through a [`ContractCaller`]. The bundled
//! [`HttpCaller`] speaks JSON-RPC; tests and embedders can supply their own.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ens_client::{Ens, EnsConfig};
//!
//! # async fn example() -> ens_core::Result<()> {
//! let ens = Ens::with_config(&EnsConfig::from_env()?)?;
//!
//! let name = ens.name("vitalik.eth")?;
//! println!("address: {}", name.address().await?);
//! println!("content: {:?}", name.content().await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod contracts;
pub mod ens;
pub mod name;
pub mod registry;
pub mod resolver;
pub mod rpc;

#[cfg(test)]
mod testing;

pub use config::EnsConfig;
pub use ens::{Ens, FixedResolver};
pub use ens_core::traits::ContractCaller;
pub use name::Name;
pub use registry::Registry;
pub use resolver::{format_coin_address, ResolverBinding};
pub use rpc::HttpCaller;
