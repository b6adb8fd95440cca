//! The capability this client consumes from its environment.
//!
//! Everything that touches the network goes through [`ContractCaller`]:
//! "invoke function F of the contract at address A with calldata D".
//! Calldata is produced and return data consumed by the typed facades, so an
//! implementation only moves bytes.

use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;

use crate::error::Result;

/// Interface to an Ethereum node able to execute contract calls.
///
/// Implementations might use:
/// - JSON-RPC over HTTP (`eth_call` / `eth_sendTransaction`)
/// - An in-process EVM (for testing)
/// - A wallet that signs and broadcasts transactions
///
/// Failures are reported as [`crate::EnsError::ExternalCall`] and are never
/// retried by the facades.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Executes a read-only call and returns the raw ABI-encoded return data.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Submits a state-changing call and returns the transaction hash.
    ///
    /// Waiting for confirmation is left to the implementation's caller.
    async fn send(&self, to: Address, data: Bytes) -> Result<B256>;
}

#[async_trait]
impl<C: ContractCaller + ?Sized> ContractCaller for std::sync::Arc<C> {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        (**self).call(to, data).await
    }

    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        (**self).send(to, data).await
    }
}
