//! Resolver facade: the records of one node on one resolver contract.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, FixedBytes, B256, U256};
use alloy::sol_types::SolCall;
use tracing::{debug, instrument, warn};

use ens_core::constants::{ABI_CONTENT_NONE, COIN_TYPE_ETH, SUPPORTED_ABI_CONTENT_TYPES};
use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;
use ens_core::types::{AbiRecord, ContentRecord, DecodedContentHash, Node};
use ens_content::{decode_abi_record, decode_content_hash, encode_content_hash};
use ens_namehash::{namehash, reverse_name};

use crate::contracts::{self, multicoin, resolver};
use crate::registry::Registry;

/// A node bound to the resolver contract that holds its records.
///
/// Built per lookup and never cached: the resolver address is whatever the
/// registry (or the caller) said at construction time.
#[derive(Clone)]
pub struct ResolverBinding {
    caller: Arc<dyn ContractCaller>,
    registry: Registry,
    name: String,
    node: Node,
    address: Address,
}

impl std::fmt::Debug for ResolverBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverBinding")
            .field("name", &self.name)
            .field("node", &self.node)
            .field("address", &self.address)
            .finish()
    }
}

impl ResolverBinding {
    pub(crate) fn new(
        caller: Arc<dyn ContractCaller>,
        registry: Registry,
        name: impl Into<String>,
        node: Node,
        address: Address,
    ) -> Self {
        Self {
            caller,
            registry,
            name: name.into(),
            node,
            address,
        }
    }

    /// The name this binding was created for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node of the name.
    pub fn node(&self) -> Node {
        self.node
    }

    /// Address of the resolver contract.
    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<C: SolCall + Send>(&self, call: C) -> Result<C::Return> {
        contracts::read(&*self.caller, self.address, call).await
    }

    async fn write<C: SolCall + Send>(&self, call: C) -> Result<B256> {
        contracts::write(&*self.caller, self.address, call).await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ADDRESSES
    // ═══════════════════════════════════════════════════════════════════════════

    /// The Ethereum address record.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn addr(&self) -> Result<Address> {
        Ok(self.read(resolver::addrCall { node: self.node }).await?._0)
    }

    /// The raw address record for a SLIP-44 coin type.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn addr_for_coin(&self, coin_type: u64) -> Result<Bytes> {
        let call = multicoin::addrCall {
            node: self.node,
            coinType: U256::from(coin_type),
        };
        Ok(self.read(call).await?._0)
    }

    /// Sets the Ethereum address record.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn set_addr(&self, addr: Address) -> Result<B256> {
        self.write(resolver::setAddrCall { node: self.node, a: addr }).await
    }

    /// Sets the raw address record for a SLIP-44 coin type.
    #[instrument(skip(self, addr), fields(node = %self.node))]
    pub async fn set_addr_for_coin(&self, coin_type: u64, addr: Bytes) -> Result<B256> {
        let call = multicoin::setAddrCall {
            node: self.node,
            coinType: U256::from(coin_type),
            a: addr,
        };
        self.write(call).await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONTENT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns true if the resolver implements the given interface id.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn supports_interface(&self, interface_id: FixedBytes<4>) -> Result<bool> {
        let call = resolver::supportsInterfaceCall {
            interfaceID: interface_id,
        };
        Ok(self.read(call).await?._0)
    }

    /// The content record, read through `contenthash` when the resolver
    /// supports it and through the legacy `content` otherwise.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn content(&self) -> Result<ContentRecord> {
        let supports_contenthash = self
            .supports_interface(FixedBytes(resolver::contenthashCall::SELECTOR))
            .await?;

        if !supports_contenthash {
            debug!("Resolver predates EIP-1577, reading legacy content");
            let legacy = self.read(resolver::contentCall { node: self.node }).await?._0;
            return Ok(ContentRecord::Legacy(legacy));
        }

        let raw = self.read(resolver::contenthashCall { node: self.node }).await?._0;
        if raw.is_empty() {
            return Ok(ContentRecord::Empty);
        }

        let decoded = decode_content_hash(&raw);
        Ok(match decoded.to_uri() {
            Some(uri) => ContentRecord::Contenthash(uri),
            None => {
                let reason = decoded
                    .error
                    .or(decoded.payload)
                    .unwrap_or_else(|| "unrecognized content hash".into());
                warn!(error = %reason, "Undecodable content hash");
                ContentRecord::Undecodable(reason)
            }
        })
    }

    /// The decoded `contenthash` record.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn contenthash(&self) -> Result<DecodedContentHash> {
        let raw = self.read(resolver::contenthashCall { node: self.node }).await?._0;
        Ok(decode_content_hash(&raw))
    }

    /// Encodes a content URI and stores it as the `contenthash` record.
    ///
    /// `0x` or an all-zero hex string clears the record.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::Format`] before issuing any call if the URI cannot
    /// be encoded.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn set_contenthash(&self, uri: &str) -> Result<B256> {
        let hash = if is_zero_hex(uri) {
            Bytes::new()
        } else {
            encode_content_hash(uri)
                .map(Bytes::from)
                .ok_or_else(|| EnsError::Format(format!("cannot encode content hash '{}'", uri)))?
        };
        self.write(resolver::setContenthashCall {
            node: self.node,
            hash,
        })
        .await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TEXT & NAME
    // ═══════════════════════════════════════════════════════════════════════════

    /// A text record; empty when unset.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn text(&self, key: &str) -> Result<String> {
        let call = resolver::textCall {
            node: self.node,
            key: key.to_string(),
        };
        Ok(self.read(call).await?._0)
    }

    /// Sets a text record.
    #[instrument(skip(self, value), fields(node = %self.node))]
    pub async fn set_text(&self, key: &str, value: &str) -> Result<B256> {
        self.write(resolver::setTextCall {
            node: self.node,
            key: key.to_string(),
            value: value.to_string(),
        })
        .await
    }

    /// The `name` record, set on reverse nodes.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn name_record(&self) -> Result<String> {
        Ok(self.read(resolver::nameCall { node: self.node }).await?._0)
    }

    /// Sets the `name` record.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn set_name_record(&self, name: &str) -> Result<B256> {
        self.write(resolver::setNameCall {
            node: self.node,
            name: name.to_string(),
        })
        .await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ABI
    // ═══════════════════════════════════════════════════════════════════════════

    async fn abi_at(&self, at: Address, node: Node) -> Result<(u64, Bytes)> {
        let call = resolver::ABICall {
            node,
            contentTypes: U256::from(SUPPORTED_ABI_CONTENT_TYPES),
        };
        let ret = contracts::read(&*self.caller, at, call).await?;
        Ok((u64::try_from(ret._0).unwrap_or(u64::MAX), ret._1))
    }

    /// The contract ABI published for this name.
    ///
    /// When the name holds no ABI, the lookup falls back once to the reverse
    /// record of the name's address and stops there.
    #[instrument(skip(self), fields(node = %self.node))]
    pub async fn abi(&self) -> Result<AbiRecord> {
        let (content_type, data) = self.abi_at(self.address, self.node).await?;
        if content_type != ABI_CONTENT_NONE {
            return Ok(decode_abi_record(content_type, &data, false));
        }

        let target = self.addr().await?;
        if target == Address::ZERO {
            debug!("No ABI and no address to fall back through");
            return Ok(AbiRecord::Absent);
        }

        let reverse = reverse_name(&target);
        let reverse_node = namehash(&reverse)?;
        let reverse_resolver = self.registry.resolver_of(reverse_node).await?;
        if reverse_resolver == Address::ZERO {
            debug!(%reverse, "Reverse record has no resolver");
            return Ok(AbiRecord::Absent);
        }

        debug!(%reverse, resolver = %reverse_resolver, "Falling back to reverse record ABI");
        let (content_type, data) = self.abi_at(reverse_resolver, reverse_node).await?;
        Ok(decode_abi_record(content_type, &data, true))
    }
}

fn is_zero_hex(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|digits| digits.bytes().all(|b| b == b'0'))
}

/// Formats a multi-coin address record for display.
///
/// A 20-byte ETH record becomes a checksummed address; anything else is
/// shown as `0x` hex.
pub fn format_coin_address(coin_type: u64, raw: &[u8]) -> String {
    if coin_type == COIN_TYPE_ETH && raw.len() == 20 {
        Address::from_slice(raw).to_checksum(None)
    } else {
        format!("0x{}", hex::encode(raw))
    }
}
