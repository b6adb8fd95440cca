//! A handle on one ENS name.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256};
use tracing::{debug, instrument};

use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;
use ens_core::types::{AbiRecord, ContentRecord, Node};
use ens_namehash::{label_hash, namehash, validate_name};

use crate::registry::Registry;
use crate::resolver::{format_coin_address, ResolverBinding};

/// One name and every operation keyed by it.
///
/// The node is computed once, at construction. Resolver addresses are looked
/// up on every call unless the handle was bound to a fixed resolver.
#[derive(Clone)]
pub struct Name {
    caller: Arc<dyn ContractCaller>,
    registry: Registry,
    name: String,
    node: Node,
    fixed_resolver: Option<Address>,
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Name")
            .field("name", &self.name)
            .field("node", &self.node)
            .field("fixed_resolver", &self.fixed_resolver)
            .finish()
    }
}

impl Name {
    pub(crate) fn new(
        caller: Arc<dyn ContractCaller>,
        registry: Registry,
        name: &str,
        fixed_resolver: Option<Address>,
    ) -> Result<Self> {
        let node = namehash(name)?;
        Ok(Self {
            caller,
            registry,
            name: name.to_string(),
            node,
            fixed_resolver,
        })
    }

    /// The name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node of the name.
    pub fn node(&self) -> Node {
        self.node
    }

    fn child_label(&self, label: &str) -> Result<B256> {
        if label.contains('.') {
            return Err(EnsError::invalid_name(label, "expected a single label"));
        }
        label_hash(label)
    }

    fn child_name(&self, label: &str) -> String {
        if self.name.is_empty() {
            label.to_string()
        } else {
            format!("{}.{}", label, self.name)
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Owner of the name, or the zero address.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn owner(&self) -> Result<Address> {
        self.registry.owner_of(self.node).await
    }

    /// Transfers ownership of the name.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn set_owner(&self, owner: Address) -> Result<B256> {
        self.registry.set_owner(&self.name, owner).await
    }

    /// Caching TTL of the name in seconds.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn ttl(&self) -> Result<u64> {
        self.registry.ttl(&self.name).await
    }

    /// The resolver address: the fixed one, else the registry's (possibly zero).
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn resolver_address(&self) -> Result<Address> {
        match self.fixed_resolver {
            Some(address) => Ok(address),
            None => self.registry.resolver_of(self.node).await,
        }
    }

    /// Points the name at a resolver contract.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn set_resolver(&self, resolver: Address) -> Result<B256> {
        self.registry.set_resolver(&self.name, resolver).await
    }

    /// Binds the name to its resolver.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::NameNotFound`] if the name has no resolver.
    pub async fn resolver(&self) -> Result<ResolverBinding> {
        let address = self.resolver_address().await?;
        if address == Address::ZERO {
            return Err(EnsError::NameNotFound(self.name.clone()));
        }
        debug!(name = %self.name, resolver = %address, "Bound resolver");
        Ok(ResolverBinding::new(
            self.caller.clone(),
            self.registry.clone(),
            self.name.clone(),
            self.node,
            address,
        ))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SUBDOMAINS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Assigns the subdomain `label` to `owner`.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn set_subnode_owner(&self, label: &str, owner: Address) -> Result<B256> {
        let label = self.child_label(label)?;
        self.registry.set_subnode_owner_of(self.node, label, owner).await
    }

    /// Sets owner, resolver and TTL of the subdomain `label` in one call.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn set_subnode_record(
        &self,
        label: &str,
        owner: Address,
        resolver: Address,
        ttl: u64,
    ) -> Result<B256> {
        let label = self.child_label(label)?;
        self.registry
            .set_subnode_record_of(self.node, label, owner, resolver, ttl)
            .await
    }

    /// Creates the subdomain `label`, owned by this name's owner and using
    /// this name's resolver.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn create_subdomain(&self, label: &str) -> Result<B256> {
        let hash = self.child_label(label)?;
        let (resolver, owner) = futures::try_join!(
            self.registry.resolver_of(self.node),
            self.registry.owner_of(self.node),
        )?;
        debug!(subdomain = %self.child_name(label), %owner, %resolver, "Creating subdomain");
        self.registry
            .set_subnode_record_of(self.node, hash, owner, resolver, 0)
            .await
    }

    /// Releases the subdomain `label`: zero owner and zero resolver.
    #[instrument(skip(self), fields(name = %self.name))]
    pub async fn delete_subdomain(&self, label: &str) -> Result<B256> {
        let hash = self.child_label(label)?;
        debug!(subdomain = %self.child_name(label), "Deleting subdomain");
        self.registry
            .set_subnode_record_of(self.node, hash, Address::ZERO, Address::ZERO, 0)
            .await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLVER RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The Ethereum address the name resolves to.
    pub async fn address(&self) -> Result<Address> {
        self.resolver().await?.addr().await
    }

    /// The address for a SLIP-44 coin type, formatted for display; `None`
    /// when unset.
    pub async fn address_for_coin(&self, coin_type: u64) -> Result<Option<String>> {
        let raw = self.resolver().await?.addr_for_coin(coin_type).await?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(format_coin_address(coin_type, &raw)))
    }

    /// Sets the Ethereum address record.
    pub async fn set_address(&self, addr: Address) -> Result<B256> {
        self.resolver().await?.set_addr(addr).await
    }

    /// Sets the raw address record for a SLIP-44 coin type.
    pub async fn set_address_for_coin(&self, coin_type: u64, addr: Bytes) -> Result<B256> {
        self.resolver().await?.set_addr_for_coin(coin_type, addr).await
    }

    /// The content record.
    pub async fn content(&self) -> Result<ContentRecord> {
        self.resolver().await?.content().await
    }

    /// Encodes a content URI and stores it as the content hash.
    pub async fn set_contenthash(&self, uri: &str) -> Result<B256> {
        self.resolver().await?.set_contenthash(uri).await
    }

    /// A text record; empty when unset.
    pub async fn text(&self, key: &str) -> Result<String> {
        self.resolver().await?.text(key).await
    }

    /// Sets a text record.
    pub async fn set_text(&self, key: &str, value: &str) -> Result<B256> {
        self.resolver().await?.set_text(key, value).await
    }

    /// The ABI published for the name, falling back once to the reverse
    /// record of its address.
    pub async fn abi(&self) -> Result<AbiRecord> {
        self.resolver().await?.abi().await
    }

    /// The name in normalized form.
    pub fn normalized(&self) -> Result<String> {
        validate_name(&self.name)
    }
}
