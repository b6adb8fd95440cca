//! Registry facade: owner, resolver and TTL records keyed by name.

use std::sync::Arc;

use alloy::primitives::{Address, B256};
use tracing::{debug, instrument};

use ens_core::error::Result;
use ens_core::traits::ContractCaller;
use ens_core::types::Node;
use ens_namehash::{namehash, parent_and_label_hash};

use crate::contracts::{self, registry};

/// Typed access to the ENS registry contract.
///
/// Every by-name method hashes the name fresh; nothing is cached.
#[derive(Clone)]
pub struct Registry {
    caller: Arc<dyn ContractCaller>,
    address: Address,
}

impl Registry {
    /// Binds the registry deployed at `address`.
    pub fn new(caller: Arc<dyn ContractCaller>, address: Address) -> Self {
        Self { caller, address }
    }

    /// Address of the registry contract.
    pub fn address(&self) -> Address {
        self.address
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // READS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Owner of `name`, or the zero address when unowned.
    #[instrument(skip(self))]
    pub async fn owner(&self, name: &str) -> Result<Address> {
        self.owner_of(namehash(name)?).await
    }

    /// Resolver of `name`, or the zero address when none is set.
    #[instrument(skip(self))]
    pub async fn resolver(&self, name: &str) -> Result<Address> {
        self.resolver_of(namehash(name)?).await
    }

    /// Caching TTL of `name` in seconds.
    #[instrument(skip(self))]
    pub async fn ttl(&self, name: &str) -> Result<u64> {
        let node = namehash(name)?;
        let ret = contracts::read(&*self.caller, self.address, registry::ttlCall { node }).await?;
        Ok(ret._0)
    }

    pub(crate) async fn owner_of(&self, node: Node) -> Result<Address> {
        let ret = contracts::read(&*self.caller, self.address, registry::ownerCall { node }).await?;
        Ok(ret._0)
    }

    pub(crate) async fn resolver_of(&self, node: Node) -> Result<Address> {
        let ret =
            contracts::read(&*self.caller, self.address, registry::resolverCall { node }).await?;
        debug!(%node, resolver = %ret._0, "Registry resolver lookup");
        Ok(ret._0)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // WRITES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Transfers ownership of `name`.
    #[instrument(skip(self))]
    pub async fn set_owner(&self, name: &str, owner: Address) -> Result<B256> {
        let node = namehash(name)?;
        contracts::write(&*self.caller, self.address, registry::setOwnerCall { node, owner }).await
    }

    /// Points `name` at a resolver contract.
    #[instrument(skip(self))]
    pub async fn set_resolver(&self, name: &str, resolver: Address) -> Result<B256> {
        let node = namehash(name)?;
        contracts::write(
            &*self.caller,
            self.address,
            registry::setResolverCall { node, resolver },
        )
        .await
    }

    /// Assigns `name` to `owner`, as issued by the owner of its parent.
    #[instrument(skip(self))]
    pub async fn set_subnode_owner(&self, name: &str, owner: Address) -> Result<B256> {
        let (label, node) = parent_and_label_hash(name)?;
        self.set_subnode_owner_of(node, label, owner).await
    }

    /// Sets owner, resolver and TTL of `name` in one call on its parent.
    #[instrument(skip(self))]
    pub async fn set_subnode_record(
        &self,
        name: &str,
        owner: Address,
        resolver: Address,
        ttl: u64,
    ) -> Result<B256> {
        let (label, node) = parent_and_label_hash(name)?;
        self.set_subnode_record_of(node, label, owner, resolver, ttl).await
    }

    pub(crate) async fn set_subnode_owner_of(
        &self,
        node: Node,
        label: B256,
        owner: Address,
    ) -> Result<B256> {
        contracts::write(
            &*self.caller,
            self.address,
            registry::setSubnodeOwnerCall { node, label, owner },
        )
        .await
    }

    pub(crate) async fn set_subnode_record_of(
        &self,
        node: Node,
        label: B256,
        owner: Address,
        resolver: Address,
        ttl: u64,
    ) -> Result<B256> {
        contracts::write(
            &*self.caller,
            self.address,
            registry::setSubnodeRecordCall {
                node,
                label,
                owner,
                resolver,
                ttl,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChain;
    use alloy::sol_types::SolCall;
    use ens_core::EnsError;
    use ens_namehash::label_hash;

    #[tokio::test]
    async fn test_owner_and_resolver_by_name() {
        let chain = FakeChain::new();
        let owner = Address::repeat_byte(0x0a);
        let resolver = Address::repeat_byte(0x0b);
        chain.set_owner("foo.eth", owner);
        chain.set_resolver("foo.eth", resolver);

        let registry = chain.registry();
        assert_eq!(registry.owner("foo.eth").await.unwrap(), owner);
        assert_eq!(registry.owner("FOO.eth").await.unwrap(), owner);
        assert_eq!(registry.resolver("foo.eth").await.unwrap(), resolver);
        assert_eq!(registry.owner("bar.eth").await.unwrap(), Address::ZERO);
    }

    #[tokio::test]
    async fn test_ttl() {
        let chain = FakeChain::new();
        chain.set_ttl("foo.eth", 3600);
        assert_eq!(chain.registry().ttl("foo.eth").await.unwrap(), 3600);
    }

    #[tokio::test]
    async fn test_invalid_name_issues_no_call() {
        let chain = FakeChain::new();
        let err = chain.registry().owner("a..eth").await.unwrap_err();
        assert!(matches!(err, EnsError::InvalidName { .. }));
        assert_eq!(chain.call_count(), 0);
    }

    #[tokio::test]
    async fn test_set_subnode_owner_splits_name() {
        let chain = FakeChain::new();
        let owner = Address::repeat_byte(0x0c);
        chain.registry().set_subnode_owner("sub.foo.eth", owner).await.unwrap();

        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        let call = registry::setSubnodeOwnerCall::abi_decode(&sent[0].1, true).unwrap();
        assert_eq!(call.node, namehash("foo.eth").unwrap());
        assert_eq!(call.label, label_hash("sub").unwrap());
        assert_eq!(call.owner, owner);
    }

    #[tokio::test]
    async fn test_set_subnode_owner_rejects_empty_label() {
        let chain = FakeChain::new();
        let err = chain
            .registry()
            .set_subnode_owner(".eth", Address::ZERO)
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(chain.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let chain = FakeChain::new();
        chain.fail_calls();
        let err = chain.registry().resolver("foo.eth").await.unwrap_err();
        assert!(err.is_external());
    }
}
