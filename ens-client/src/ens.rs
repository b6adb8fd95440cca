//! Entry point binding a contract caller to an ENS registry.

use std::sync::Arc;

use alloy::primitives::{Address, B256};
use tracing::{debug, info, instrument};

use ens_core::constants::{registry_address_for_chain, REVERSE_SUFFIX};
use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;
use ens_namehash::{namehash, reverse_name};

use crate::config::EnsConfig;
use crate::contracts::{self, reverse_registrar};
use crate::name::Name;
use crate::registry::Registry;
use crate::resolver::ResolverBinding;
use crate::rpc::HttpCaller;

/// ENS client.
#[derive(Clone)]
pub struct Ens {
    caller: Arc<dyn ContractCaller>,
    registry: Registry,
}

impl std::fmt::Debug for Ens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ens")
            .field("registry", &self.registry.address())
            .finish()
    }
}

impl Ens {
    /// Creates a client over `caller` for the registry at `registry`.
    pub fn new(caller: Arc<dyn ContractCaller>, registry: Address) -> Self {
        Self {
            registry: Registry::new(caller.clone(), registry),
            caller,
        }
    }

    /// Creates a client for the well-known registry of `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::Config`] for a chain without a known deployment.
    pub fn for_chain(caller: Arc<dyn ContractCaller>, chain_id: u64) -> Result<Self> {
        let registry = registry_address_for_chain(chain_id).ok_or_else(|| {
            EnsError::Config(format!("no ENS registry known for chain {}", chain_id))
        })?;
        Ok(Self::new(caller, registry))
    }

    /// Creates a JSON-RPC backed client from configuration.
    pub fn with_config(config: &EnsConfig) -> Result<Self> {
        let registry = config.registry()?;
        let caller = HttpCaller::new(config)?;
        info!(rpc = %caller.rpc_url(), chain_id = config.chain_id, %registry, "ENS client ready");
        Ok(Self::new(Arc::new(caller), registry))
    }

    /// The registry facade.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A handle on `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::InvalidName`] for a malformed name.
    pub fn name(&self, name: &str) -> Result<Name> {
        Name::new(self.caller.clone(), self.registry.clone(), name, None)
    }

    /// Binds `name` to the resolver the registry holds for it.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::NameNotFound`] if the registry has no resolver for
    /// the name.
    #[instrument(skip(self))]
    pub async fn resolver(&self, name: &str) -> Result<ResolverBinding> {
        self.name(name)?.resolver().await
    }

    /// Names bound to a caller-chosen resolver contract.
    pub fn resolver_at(&self, address: Address) -> FixedResolver<'_> {
        FixedResolver { ens: self, address }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REVERSE RESOLUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Binds the reverse record of `address` to its resolver.
    #[instrument(skip(self))]
    pub async fn reverse(&self, address: Address) -> Result<ResolverBinding> {
        self.resolver(&reverse_name(&address)).await
    }

    /// The primary name of `address`; `None` when no reverse record is set.
    #[instrument(skip(self))]
    pub async fn get_name(&self, address: Address) -> Result<Option<String>> {
        let binding = match self.reverse(address).await {
            Ok(binding) => binding,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        let name = binding.name_record().await?;
        debug!(%address, name = %name, "Reverse lookup");
        Ok(Some(name).filter(|n| !n.is_empty()))
    }

    /// Claims `name` as the primary name of the sending account through the
    /// reverse registrar.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::NameNotFound`] if `addr.reverse` has no owner.
    #[instrument(skip(self))]
    pub async fn set_reverse_record(&self, name: &str) -> Result<B256> {
        let registrar = self.registry.owner_of(namehash(REVERSE_SUFFIX)?).await?;
        if registrar == Address::ZERO {
            return Err(EnsError::NameNotFound(REVERSE_SUFFIX.to_string()));
        }
        debug!(%registrar, "Reverse registrar");
        let call = reverse_registrar::setNameCall {
            name: name.to_string(),
        };
        contracts::write(&*self.caller, registrar, call).await
    }
}

/// A resolver contract chosen by the caller rather than the registry.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver<'a> {
    ens: &'a Ens,
    address: Address,
}

impl FixedResolver<'_> {
    /// A handle on `name` whose records are read from this resolver.
    pub fn name(&self, name: &str) -> Result<Name> {
        Name::new(
            self.ens.caller.clone(),
            self.ens.registry.clone(),
            name,
            Some(self.address),
        )
    }
}
