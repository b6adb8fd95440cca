//! Client configuration.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use ens_core::constants::registry_address_for_chain;
use ens_core::error::{EnsError, Result};

/// Default Ethereum RPC URL when none is provided.
const DEFAULT_ETH_RPC_URL: &str = "https://ethereum.publicnode.com";

/// ENS client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnsConfig {
    /// Ethereum RPC URL
    pub rpc_url: String,
    /// Chain the registry is looked up for
    pub chain_id: u64,
    /// Registry address overriding the well-known deployment table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_address: Option<Address>,
    /// Account state-changing calls are sent from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EnsConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_ETH_RPC_URL.into(),
            chain_id: 1,
            registry_address: None,
            from: None,
            timeout_seconds: 30,
        }
    }
}

impl EnsConfig {
    /// Creates a new configuration with the given RPC URL.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from the environment (and a `.env` file, if any).
    ///
    /// Reads `ENS_RPC_URL`, `ENS_CHAIN_ID`, `ENS_REGISTRY_ADDRESS` and
    /// `ENS_SENDER`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(rpc_url) = std::env::var("ENS_RPC_URL") {
            config.rpc_url = rpc_url;
        }
        if let Ok(chain_id) = std::env::var("ENS_CHAIN_ID") {
            config.chain_id = chain_id
                .trim()
                .parse()
                .map_err(|e| EnsError::Config(format!("ENS_CHAIN_ID: {}", e)))?;
        }
        if let Ok(registry) = std::env::var("ENS_REGISTRY_ADDRESS") {
            config.registry_address = Some(parse_address("ENS_REGISTRY_ADDRESS", &registry)?);
        }
        if let Ok(sender) = std::env::var("ENS_SENDER") {
            config.from = Some(parse_address("ENS_SENDER", &sender)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Uses an explicit registry address instead of the deployment table.
    pub fn with_registry(mut self, registry: Address) -> Self {
        self.registry_address = Some(registry);
        self
    }

    /// Sets the account state-changing calls are sent from.
    pub fn with_sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Checks that the RPC URL parses.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.rpc_url)
            .map_err(|e| EnsError::Config(format!("invalid RPC URL '{}': {}", self.rpc_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EnsError::Config(format!(
                "RPC URL must be http(s), got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// The registry address: the explicit override, else the well-known
    /// deployment for `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EnsError::Config`] for a chain with no known deployment and
    /// no override.
    pub fn registry(&self) -> Result<Address> {
        self.registry_address
            .or_else(|| registry_address_for_chain(self.chain_id))
            .ok_or_else(|| {
                EnsError::Config(format!(
                    "no ENS registry known for chain {}; set a registry address",
                    self.chain_id
                ))
            })
    }
}

fn parse_address(var: &str, value: &str) -> Result<Address> {
    value
        .trim()
        .parse()
        .map_err(|e| EnsError::Config(format!("{}: {}", var, e)))
}
