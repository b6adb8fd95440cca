//! In-memory contract state for facade tests.
//!
//! Every contract shares one record store keyed by node, so the registry and
//! any resolver address see the same data. Reads dispatch on the function
//! selector; writes are only recorded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use ens_core::constants::ENS_REGISTRY_ADDRESS;
use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;
use ens_core::types::Node;
use ens_namehash::namehash;

use crate::contracts::{multicoin, registry, resolver};
use crate::registry::Registry;

#[derive(Default)]
struct Records {
    owners: HashMap<Node, Address>,
    resolvers: HashMap<Node, Address>,
    ttls: HashMap<Node, u64>,
    addrs: HashMap<Node, Address>,
    coin_addrs: HashMap<(Node, U256), Bytes>,
    contenthashes: HashMap<Node, Bytes>,
    legacy_content: HashMap<Node, B256>,
    names: HashMap<Node, String>,
    texts: HashMap<(Node, String), String>,
    abis: HashMap<Node, (U256, Bytes)>,
}

#[derive(Default)]
struct Inner {
    records: Mutex<Records>,
    sent: Mutex<Vec<(Address, Bytes)>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    legacy_resolvers: AtomicBool,
}

/// A fake chain answering registry and resolver reads from memory.
#[derive(Clone, Default)]
pub(crate) struct FakeChain {
    inner: Arc<Inner>,
}

fn node(name: &str) -> Node {
    namehash(name).expect("test names are valid")
}

fn decode<C: SolCall>(data: &[u8]) -> Result<C> {
    C::abi_decode(data, true).map_err(|e| EnsError::ExternalCall(e.to_string()))
}

impl FakeChain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn caller(&self) -> Arc<dyn ContractCaller> {
        Arc::new(self.clone())
    }

    pub(crate) fn registry(&self) -> Registry {
        Registry::new(self.caller(), ENS_REGISTRY_ADDRESS)
    }

    fn with_records(&self, f: impl FnOnce(&mut Records)) {
        f(&mut self.inner.records.lock().unwrap());
    }

    pub(crate) fn set_owner(&self, name: &str, owner: Address) {
        self.with_records(|r| {
            r.owners.insert(node(name), owner);
        });
    }

    pub(crate) fn set_resolver(&self, name: &str, resolver: Address) {
        self.with_records(|r| {
            r.resolvers.insert(node(name), resolver);
        });
    }

    pub(crate) fn set_ttl(&self, name: &str, ttl: u64) {
        self.with_records(|r| {
            r.ttls.insert(node(name), ttl);
        });
    }

    pub(crate) fn set_addr(&self, name: &str, addr: Address) {
        self.with_records(|r| {
            r.addrs.insert(node(name), addr);
        });
    }

    pub(crate) fn set_coin_addr(&self, name: &str, coin_type: u64, addr: Vec<u8>) {
        self.with_records(|r| {
            r.coin_addrs.insert((node(name), U256::from(coin_type)), addr.into());
        });
    }

    pub(crate) fn set_contenthash(&self, name: &str, hash: Vec<u8>) {
        self.with_records(|r| {
            r.contenthashes.insert(node(name), hash.into());
        });
    }

    pub(crate) fn set_legacy_content(&self, name: &str, content: B256) {
        self.with_records(|r| {
            r.legacy_content.insert(node(name), content);
        });
    }

    pub(crate) fn set_name_record(&self, name: &str, value: &str) {
        self.with_records(|r| {
            r.names.insert(node(name), value.to_string());
        });
    }

    pub(crate) fn set_text(&self, name: &str, key: &str, value: &str) {
        self.with_records(|r| {
            r.texts.insert((node(name), key.to_string()), value.to_string());
        });
    }

    pub(crate) fn set_abi(&self, name: &str, content_type: u64, data: Vec<u8>) {
        self.with_records(|r| {
            r.abis.insert(node(name), (U256::from(content_type), data.into()));
        });
    }

    /// Resolvers answer `false` to `supportsInterface(contenthash)`.
    pub(crate) fn without_contenthash_support(&self) {
        self.inner.legacy_resolvers.store(true, Ordering::SeqCst);
    }

    /// Every subsequent call and send fails with a transport error.
    pub(crate) fn fail_calls(&self) {
        self.inner.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sent(&self) -> Vec<(Address, Bytes)> {
        self.inner.sent.lock().unwrap().clone()
    }

    fn answer(&self, data: &[u8]) -> Result<Vec<u8>> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| EnsError::ExternalCall("calldata too short".into()))?;
        let records = self.inner.records.lock().unwrap();

        let out = match selector {
            registry::ownerCall::SELECTOR => {
                let c = decode::<registry::ownerCall>(data)?;
                let owner = records.owners.get(&c.node).copied().unwrap_or_default();
                registry::ownerCall::abi_encode_returns(&(owner,))
            }
            registry::resolverCall::SELECTOR => {
                let c = decode::<registry::resolverCall>(data)?;
                let resolver = records.resolvers.get(&c.node).copied().unwrap_or_default();
                registry::resolverCall::abi_encode_returns(&(resolver,))
            }
            registry::ttlCall::SELECTOR => {
                let c = decode::<registry::ttlCall>(data)?;
                let ttl = records.ttls.get(&c.node).copied().unwrap_or_default();
                registry::ttlCall::abi_encode_returns(&(ttl,))
            }
            resolver::addrCall::SELECTOR => {
                let c = decode::<resolver::addrCall>(data)?;
                let addr = records.addrs.get(&c.node).copied().unwrap_or_default();
                resolver::addrCall::abi_encode_returns(&(addr,))
            }
            multicoin::addrCall::SELECTOR => {
                let c = decode::<multicoin::addrCall>(data)?;
                let addr = records
                    .coin_addrs
                    .get(&(c.node, c.coinType))
                    .cloned()
                    .unwrap_or_default();
                multicoin::addrCall::abi_encode_returns(&(addr,))
            }
            resolver::supportsInterfaceCall::SELECTOR => {
                let c = decode::<resolver::supportsInterfaceCall>(data)?;
                let supported = c.interfaceID.0 != resolver::contenthashCall::SELECTOR
                    || !self.inner.legacy_resolvers.load(Ordering::SeqCst);
                resolver::supportsInterfaceCall::abi_encode_returns(&(supported,))
            }
            resolver::contenthashCall::SELECTOR => {
                let c = decode::<resolver::contenthashCall>(data)?;
                let hash = records.contenthashes.get(&c.node).cloned().unwrap_or_default();
                resolver::contenthashCall::abi_encode_returns(&(hash,))
            }
            resolver::contentCall::SELECTOR => {
                let c = decode::<resolver::contentCall>(data)?;
                let content = records.legacy_content.get(&c.node).copied().unwrap_or_default();
                resolver::contentCall::abi_encode_returns(&(content,))
            }
            resolver::nameCall::SELECTOR => {
                let c = decode::<resolver::nameCall>(data)?;
                let name = records.names.get(&c.node).cloned().unwrap_or_default();
                resolver::nameCall::abi_encode_returns(&(name,))
            }
            resolver::textCall::SELECTOR => {
                let c = decode::<resolver::textCall>(data)?;
                let value = records.texts.get(&(c.node, c.key)).cloned().unwrap_or_default();
                resolver::textCall::abi_encode_returns(&(value,))
            }
            resolver::ABICall::SELECTOR => {
                let c = decode::<resolver::ABICall>(data)?;
                let (content_type, abi) = records.abis.get(&c.node).cloned().unwrap_or_default();
                resolver::ABICall::abi_encode_returns(&(content_type, abi))
            }
            other => {
                return Err(EnsError::ExternalCall(format!(
                    "unknown selector 0x{}",
                    hex::encode(other)
                )))
            }
        };
        Ok(out)
    }
}

#[async_trait]
impl ContractCaller for FakeChain {
    async fn call(&self, _to: Address, data: Bytes) -> Result<Bytes> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(EnsError::ExternalCall("connection refused".into()));
        }
        self.answer(&data).map(Bytes::from)
    }

    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(EnsError::ExternalCall("connection refused".into()));
        }
        let mut sent = self.inner.sent.lock().unwrap();
        sent.push((to, data));
        Ok(B256::with_last_byte(sent.len() as u8))
    }
}
