//! Statically declared contract interfaces, one module per contract role.
//!
//! Only the functions this client calls are declared. Overloads (`addr`,
//! `setAddr`, `setName`) live in separate modules so each gets a plain
//! generated name.

use alloy::primitives::{Address, B256};
use alloy::sol_types::SolCall;

use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;

/// The ENS registry.
pub mod registry {
    alloy::sol! {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
        function ttl(bytes32 node) external view returns (uint64);
        function setOwner(bytes32 node, address owner) external;
        function setResolver(bytes32 node, address resolver) external;
        function setSubnodeOwner(bytes32 node, bytes32 label, address owner) external returns (bytes32);
        function setSubnodeRecord(bytes32 node, bytes32 label, address owner, address resolver, uint64 ttl) external;
    }
}

/// A public resolver.
pub mod resolver {
    alloy::sol! {
        function addr(bytes32 node) external view returns (address);
        function setAddr(bytes32 node, address a) external;
        function content(bytes32 node) external view returns (bytes32);
        function contenthash(bytes32 node) external view returns (bytes);
        function setContenthash(bytes32 node, bytes hash) external;
        function name(bytes32 node) external view returns (string);
        function setName(bytes32 node, string name) external;
        function text(bytes32 node, string key) external view returns (string);
        function setText(bytes32 node, string key, string value) external;
        function ABI(bytes32 node, uint256 contentTypes) external view returns (uint256, bytes);
        function supportsInterface(bytes4 interfaceID) external view returns (bool);
    }
}

/// Multi-coin address records (EIP-2304).
pub mod multicoin {
    alloy::sol! {
        function addr(bytes32 node, uint256 coinType) external view returns (bytes);
        function setAddr(bytes32 node, uint256 coinType, bytes a) external;
    }
}

/// The reverse registrar that owns `addr.reverse`.
pub mod reverse_registrar {
    alloy::sol! {
        function setName(string name) external returns (bytes32);
    }
}

/// Issues a read-only call and decodes its return data.
pub(crate) async fn read<C>(caller: &dyn ContractCaller, to: Address, call: C) -> Result<C::Return>
where
    C: SolCall + Send,
{
    let data = caller.call(to, call.abi_encode().into()).await?;
    C::abi_decode_returns(&data, true).map_err(|e| {
        EnsError::ExternalCall(format!("failed to decode {} return data: {}", C::SIGNATURE, e))
    })
}

/// Submits a state-changing call and returns the transaction hash.
pub(crate) async fn write<C>(caller: &dyn ContractCaller, to: Address, call: C) -> Result<B256>
where
    C: SolCall + Send,
{
    caller.send(to, call.abi_encode().into()).await
}
