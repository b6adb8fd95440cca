//! Protocol constants for ENS.
//!
//! Multicodec codes follow the multiformats table used by EIP-1577,
//! ABI content types follow EIP-205.

use alloy::primitives::{address, Address};

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY DEPLOYMENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Address of the ENS registry (with fallback) on every network it is deployed to.
pub const ENS_REGISTRY_ADDRESS: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Chain ids with a well-known registry deployment.
pub const KNOWN_REGISTRY_CHAINS: &[u64] = &[
    1,        // mainnet
    3,        // ropsten
    4,        // rinkeby
    5,        // goerli
    17000,    // holesky
    11155111, // sepolia
];

/// Returns the registry address for a chain, or None for an unknown chain.
pub fn registry_address_for_chain(chain_id: u64) -> Option<Address> {
    KNOWN_REGISTRY_CHAINS
        .contains(&chain_id)
        .then_some(ENS_REGISTRY_ADDRESS)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Namespace under which reverse records live.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// Length of an encoded label hash: `[` + 64 hex characters + `]`.
pub const ENCODED_LABEL_HASH_LEN: usize = 66;

/// SLIP-44 coin type for Ether.
pub const COIN_TYPE_ETH: u64 = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// MULTICODECS (EIP-1577)
// ═══════════════════════════════════════════════════════════════════════════════

/// `ipfs-ns` namespace codec.
pub const CODEC_IPFS_NS: u64 = 0xe3;

/// `swarm-ns` namespace codec.
pub const CODEC_SWARM_NS: u64 = 0xe4;

/// `ipns-ns` namespace codec.
pub const CODEC_IPNS_NS: u64 = 0xe5;

/// Tor v2 onion address codec.
pub const CODEC_ONION: u64 = 0x01bc;

/// Tor v3 onion address codec.
pub const CODEC_ONION3: u64 = 0x01bd;

/// `dag-pb` content codec inside an IPFS CID.
pub const CODEC_DAG_PB: u64 = 0x70;

/// `libp2p-key` content codec inside an IPNS CID.
pub const CODEC_LIBP2P_KEY: u64 = 0x72;

/// `swarm-manifest` content codec inside a Swarm CID.
pub const CODEC_SWARM_MANIFEST: u64 = 0xfa;

/// `identity` multihash code.
pub const MULTIHASH_IDENTITY: u64 = 0x00;

/// `keccak-256` multihash code.
pub const MULTIHASH_KECCAK_256: u64 = 0x1b;

/// Namespace codecs accepted as a valid content hash.
pub const SUPPORTED_CONTENT_CODECS: &[u64] = &[
    CODEC_IPNS_NS,
    CODEC_IPFS_NS,
    CODEC_SWARM_NS,
    CODEC_ONION,
    CODEC_ONION3,
];

/// Minimum payload length for `ipfs://` and `bzz://` URIs.
pub const MIN_HASH_PAYLOAD_LEN: usize = 4;

/// Exact payload length of a Tor v2 onion address.
pub const ONION_PAYLOAD_LEN: usize = 16;

/// Exact payload length of a Tor v3 onion address.
pub const ONION3_PAYLOAD_LEN: usize = 56;

// ═══════════════════════════════════════════════════════════════════════════════
// ABI RECORDS (EIP-205)
// ═══════════════════════════════════════════════════════════════════════════════

/// ABI content type: no record.
pub const ABI_CONTENT_NONE: u64 = 0;

/// ABI content type: plain UTF-8 JSON.
pub const ABI_CONTENT_JSON: u64 = 1;

/// ABI content type: zlib-compressed JSON.
pub const ABI_CONTENT_ZLIB_JSON: u64 = 2;

/// ABI content type: CBOR.
pub const ABI_CONTENT_CBOR: u64 = 4;

/// ABI content type: URI.
pub const ABI_CONTENT_URI: u64 = 8;

/// Bitmask of content types this client can decode.
pub const SUPPORTED_ABI_CONTENT_TYPES: u64 = ABI_CONTENT_JSON | ABI_CONTENT_ZLIB_JSON;
