//! Content hash types (EIP-1577).

use std::fmt;
use std::str::FromStr;

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::constants::{CODEC_IPFS_NS, CODEC_IPNS_NS, CODEC_ONION, CODEC_ONION3, CODEC_SWARM_NS};
use crate::error::EnsError;

// ═══════════════════════════════════════════════════════════════════════════════
// PROTOCOL
// ═══════════════════════════════════════════════════════════════════════════════

/// Off-chain content protocol a content hash points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentProtocol {
    /// IPFS content identifier.
    Ipfs,
    /// IPNS record key.
    Ipns,
    /// Swarm manifest hash.
    Bzz,
    /// Tor v2 onion address.
    Onion,
    /// Tor v3 onion address.
    Onion3,
}

impl ContentProtocol {
    /// URI scheme of the protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentProtocol::Ipfs => "ipfs",
            ContentProtocol::Ipns => "ipns",
            ContentProtocol::Bzz => "bzz",
            ContentProtocol::Onion => "onion",
            ContentProtocol::Onion3 => "onion3",
        }
    }

    /// Multicodec namespace code the protocol is tagged with.
    pub fn codec(&self) -> u64 {
        match self {
            ContentProtocol::Ipfs => CODEC_IPFS_NS,
            ContentProtocol::Ipns => CODEC_IPNS_NS,
            ContentProtocol::Bzz => CODEC_SWARM_NS,
            ContentProtocol::Onion => CODEC_ONION,
            ContentProtocol::Onion3 => CODEC_ONION3,
        }
    }

    /// Maps a multicodec namespace code back to its protocol.
    pub fn from_codec(codec: u64) -> Option<Self> {
        match codec {
            CODEC_IPFS_NS => Some(ContentProtocol::Ipfs),
            CODEC_IPNS_NS => Some(ContentProtocol::Ipns),
            CODEC_SWARM_NS => Some(ContentProtocol::Bzz),
            CODEC_ONION => Some(ContentProtocol::Onion),
            CODEC_ONION3 => Some(ContentProtocol::Onion3),
            _ => None,
        }
    }
}

impl fmt::Display for ContentProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentProtocol {
    type Err = EnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipfs" => Ok(ContentProtocol::Ipfs),
            "ipns" => Ok(ContentProtocol::Ipns),
            "bzz" => Ok(ContentProtocol::Bzz),
            "onion" => Ok(ContentProtocol::Onion),
            "onion3" => Ok(ContentProtocol::Onion3),
            other => Err(EnsError::UnsupportedProtocol(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECODED CONTENT HASH
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of decoding a content hash.
///
/// Decoding never fails outright: a problem is reported in `error` next to
/// whatever protocol and payload could be recovered. Callers must check
/// `error` before trusting the rest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedContentHash {
    /// Protocol tag, None for an unrecognized codec or an upstream error.
    pub protocol: Option<ContentProtocol>,
    /// Decoded payload, the raw input for an unrecognized codec, or the
    /// upstream error message.
    pub payload: Option<String>,
    /// Decode failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecodedContentHash {
    /// A successfully decoded value.
    pub fn decoded(protocol: ContentProtocol, payload: impl Into<String>) -> Self {
        Self {
            protocol: Some(protocol),
            payload: Some(payload.into()),
            error: None,
        }
    }

    /// Passes an error reported before decoding through as the payload.
    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self {
            protocol: None,
            payload: Some(message.into()),
            error: None,
        }
    }

    /// Returns true if decoding failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Rebuilds the `protocol://payload` URI, when both parts are known.
    pub fn to_uri(&self) -> Option<String> {
        if self.is_error() {
            return None;
        }
        match (&self.protocol, &self.payload) {
            (Some(protocol), Some(payload)) => Some(format!("{}://{}", protocol, payload)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT RECORD
// ═══════════════════════════════════════════════════════════════════════════════

/// Content record of a name as read from its resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentRecord {
    /// A decoded EIP-1577 content hash, as a `protocol://payload` URI.
    Contenthash(String),
    /// The resolver holds a content hash this client cannot decode.
    Undecodable(String),
    /// No content hash is set.
    Empty,
    /// Pre-EIP-1577 resolvers store a bare bytes32.
    Legacy(B256),
}
