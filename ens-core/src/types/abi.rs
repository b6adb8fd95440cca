//! ABI record types (EIP-205).

use serde::{Deserialize, Serialize};

use crate::constants::{ABI_CONTENT_CBOR, ABI_CONTENT_JSON, ABI_CONTENT_URI, ABI_CONTENT_ZLIB_JSON};

/// Encoding of an ABI stored in a resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiContentType {
    /// Plain UTF-8 JSON.
    Json,
    /// zlib-compressed JSON.
    ZlibJson,
    /// CBOR.
    Cbor,
    /// URI pointing at the ABI.
    Uri,
}

impl AbiContentType {
    /// Numeric content type as stored on-chain.
    pub fn code(&self) -> u64 {
        match self {
            AbiContentType::Json => ABI_CONTENT_JSON,
            AbiContentType::ZlibJson => ABI_CONTENT_ZLIB_JSON,
            AbiContentType::Cbor => ABI_CONTENT_CBOR,
            AbiContentType::Uri => ABI_CONTENT_URI,
        }
    }

    /// Parses an on-chain content type. Zero ("absent") and unknown codes yield None.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            ABI_CONTENT_JSON => Some(AbiContentType::Json),
            ABI_CONTENT_ZLIB_JSON => Some(AbiContentType::ZlibJson),
            ABI_CONTENT_CBOR => Some(AbiContentType::Cbor),
            ABI_CONTENT_URI => Some(AbiContentType::Uri),
            _ => None,
        }
    }
}

/// Result of an ABI lookup through a resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AbiRecord {
    /// An ABI was found and decoded.
    Found {
        /// On-chain content type code.
        content_type: u64,
        /// Decoded ABI definition.
        abi: serde_json::Value,
        /// True when the ABI came from the reverse record of the name's address.
        via_reverse: bool,
    },
    /// Neither the name nor its reverse record holds an ABI.
    Absent,
    /// An ABI record exists but could not be decoded.
    Undecodable {
        /// On-chain content type code.
        content_type: u64,
        /// Decode failure message.
        error: String,
    },
}

impl AbiRecord {
    /// Returns the decoded ABI, if any.
    pub fn abi(&self) -> Option<&serde_json::Value> {
        match self {
            AbiRecord::Found { abi, .. } => Some(abi),
            _ => None,
        }
    }
}
