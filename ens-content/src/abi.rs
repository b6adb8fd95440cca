//! EIP-205 ABI records.
//!
//! A resolver returns `(contentType, data)`. Type 1 is UTF-8 JSON, type 2 is
//! the same JSON compressed as a zlib-framed DEFLATE stream. Type 0 means no
//! ABI is set; deciding what to do about that is the caller's business.

use std::io::Read;

use flate2::read::ZlibDecoder;
use tracing::warn;

use ens_core::constants::ABI_CONTENT_NONE;
use ens_core::error::{EnsError, Result};
use ens_core::types::{AbiContentType, AbiRecord};

fn parse_json(text: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes ABI record bytes into the JSON ABI definition.
///
/// # Errors
///
/// - [`EnsError::Format`] for invalid UTF-8 or a corrupt zlib stream
/// - [`EnsError::Json`] if the text is not JSON
/// - [`EnsError::UnsupportedProtocol`] for any content type other than 1 or 2
pub fn decode_abi(content_type: u64, data: &[u8]) -> Result<serde_json::Value> {
    match AbiContentType::from_code(content_type) {
        Some(AbiContentType::Json) => {
            let text = std::str::from_utf8(data)
                .map_err(|e| EnsError::Format(format!("ABI is not valid UTF-8: {}", e)))?;
            parse_json(text)
        }
        Some(AbiContentType::ZlibJson) => {
            let mut text = String::new();
            ZlibDecoder::new(data)
                .read_to_string(&mut text)
                .map_err(|e| EnsError::Format(format!("Failed to inflate ABI: {}", e)))?;
            parse_json(&text)
        }
        _ => Err(EnsError::UnsupportedProtocol(format!(
            "ABI content type {}",
            content_type
        ))),
    }
}

/// Turns a raw `(contentType, data)` pair into an [`AbiRecord`].
///
/// Content type 0 is [`AbiRecord::Absent`]; decode failures are reported as
/// [`AbiRecord::Undecodable`] rather than as an error.
pub fn decode_abi_record(content_type: u64, data: &[u8], via_reverse: bool) -> AbiRecord {
    if content_type == ABI_CONTENT_NONE {
        return AbiRecord::Absent;
    }

    match decode_abi(content_type, data) {
        Ok(abi) => AbiRecord::Found {
            content_type,
            abi,
            via_reverse,
        },
        Err(e) => {
            warn!(content_type, error = %e, "Failed to decode ABI record");
            AbiRecord::Undecodable {
                content_type,
                error: e.to_string(),
            }
        }
    }
}
