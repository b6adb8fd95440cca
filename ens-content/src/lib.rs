//! # ENS Content Codecs
//!
//! Decoders and encoders for the byte formats resolvers hand back:
//!
//! - **Content hash** (EIP-1577): multicodec-tagged pointers into IPFS,
//!   IPNS, Swarm and Tor
//! - **ABI records** (EIP-205): JSON or zlib-compressed JSON contract ABIs
//!
//! Decoding is speculative by nature ("is there anything here?"), so
//! content hash decoding reports problems inside its result instead of
//! returning an error.
//!
//! ## Example
//!
//! ```rust
//! use ens_content::{decode_content_hash_hex, encode_content_hash_hex};
//!
//! let encoded = encode_content_hash_hex("onion://3g2upl4pq6kufc4m").unwrap();
//! assert_eq!(encoded, "0xbc0333673275706c347071366b756663346d");
//!
//! let decoded = decode_content_hash_hex(&encoded);
//! assert_eq!(decoded.to_uri().as_deref(), Some("onion://3g2upl4pq6kufc4m"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod abi;
pub mod contenthash;

pub use abi::{decode_abi, decode_abi_record};
pub use contenthash::{
    decode_content_hash, decode_content_hash_hex, decode_fetched_content_hash,
    encode_content_hash, encode_content_hash_hex, get_codec, is_valid_content_hash,
    is_valid_for_display,
};
