//! EIP-1577 content hashes.
//!
//! A content hash is an unsigned-varint multicodec naming the namespace,
//! followed by a namespace-specific value:
//!
//! ```text
//! ipfs-ns  (0xe3)   || CIDv1(dag-pb, sha2-256 multihash)
//! ipns-ns  (0xe5)   || CIDv1(dag-pb, identity multihash of the name)
//!                       or CIDv1(libp2p-key, multihash of a public key)
//! swarm-ns (0xe4)   || CIDv1(swarm-manifest, keccak-256 multihash)
//! onion    (0x01bc) || 16 ASCII characters
//! onion3   (0x01bd) || 56 ASCII characters
//! ```

use std::fmt;

use cid::Cid;
use multihash::Multihash;
use tracing::{debug, warn};

use ens_core::constants::{
    CODEC_DAG_PB, CODEC_IPFS_NS, CODEC_LIBP2P_KEY, CODEC_SWARM_MANIFEST, CODEC_SWARM_NS,
    MIN_HASH_PAYLOAD_LEN,
    MULTIHASH_IDENTITY, MULTIHASH_KECCAK_256, ONION3_PAYLOAD_LEN, ONION_PAYLOAD_LEN,
    SUPPORTED_CONTENT_CODECS,
};
use ens_core::error::{EnsError, Result};
use ens_core::types::{ContentProtocol, DecodedContentHash};

// ═══════════════════════════════════════════════════════════════════════════════
// ENCODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Splits a content URI into its protocol and payload.
///
/// Accepted forms, in order of preference: `protocol://payload`,
/// `.../ipfs/payload`, `.../ipns/payload`.
fn parse_content_uri(uri: &str) -> Option<(&str, &str)> {
    if let Some((scheme, payload)) = uri.split_once("://") {
        if scheme.parse::<ContentProtocol>().is_ok() {
            return Some((scheme, payload));
        }
    }
    for scheme in ["ipfs", "ipns"] {
        let marker = format!("/{}/", scheme);
        if let Some(index) = uri.find(&marker) {
            return Some((scheme, &uri[index + marker.len()..]));
        }
    }
    None
}

const CID_VERSION_1: u64 = 1;

fn push_varint(out: &mut Vec<u8>, value: u64) {
    let mut buf = unsigned_varint::encode::u64_buffer();
    out.extend_from_slice(unsigned_varint::encode::u64(value, &mut buf));
}

fn tagged(codec: u64, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 3);
    push_varint(&mut out, codec);
    out.extend_from_slice(value);
    out
}

/// CIDv1(dag-pb) over an identity multihash of `name`.
///
/// Built by hand: DNSLink names run up to 253 bytes, past the digest size
/// `cid` and `multihash` allocate for.
fn ipns_name_cid(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 6);
    push_varint(&mut out, CID_VERSION_1);
    push_varint(&mut out, CODEC_DAG_PB);
    push_varint(&mut out, MULTIHASH_IDENTITY);
    push_varint(&mut out, name.len() as u64);
    out.extend_from_slice(name.as_bytes());
    out
}

fn encode_payload(protocol: ContentProtocol, payload: &str) -> Result<Option<Vec<u8>>> {
    let value = match protocol {
        ContentProtocol::Ipfs => {
            if payload.len() < MIN_HASH_PAYLOAD_LEN {
                return Ok(None);
            }
            let cid: Cid = payload
                .parse()
                .map_err(|e: cid::Error| EnsError::Format(e.to_string()))?;
            cid.into_v1()
                .map_err(|e| EnsError::Format(e.to_string()))?
                .to_bytes()
        }
        ContentProtocol::Ipns => {
            // The name travels as an identity multihash: 0x00 || len || name.
            ipns_name_cid(payload)
        }
        ContentProtocol::Bzz => {
            if payload.len() < MIN_HASH_PAYLOAD_LEN {
                return Ok(None);
            }
            let digest = hex::decode(payload)?;
            let hash = Multihash::<64>::wrap(MULTIHASH_KECCAK_256, &digest)
                .map_err(|e| EnsError::Format(e.to_string()))?;
            Cid::new_v1(CODEC_SWARM_MANIFEST, hash).to_bytes()
        }
        ContentProtocol::Onion => {
            if payload.len() != ONION_PAYLOAD_LEN {
                return Ok(None);
            }
            payload.as_bytes().to_vec()
        }
        ContentProtocol::Onion3 => {
            if payload.len() != ONION3_PAYLOAD_LEN {
                return Ok(None);
            }
            payload.as_bytes().to_vec()
        }
    };

    Ok(Some(tagged(protocol.codec(), &value)))
}

/// Encodes a content URI (`ipfs://…`, `/ipns/…`, `bzz://…`, `onion://…`,
/// `onion3://…`) into content hash bytes.
///
/// Returns `None` for an unknown protocol or a payload that fails its
/// protocol's rule. Callers must check for `None` before treating the
/// result as a valid hash.
pub fn encode_content_hash(uri: &str) -> Option<Vec<u8>> {
    let Some((scheme, payload)) = parse_content_uri(uri) else {
        warn!(uri, "Unsupported protocol or invalid value");
        return None;
    };
    let protocol = scheme.parse::<ContentProtocol>().ok()?;

    match encode_payload(protocol, payload) {
        Ok(Some(encoded)) => Some(encoded),
        Ok(None) => {
            warn!(uri, %protocol, "Content payload rejected");
            None
        }
        Err(e) => {
            warn!(uri, %protocol, error = %e, "Error encoding content hash");
            None
        }
    }
}

/// [`encode_content_hash`] as `0x`-prefixed lowercase hex.
pub fn encode_content_hash_hex(uri: &str) -> Option<String> {
    encode_content_hash(uri).map(|bytes| format!("0x{}", hex::encode(bytes)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Reads the multicodec namespace code of a content hash.
pub fn get_codec(encoded: &[u8]) -> Result<u64> {
    unsigned_varint::decode::u64(encoded)
        .map(|(codec, _)| codec)
        .map_err(|e| EnsError::Format(format!("invalid multicodec prefix: {}", e)))
}

fn split_codec(encoded: &[u8]) -> Result<(u64, &[u8])> {
    unsigned_varint::decode::u64(encoded)
        .map_err(|e| EnsError::Format(format!("invalid multicodec prefix: {}", e)))
}

fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8])> {
    unsigned_varint::decode::u64(bytes)
        .map_err(|e| EnsError::Format(format!("invalid CID varint: {}", e)))
}

/// Reads an IPNS CID without the digest size cap of `Cid`.
///
/// A libp2p key, or any non-identity hash, is shown as its base58 peer id;
/// an identity-hashed dag-pb CID carries a DNSLink name as UTF-8.
fn decode_ipns(value: &[u8]) -> Result<String> {
    let (version, rest) = read_varint(value)?;
    if version != CID_VERSION_1 {
        return Err(EnsError::Format(format!("unsupported CID version {}", version)));
    }
    let (codec, multihash) = read_varint(rest)?;
    let (hash_code, rest) = read_varint(multihash)?;
    let (len, digest) = read_varint(rest)?;
    if digest.len() as u64 != len {
        return Err(EnsError::Format(format!(
            "multihash declares {} bytes, found {}",
            len,
            digest.len()
        )));
    }

    if codec == CODEC_LIBP2P_KEY || hash_code != MULTIHASH_IDENTITY {
        Ok(bs58::encode(multihash).into_string())
    } else {
        String::from_utf8(digest.to_vec()).map_err(|e| EnsError::Format(e.to_string()))
    }
}

fn parse_cid(value: &[u8]) -> Result<Cid> {
    Cid::try_from(value).map_err(|e| EnsError::Format(e.to_string()))
}

fn decode_payload(protocol: ContentProtocol, value: &[u8]) -> Result<String> {
    match protocol {
        ContentProtocol::Ipfs => {
            let cid = parse_cid(value)?;
            Ok(bs58::encode(cid.hash().to_bytes()).into_string())
        }
        ContentProtocol::Ipns => decode_ipns(value),
        ContentProtocol::Bzz => {
            let cid = parse_cid(value)?;
            Ok(hex::encode(cid.hash().digest()))
        }
        ContentProtocol::Onion | ContentProtocol::Onion3 => {
            String::from_utf8(value.to_vec()).map_err(|e| EnsError::Format(e.to_string()))
        }
    }
}

/// Decodes content hash bytes.
///
/// Never fails: an unrecognized codec yields the raw value as `0x` hex with
/// no protocol, and a malformed value yields `error` alongside the protocol
/// when its codec could be read. Empty input decodes to an empty result.
pub fn decode_content_hash(encoded: &[u8]) -> DecodedContentHash {
    if encoded.is_empty() {
        return DecodedContentHash::default();
    }

    let (codec, value) = match split_codec(encoded) {
        Ok(parts) => parts,
        Err(e) => {
            debug!(error = %e, "Content hash has no readable codec");
            return DecodedContentHash {
                error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let Some(protocol) = ContentProtocol::from_codec(codec) else {
        return DecodedContentHash {
            protocol: None,
            payload: Some(format!("0x{}", hex::encode(encoded))),
            error: None,
        };
    };

    match decode_payload(protocol, value) {
        Ok(payload) => DecodedContentHash::decoded(protocol, payload),
        Err(e) => {
            debug!(%protocol, error = %e, "Failed to decode content hash");
            DecodedContentHash {
                protocol: Some(protocol),
                payload: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Decodes a `0x`-prefixed hex content hash.
pub fn decode_content_hash_hex(encoded: &str) -> DecodedContentHash {
    let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    match hex::decode(digits) {
        Ok(bytes) => decode_content_hash(&bytes),
        Err(e) => DecodedContentHash {
            error: Some(EnsError::from(e).to_string()),
            ..Default::default()
        },
    }
}

/// Decodes the outcome of a content hash fetch.
///
/// An error reported by the fetch itself is passed through as the payload
/// with no protocol, without attempting to decode anything.
pub fn decode_fetched_content_hash<B, E>(fetched: std::result::Result<B, E>) -> DecodedContentHash
where
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    match fetched {
        Ok(bytes) => decode_content_hash(bytes.as_ref()),
        Err(e) => DecodedContentHash::upstream_error(e.to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

fn hex_codec(encoded: &str) -> Option<u64> {
    let digits = encoded.strip_prefix("0x")?;
    let bytes = hex::decode(digits).ok()?;
    get_codec(&bytes).ok()
}

/// Returns true if `encoded` is `0x`-prefixed hex tagged with a supported codec.
pub fn is_valid_content_hash(encoded: &str) -> bool {
    hex_codec(encoded).is_some_and(|codec| SUPPORTED_CONTENT_CODECS.contains(&codec))
}

/// Returns true only for IPFS and Swarm content hashes.
///
/// This is the narrower check applied where only those two protocols are
/// accepted for display.
pub fn is_valid_for_display(encoded: &str) -> bool {
    hex_codec(encoded).is_some_and(|codec| codec == CODEC_IPFS_NS || codec == CODEC_SWARM_NS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    const BZZ_URI: &str = "bzz://d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162";
    const BZZ_HASH: &str =
        "0xe40101fa011b20d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162";
    const IPFS_URI: &str = "ipfs://QmaEBknbGT4bTQiQoe2VNgBJbRfygQGktnaW5TbuKixjYL";
    const IPFS_HASH: &str =
        "0xe30101701220b0a44811601eee636e078819dd955f530ded320d7c8b7e498be00958103dc269";
    const ONION_URI: &str = "onion://3g2upl4pq6kufc4m";
    const ONION_HASH: &str = "0xbc0333673275706c347071366b756663346d";
    const ONION3_URI: &str = "onion3://p53lf57qovyuvwsc6xnrppyply3vtqm7l6pcobkmyqsiofyeznfu5uqd";
    const ONION3_HASH: &str = "0xbd037035336c663537716f7679757677736336786e72707079706c79337674716d376c3670636f626b6d797173696f6679657a6e667535757164";
    const IPNS_URI: &str = "ipns://app.uniswap.org";
    const IPNS_HASH: &str = "0xe5010170000f6170702e756e69737761702e6f7267";

    #[test_case(BZZ_URI, BZZ_HASH ; "swarm")]
    #[test_case(IPFS_URI, IPFS_HASH ; "ipfs")]
    #[test_case("/ipfs/QmaEBknbGT4bTQiQoe2VNgBJbRfygQGktnaW5TbuKixjYL", IPFS_HASH ; "ipfs path")]
    #[test_case(ONION_URI, ONION_HASH ; "onion")]
    #[test_case(ONION3_URI, ONION3_HASH ; "onion3")]
    #[test_case(IPNS_URI, IPNS_HASH ; "ipns")]
    #[test_case("/ipns/app.uniswap.org", IPNS_HASH ; "ipns path")]
    fn test_encode_golden(uri: &str, expected: &str) {
        assert_eq!(encode_content_hash_hex(uri).as_deref(), Some(expected));
    }

    #[test_case("ftp://example.com" ; "unknown protocol")]
    #[test_case("ipfs://Qm" ; "ipfs too short")]
    #[test_case("bzz://d1d" ; "bzz too short")]
    #[test_case("bzz://not-hex-at-all" ; "bzz not hex")]
    #[test_case("onion://3g2upl4pq6kufc4" ; "onion wrong length")]
    #[test_case("onion3://3g2upl4pq6kufc4m" ; "onion3 wrong length")]
    #[test_case("" ; "empty")]
    fn test_encode_sentinel(uri: &str) {
        assert_eq!(encode_content_hash(uri), None);
    }

    #[test_case(BZZ_HASH, ContentProtocol::Bzz, "d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162" ; "swarm")]
    #[test_case(IPFS_HASH, ContentProtocol::Ipfs, "QmaEBknbGT4bTQiQoe2VNgBJbRfygQGktnaW5TbuKixjYL" ; "ipfs")]
    #[test_case(ONION_HASH, ContentProtocol::Onion, "3g2upl4pq6kufc4m" ; "onion")]
    #[test_case(ONION3_HASH, ContentProtocol::Onion3, "p53lf57qovyuvwsc6xnrppyply3vtqm7l6pcobkmyqsiofyeznfu5uqd" ; "onion3")]
    #[test_case(IPNS_HASH, ContentProtocol::Ipns, "app.uniswap.org" ; "ipns")]
    fn test_decode_golden(encoded: &str, protocol: ContentProtocol, payload: &str) {
        let decoded = decode_content_hash_hex(encoded);
        assert_eq!(decoded.protocol, Some(protocol));
        assert_eq!(decoded.payload.as_deref(), Some(payload));
        assert_eq!(decoded.error, None);
    }

    #[test_case(BZZ_URI ; "swarm")]
    #[test_case(IPFS_URI ; "ipfs")]
    #[test_case(ONION_URI ; "onion")]
    #[test_case(ONION3_URI ; "onion3")]
    #[test_case(IPNS_URI ; "ipns")]
    fn test_uri_survives_encode_decode(uri: &str) {
        let encoded = encode_content_hash(uri).unwrap();
        assert_eq!(decode_content_hash(&encoded).to_uri().as_deref(), Some(uri));
    }

    #[test]
    fn test_decode_unknown_codec_returns_raw() {
        let decoded = decode_content_hash_hex("0x7001020304");
        assert_eq!(decoded.protocol, None);
        assert_eq!(decoded.payload.as_deref(), Some("0x7001020304"));
        assert_eq!(decoded.error, None);
    }

    #[test]
    fn test_decode_malformed_reports_error() {
        let decoded = decode_content_hash_hex("0xe301ffff");
        assert_eq!(decoded.protocol, Some(ContentProtocol::Ipfs));
        assert!(decoded.is_error());
        assert_eq!(decoded.to_uri(), None);

        assert!(decode_content_hash_hex("0xzz").is_error());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_content_hash(&[]), DecodedContentHash::default());
    }

    #[test]
    fn test_decode_passes_upstream_error_through() {
        let fetched: std::result::Result<Vec<u8>, String> = Err("execution reverted".into());
        let decoded = decode_fetched_content_hash(fetched);
        assert_eq!(decoded.protocol, None);
        assert_eq!(decoded.payload.as_deref(), Some("execution reverted"));

        let fetched: std::result::Result<Vec<u8>, String> = Ok(hex::decode(&ONION_HASH[2..]).unwrap());
        assert_eq!(decode_fetched_content_hash(fetched).to_uri().as_deref(), Some(ONION_URI));
    }

    #[test_case(BZZ_HASH, true ; "swarm")]
    #[test_case(IPFS_HASH, true ; "ipfs")]
    #[test_case(ONION_HASH, true ; "onion")]
    #[test_case(ONION3_HASH, true ; "onion3")]
    #[test_case(IPNS_HASH, true ; "ipns")]
    #[test_case("0xe40101fa011b20d1de9994b4d039f6548d191eb26786769f580809256b4685ef31680z", false ; "non hex")]
    #[test_case("0xe20101fa011b20d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162", false ; "unknown codec")]
    #[test_case("e40101fa011b20d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162", false ; "missing prefix")]
    fn test_is_valid_content_hash(encoded: &str, expected: bool) {
        assert_eq!(is_valid_content_hash(encoded), expected);
    }

    #[test]
    fn test_is_valid_for_display() {
        assert!(is_valid_for_display(IPFS_HASH));
        assert!(is_valid_for_display(BZZ_HASH));
        assert!(!is_valid_for_display(ONION_HASH));
        assert!(!is_valid_for_display(IPNS_HASH));
    }

    #[test]
    fn test_ipns_name_longer_than_a_digest() {
        let name = format!("{}.example.org", "a".repeat(58));
        assert_eq!(name.len(), 70);

        let encoded = encode_content_hash(&format!("ipns://{}", name)).unwrap();
        assert_eq!(
            hex::encode(&encoded),
            format!("e501017000{:02x}{}", name.len(), hex::encode(&name))
        );

        let decoded = decode_content_hash(&encoded);
        assert_eq!(decoded.protocol, Some(ContentProtocol::Ipns));
        assert_eq!(decoded.payload.as_deref(), Some(name.as_str()));
    }

    #[test]
    fn test_ipns_name_with_two_byte_length() {
        let name = format!("{}.{}.eth.limo", "x".repeat(63), "y".repeat(130));
        let encoded = encode_content_hash(&format!("ipns://{}", name)).unwrap();
        // 0xe5 0x01 | 0x01 0x70 0x00 | varint(len) spans two bytes past 127
        assert_eq!(encoded.len(), 2 + 3 + 2 + name.len());
        assert_eq!(decode_content_hash(&encoded).payload.as_deref(), Some(name.as_str()));
    }

    #[test_case(
        "0xe50101720024080112200102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20",
        "12D3KooW9tJMax94Lrqw7Y5Qw36viGQAS2gTEPQ5Wg1vTk7xPfQs" ;
        "libp2p ed25519 key"
    )]
    #[test_case(
        "0xe50101701220d694d81e0716ed3837f317c1defe1747e30ef895531a772f621a908ca1a5d6b1",
        "QmcnHbVHP5ptHNHuMKnRsuMzeF2VzZxSoSbDYmxu2rJfeY" ;
        "dag-pb sha2-256"
    )]
    fn test_decode_ipns_peer_id(encoded: &str, peer_id: &str) {
        let decoded = decode_content_hash_hex(encoded);
        assert_eq!(decoded.protocol, Some(ContentProtocol::Ipns));
        assert_eq!(decoded.payload.as_deref(), Some(peer_id));
        assert_eq!(decoded.error, None);
    }

    #[test]
    fn test_decode_ipns_truncated_name() {
        // Declares 15 bytes of name, carries 3.
        let decoded = decode_content_hash_hex("0xe5010170000f617070");
        assert_eq!(decoded.protocol, Some(ContentProtocol::Ipns));
        assert!(decoded.is_error());
    }

    fn assert_uri_survives(uri: &str) -> std::result::Result<(), TestCaseError> {
        let encoded = encode_content_hash(uri);
        prop_assert!(encoded.is_some(), "{} did not encode", uri);
        let decoded = decode_content_hash(&encoded.unwrap_or_default());
        prop_assert_eq!(decoded.to_uri(), Some(uri.to_string()));
        Ok(())
    }

    proptest! {
        #[test]
        fn test_bzz_roundtrip(digest in "[0-9a-f]{64}") {
            assert_uri_survives(&format!("bzz://{}", digest))?;
        }

        #[test]
        fn test_ipfs_cidv0_roundtrip(digest in prop::array::uniform32(any::<u8>())) {
            let mut multihash = vec![0x12, 0x20];
            multihash.extend_from_slice(&digest);
            let cid_v0 = bs58::encode(multihash).into_string();
            assert_uri_survives(&format!("ipfs://{}", cid_v0))?;
        }

        #[test]
        fn test_onion_roundtrip(address in "[a-z2-7]{16}") {
            assert_uri_survives(&format!("onion://{}", address))?;
        }

        #[test]
        fn test_onion3_roundtrip(address in "[a-z2-7]{56}") {
            assert_uri_survives(&format!("onion3://{}", address))?;
        }

        #[test]
        fn test_ipns_name_roundtrip(name in "[a-z0-9]{1,63}(\\.[a-z0-9]{1,63}){0,3}") {
            assert_uri_survives(&format!("ipns://{}", name))?;
        }
    }

    #[test]
    fn test_get_codec() {
        assert_eq!(get_codec(&hex::decode(&ONION3_HASH[2..]).unwrap()).unwrap(), 0x01bd);
        assert!(get_codec(&[0x80]).is_err());
    }
}
