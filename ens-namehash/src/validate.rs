//! Name validation and search-term classification.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use ens_core::constants::REVERSE_SUFFIX;
use ens_core::error::{EnsError, Result};

use crate::labelhash::is_encoded_label_hash;
use crate::normalize::normalize;

/// Validates a dotted name and returns its normalized form.
///
/// Encoded label hashes are kept verbatim; every other label is normalized.
pub fn validate_name(name: &str) -> Result<String> {
    let labels: Vec<&str> = name.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(EnsError::invalid_name(name, "Domain cannot have empty labels"));
    }

    let normalized = labels
        .into_iter()
        .map(|label| {
            if is_encoded_label_hash(label) {
                Ok(label.to_string())
            } else {
                normalize(label)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(normalized.join("."))
}

/// Returns true if `name` is a single valid label.
pub fn is_label_valid(name: &str) -> bool {
    validate_name(name).is_ok() && !name.contains('.')
}

/// Returns false if `label` contains an ASCII character other than
/// `-`, `0-9`, `_` and `a-z`. Non-ASCII characters are left to [`normalize`].
pub fn check_restricted(label: &str) -> bool {
    label
        .chars()
        .filter(char::is_ascii)
        .all(|c| matches!(c, '-' | '0'..='9' | '_' | 'a'..='z'))
}

/// The reverse-record name of an address: `<lowercase hex>.addr.reverse`.
pub fn reverse_name(address: &Address) -> String {
    format!("{}.{}", hex::encode(address.as_slice()), REVERSE_SUFFIX)
}

/// What a user-typed search term looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTerm {
    /// Not a valid name.
    Invalid,
    /// A `.eth` name whose second-level label is under 3 characters.
    Short,
    /// A dotted name under a supported top-level domain.
    Supported,
    /// A dotted name under an unsupported top-level domain.
    Unsupported,
    /// An Ethereum address.
    Address,
    /// A bare top-level domain.
    Tld,
    /// A bare label to search for.
    Search,
}

/// Classifies a search term.
///
/// `valid_tld` tells whether the term's last label is a top-level domain
/// the registry knows about; finding that out needs a registry lookup the
/// caller performs.
pub fn parse_search_term(term: &str, valid_tld: bool) -> SearchTerm {
    if validate_name(term).is_err() {
        return SearchTerm::Invalid;
    }

    if term.contains('.') {
        if !valid_tld {
            return SearchTerm::Unsupported;
        }
        let labels: Vec<&str> = term.split('.').collect();
        let tld = labels[labels.len() - 1];
        let second_level = labels[labels.len() - 2];
        if tld == "eth" && second_level.chars().count() < 3 {
            SearchTerm::Short
        } else {
            SearchTerm::Supported
        }
    } else if term.starts_with("0x") && term.parse::<Address>().is_ok() {
        SearchTerm::Address
    } else if valid_tld {
        SearchTerm::Tld
    } else {
        SearchTerm::Search
    }
}
