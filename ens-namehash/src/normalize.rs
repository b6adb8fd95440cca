//! Unicode normalization of names.
//!
//! ENS maps names through UTS-46 with the STD3 ASCII restriction and
//! non-transitional processing (so `ß` stays `ß` instead of becoming `ss`).
//! Anything the mapping marks as disallowed makes the name invalid.

use ens_core::error::{EnsError, Result};

/// Normalizes a label or a dotted name.
///
/// Normalization is deterministic and idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
///
/// # Errors
///
/// Returns [`EnsError::InvalidName`] when the input contains code points the
/// profile disallows (control characters, spaces, most ASCII punctuation).
pub fn normalize(name: &str) -> Result<String> {
    let (mapped, outcome) = idna::Config::default()
        .use_std3_ascii_rules(true)
        .transitional_processing(false)
        .check_hyphens(false)
        .to_unicode(name);

    outcome.map_err(|errors| EnsError::invalid_name(name, format!("disallowed characters ({:?})", errors)))?;
    Ok(mapped)
}
