//! Error types for the ENS client.
//!
//! The taxonomy keeps three user-visible outcomes apart: malformed input
//! (`InvalidName`, `Format`), a name that does not exist (`NameNotFound`),
//! and a failure of the contract-call collaborator (`ExternalCall`).

use thiserror::Error;

/// Result type alias using `EnsError`.
pub type Result<T> = std::result::Result<T, EnsError>;

/// Main error type for all ENS client operations.
#[derive(Debug, Error)]
pub enum EnsError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed name: empty label or a disallowed character after normalization.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The name or label as given.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Malformed encoded label hash or content hash encoding.
    #[error("Format error: {0}")]
    Format(String),

    /// Content hash or ABI record tagged with a codec outside the supported set.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLUTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The registry returned the zero address where a concrete result was required.
    #[error("ENS name not found: {0}")]
    NameNotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // COLLABORATOR ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The underlying contract call failed.
    #[error("Contract call failed: {0}")]
    ExternalCall(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl EnsError {
    /// Builds an [`EnsError::InvalidName`].
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EnsError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the name does not exist in the registry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EnsError::NameNotFound(_))
    }

    /// Returns true if the caller supplied malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EnsError::InvalidName { .. }
                | EnsError::Format(_)
                | EnsError::UnsupportedProtocol(_)
                | EnsError::Hex(_)
        )
    }

    /// Returns true if the contract-call collaborator failed.
    pub fn is_external(&self) -> bool {
        matches!(self, EnsError::ExternalCall(_))
    }
}
