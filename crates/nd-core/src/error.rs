//! # StoreError
//!
//! Centralized error handling for the Newsdesk record store.
//! Every failure is returned as data; nothing panics past the store boundary.

use thiserror::Error;

/// The primary error type for all nd-core operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record not found (e.g., Article, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Caller-supplied fields failed shape checks (e.g., title too short)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A slot holds a value that no longer parses as its record type.
    /// The slot is left as-is so the data can still be recovered by hand.
    #[error("slot `{slot}` holds malformed data: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    /// The slot backend failed (e.g., disk full, permission denied)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Anything else (e.g., a record that refuses to serialize)
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }

    /// True for the error kinds a caller can fix by changing its input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(..) | Self::ValidationError(_))
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unavailable(format!("{err:#}"))
    }
}

/// A specialized Result type for Newsdesk store logic.
pub type Result<T> = std::result::Result<T, StoreError>;
