//! Error Handling
//!
//! Unified error type for the router. Every layer returns an explicit
//! `RouterResult`; the process entry point converts any error into an
//! empty emission and a zero exit, so no failure ever reaches the host.

use thiserror::Error;

/// Router-wide error type
#[derive(Error, Debug)]
pub enum RouterError {
    /// The stdin envelope is not valid JSON or lacks a usable prompt
    #[error("Malformed hook input: {0}")]
    InputMalformed(String),

    /// Network failure or timeout while talking to the registry
    #[error("Registry unavailable: {0}")]
    NetworkUnavailable(String),

    /// A requested registry document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The registry returned a document that does not match the schema
    #[error("Malformed registry document: {0}")]
    Malformed(String),

    /// A fetched skill body does not hash to the descriptor's body_hash
    #[error("Integrity mismatch for skill '{id}': expected {expected}, got {actual}")]
    IntegrityMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    /// A cache file is unreadable or fails to parse
    #[error("Cache corrupt: {0}")]
    CacheCorrupt(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for router errors
pub type RouterResult<T> = Result<T, RouterError>;

impl RouterError {
    /// Create an input-malformed error
    pub fn input_malformed(msg: impl Into<String>) -> Self {
        Self::InputMalformed(msg.into())
    }

    /// Create a network-unavailable error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkUnavailable(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a malformed-document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create an integrity-mismatch error
    pub fn integrity_mismatch(
        id: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::IntegrityMismatch {
            id: id.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a cache-corrupt error
    pub fn cache_corrupt(msg: impl Into<String>) -> Self {
        Self::CacheCorrupt(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::network("connect refused");
        assert_eq!(err.to_string(), "Registry unavailable: connect refused");
    }

    #[test]
    fn test_integrity_mismatch_display() {
        let err = RouterError::integrity_mismatch("code-review", "abc", "def");
        let msg = err.to_string();
        assert!(msg.contains("code-review"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("def"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RouterError = io_err.into();
        assert!(matches!(err, RouterError::Io(_)));
    }
}
