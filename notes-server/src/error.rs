//! Error types for the notes service
//!
//! All errors use thiserror for structured error handling.
//! These errors are serialized as their display string for HTTP clients.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected input; nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for failures of the backing store rather than of the request.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::Redis(_) | AppError::Store(_))
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::Validation("empty text".to_string());
        assert_eq!(serde_json::to_string(&err).unwrap(), r#""empty text""#);

        let err = AppError::Store("connection refused".to_string());
        assert_eq!(
            serde_json::json!({ "error": err }),
            serde_json::json!({ "error": "Store error: connection refused" })
        );
    }

    #[test]
    fn test_store_failures_are_classified() {
        assert!(AppError::Store("down".to_string()).is_store_unavailable());
        assert!(!AppError::Validation("empty text".to_string()).is_store_unavailable());
        assert!(!AppError::Config("bad".to_string()).is_store_unavailable());
    }
}
