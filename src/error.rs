//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
///
/// Missing or expired keys are not errors: lookups return absent instead.
/// The enum is `Clone` so a single producer failure can be handed to every
/// waiter of the same in-flight computation.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// The wrapped asynchronous producer failed; never cached
    #[error("producer failed for key '{key}': {cause}")]
    ProducerFailed {
        key: String,
        cause: Arc<anyhow::Error>,
    },

    /// No cache registered under the requested name
    #[error("unknown cache: {0}")]
    UnknownCache(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Wraps a producer error for the given key.
    pub fn producer(key: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::ProducerFailed {
            key: key.into(),
            cause: Arc::new(cause),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::ProducerFailed { .. } => StatusCode::BAD_GATEWAY,
            CacheError::UnknownCache(_) => StatusCode::NOT_FOUND,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_error_display_keeps_source() {
        let err = CacheError::producer("en->fr:hello", anyhow::anyhow!("upstream returned 503"));
        let message = err.to_string();
        assert!(message.contains("en->fr:hello"));
        assert!(message.contains("upstream returned 503"));
    }

    #[test]
    fn test_producer_error_is_cloneable() {
        let err = CacheError::producer("k", anyhow::anyhow!("boom"));
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (
                CacheError::producer("k", anyhow::anyhow!("boom")),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CacheError::UnknownCache("songs".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                CacheError::Internal("broken".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }
}
