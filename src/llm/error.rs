//! Typed errors for LLM operations
//!
//! Lets the HTTP boundary log a precise cause while still answering with a
//! generic failure.

use thiserror::Error;

/// LLM operation errors with typed variants
#[derive(Debug, Error)]
pub enum LlmError {
    /// Malformed request (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Model or endpoint not found (HTTP 404), usually a model that was never pulled
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side error (HTTP 5xx)
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered 2xx but the body did not parse
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Other errors not fitting the above categories
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl LlmError {
    /// Convert HTTP status code and error text into typed LlmError
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            400 => LlmError::BadRequest(error_text),
            404 => LlmError::NotFound(error_text),
            500..=599 => LlmError::ServiceError(error_text),
            _ => LlmError::Other(anyhow::anyhow!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Convert network/connection errors into typed LlmError
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            LlmError::Network(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            LlmError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            LlmError::Other(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        let err = LlmError::from_http_status(
            reqwest::StatusCode::NOT_FOUND,
            "model 'mistral' not found".to_string(),
        );
        assert!(matches!(err, LlmError::NotFound(_)));

        let err = LlmError::from_http_status(
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream down".to_string(),
        );
        assert!(matches!(err, LlmError::ServiceError(_)));

        let err =
            LlmError::from_http_status(reqwest::StatusCode::BAD_REQUEST, "bad".to_string());
        assert!(matches!(err, LlmError::BadRequest(_)));
    }

    #[test]
    fn test_unmapped_status_is_other() {
        let err = LlmError::from_http_status(
            reqwest::StatusCode::IM_A_TEAPOT,
            "short and stout".to_string(),
        );
        assert!(matches!(err, LlmError::Other(_)));
        assert!(err.to_string().contains("418"));
    }
}
