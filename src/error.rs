//! Error types for gitlab-audit
//!
//! This module defines the error hierarchy for:
//! - Remote API failures (transport, HTTP status, body decoding)
//! - Configuration and CLI errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors carry the failing URL so the operator can see which call
//!   aborted the run
//! - No retries anywhere: the first remote failure is fatal for the run

use thiserror::Error;

/// Top-level error type for the audit application
#[derive(Error, Debug)]
pub enum AuditError {
    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task queue closed unexpectedly
    #[error("Task queue closed unexpectedly")]
    QueueClosed,
}

/// Errors from the remote GitLab API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("'{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Pagination header present but not a page number
    #[error("unparsable '{header}' header from '{url}': {value:?}")]
    PageHeader {
        url: String,
        header: &'static str,
        value: String,
    },

    /// Failed to construct the HTTP client
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Access token missing or blank
    #[error("access token must not be empty")]
    EmptyToken,

    /// Root group id missing or blank
    #[error("root group must not be empty")]
    EmptyGroup,

    /// Invalid concurrency budget
    #[error("invalid concurrency {count}: must be between 1 and {max}")]
    InvalidConcurrency { count: usize, max: usize },

    /// Invalid page size
    #[error("invalid page size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: u32, max: u32 },

    /// Invalid task queue size
    #[error("invalid queue size {size}: must be at least {min}")]
    InvalidQueueSize { size: usize, min: usize },

    /// Base URL did not parse
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Result type alias for AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for ApiError
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let api_err = ApiError::Status {
            url: "https://gitlab.example.com/api/v4/groups/1".into(),
            status: 503,
        };
        let audit_err: AuditError = api_err.into();
        assert!(matches!(audit_err, AuditError::Api(_)));

        let cfg_err = ConfigError::EmptyToken;
        let audit_err: AuditError = cfg_err.into();
        assert!(matches!(audit_err, AuditError::Config(_)));
    }

    #[test]
    fn test_error_display_carries_url() {
        let err = ApiError::Status {
            url: "https://gitlab.example.com/api/v4/groups/1/members".into(),
            status: 401,
        };
        let text = err.to_string();
        assert!(text.contains("/groups/1/members"));
        assert!(text.contains("401"));
    }
}
