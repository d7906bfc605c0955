//! # API Errors
//!
//! Error types for calls to the restaurant API.
//!
//! # Examples
//!
//! ```
//! use menu_finder::infrastructure::api::error::ApiError;
//!
//! let error = ApiError::status(404, "not found");
//! assert!(error.is_not_found());
//! assert!(error.is_network_error());
//!
//! let error = ApiError::format("expected an array");
//! assert!(error.is_format_error());
//! ```

use crate::domain::entities::{MenuErrorKind, MenuFetchError};
use thiserror::Error;

/// Error type for restaurant API operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection or transport failure.
    #[error("network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Non-success HTTP status.
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message, usually the server's `message` field.
        message: String,
    },

    /// Missing, invalid or rejected credentials.
    #[error("authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Response body does not match the expected shape.
    #[error("format error: {message}")]
    Format {
        /// Error message.
        message: String,
    },

    /// Operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// Client-side failure unrelated to the server.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ApiError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a format error.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true for transport and HTTP failures.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Status { .. }
                | Self::Authentication { .. }
        )
    }

    /// Returns true if the response had an unexpected shape.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns true for HTTP 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns true for HTTP 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (500..600).contains(status))
    }

    /// Returns the HTTP status, if this error carries one.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<&ApiError> for MenuFetchError {
    fn from(error: &ApiError) -> Self {
        let kind = match error {
            ApiError::Timeout { .. } => MenuErrorKind::Timeout,
            ApiError::Format { .. } => MenuErrorKind::Format,
            ApiError::Cancelled => MenuErrorKind::Cancelled,
            ApiError::Internal { .. } => MenuErrorKind::Internal,
            ApiError::Network { .. } | ApiError::Status { .. } | ApiError::Authentication { .. } => {
                MenuErrorKind::Network
            }
        };
        MenuFetchError::new(kind, error.to_string())
    }
}

impl From<ApiError> for MenuFetchError {
    fn from(error: ApiError) -> Self {
        Self::from(&error)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
