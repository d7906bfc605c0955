//! # Application Errors
//!
//! Error types for the application layer.
//!
//! ```text
//! ApplicationError
//! ├── Api(ApiError)                 - Fatal API failures (restaurant list)
//! ├── Coordinate(CoordinateError)   - Invalid user-supplied position
//! ├── Configuration(String)         - Configuration loading failures
//! ├── Validation(String)            - Input validation failures
//! └── NotFound                      - Unknown restaurant
//! ```
//!
//! Per-restaurant menu failures and location failures are recovered where
//! they happen and never surface here.
//!
//! # Examples
//!
//! ```
//! use menu_finder::application::error::ApplicationError;
//! use menu_finder::infrastructure::api::ApiError;
//!
//! let err: ApplicationError = ApiError::format("expected an array").into();
//! assert!(err.is_format_error());
//!
//! let err = ApplicationError::not_found("restaurant", "abc");
//! assert_eq!(err.to_string(), "not found: restaurant with id abc");
//! ```

use crate::domain::value_objects::CoordinateError;
use crate::infrastructure::api::error::ApiError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// API failure on a path where it cannot be recovered.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Invalid coordinate.
    #[error("coordinate error: {0}")]
    Coordinate(#[from] CoordinateError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },
}

impl ApplicationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns true for transport or HTTP failures.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_network_error())
    }

    /// Returns true if a response had an unexpected shape.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_format_error())
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(error: config::ConfigError) -> Self {
        Self::Configuration(error.to_string())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
