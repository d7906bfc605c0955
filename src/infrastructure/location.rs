//! # User Location
//!
//! Port for obtaining the user's position, plus simple providers.
//!
//! A failed lookup never stops restaurant loading; it only disables
//! distance sorting.

use crate::domain::value_objects::Coordinate;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Why the user's position is not available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused to share a position.
    #[error("location permission denied: {0}")]
    PermissionDenied(String),

    /// No position source is available.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    /// The lookup took too long.
    #[error("location request timed out: {0}")]
    Timeout(String),

    /// Any other failure.
    #[error("unknown location error: {0}")]
    Unknown(String),
}

/// Source of the user's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync + fmt::Debug {
    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`LocationError`] describing why no position is available.
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Provider returning a configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(Coordinate);

impl FixedLocation {
    /// Creates a provider that always reports `coordinate`.
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self(coordinate)
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Provider used when no position has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable(
            "no location configured".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_location_reports_coordinate() {
        let c = Coordinate::new(60.17, 24.94).unwrap();
        assert_eq!(FixedLocation::new(c).current_location().await, Ok(c));
    }

    #[tokio::test]
    async fn no_location_is_unavailable() {
        let err = NoLocation.current_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable(_)));
        assert!(err.to_string().contains("no location configured"));
    }
}
