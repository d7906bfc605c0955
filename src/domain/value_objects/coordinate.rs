//! # Coordinate Value Object
//!
//! Validated WGS84 latitude/longitude pair.
//!
//! # Examples
//!
//! ```
//! use menu_finder::domain::value_objects::Coordinate;
//!
//! let kamppi = Coordinate::new(60.169, 24.938).unwrap();
//! assert!((kamppi.latitude() - 60.169).abs() < f64::EPSILON);
//!
//! assert!(Coordinate::new(91.0, 0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a latitude or longitude is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}

/// A point on the earth's surface in decimal degrees.
///
/// # Invariants
///
/// - Latitude is finite and within [-90, 90]
/// - Longitude is finite and within [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either value is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a coordinate from a GeoJSON position (`[longitude, latitude]`).
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either value is out of range.
    pub fn from_geojson(position: [f64; 2]) -> Result<Self, CoordinateError> {
        let [longitude, latitude] = position;
        Self::new(latitude, longitude)
    }

    /// Latitude in degrees.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.latitude,
            lng: coordinate.longitude,
        }
    }
}
