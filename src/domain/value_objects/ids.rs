//! # Identifiers
//!
//! String-based identifiers used by the restaurant API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a restaurant as issued by the restaurant API.
///
/// The API uses opaque strings (MongoDB object ids), so no format is
/// enforced beyond being non-empty when created through [`RestaurantId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Creates a new restaurant identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an identifier from user input, rejecting blank values.
    ///
    /// The value is trimmed before it is stored.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RestaurantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
