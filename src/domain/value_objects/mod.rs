//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`RestaurantId`]: opaque restaurant identifier
//! - [`Coordinate`]: validated latitude/longitude
//! - [`DietTags`]: canonical diet-tag set
//! - [`LanguageCode`]: menu language

pub mod coordinate;
pub mod diet_tags;
pub mod ids;
pub mod language;

pub use coordinate::{Coordinate, CoordinateError};
pub use diet_tags::DietTags;
pub use ids::RestaurantId;
pub use language::{LanguageCode, UnsupportedLanguageError};
