//! # Domain Services
//!
//! Stateless domain computations.
//!
//! - [`distance`]: haversine distance
//! - [`day_label`]: matching API day labels against calendar dates

pub mod day_label;
pub mod distance;

pub use day_label::{matches_date_label, normalize_day_label, render_day_label};
pub use distance::{EARTH_RADIUS_KM, compute_distance, distance_between, haversine_km};
