//! # Domain Entities
//!
//! - [`Restaurant`]: directory entry with distance and menu outcome
//! - [`WeeklyMenu`], [`Day`], [`Course`]: menu structure

pub mod menu;
pub mod restaurant;

pub use menu::{Course, Day, WeeklyMenu};
pub use restaurant::{FetchStatus, MenuErrorKind, MenuFetchError, MenuState, Restaurant};
