//! # Application Layer
//!
//! Ranking, filtering and menu aggregation, plus the use case tying them to
//! the API.

pub mod error;
pub mod services;
pub mod use_cases;
pub mod view_state;

pub use error::{ApplicationError, ApplicationResult};
pub use view_state::ViewState;
