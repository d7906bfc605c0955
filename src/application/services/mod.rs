//! # Application Services
//!
//! - [`MenuAggregator`]: concurrent menu retrieval
//! - [`rank_restaurants`]: distance ranking
//! - [`apply_filters`]: date/diet/city filtering

pub mod menu_aggregation;
pub mod menu_filter;
pub mod ranking;

pub use menu_aggregation::{AggregationConfig, AggregationSummary, MenuAggregator};
pub use menu_filter::{
    FilterCriteria, FilterOutcome, apply_filters, select_day_menu, visible_courses,
};
pub use ranking::{compare_distance, rank_restaurants};
