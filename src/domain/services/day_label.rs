//! # Day Labels
//!
//! The menu API identifies days by long-form labels such as
//! `"Monday 4 March"` instead of ISO dates. This module renders a calendar
//! date in the same English convention and compares labels after
//! normalization: commas removed, runs of whitespace collapsed to one space,
//! surrounding whitespace trimmed. The comparison itself is exact.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use menu_finder::domain::services::day_label::{matches_date_label, render_day_label};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! assert_eq!(render_day_label(date), "Monday 4 March");
//! assert!(matches_date_label("Monday, 4 March", date));
//! assert!(!matches_date_label("Tuesday 5 March", date));
//! ```

use chrono::NaiveDate;

/// Weekday, unpadded day of month, month name.
const DAY_LABEL_FORMAT: &str = "%A %-d %B";

/// Renders `date` as the API renders day labels.
#[must_use]
pub fn render_day_label(date: NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

/// Strips commas and collapses whitespace.
#[must_use]
pub fn normalize_day_label(label: &str) -> String {
    label
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true if `day_label` denotes `target_date`.
#[must_use]
pub fn matches_date_label(day_label: &str, target_date: NaiveDate) -> bool {
    normalize_day_label(day_label) == normalize_day_label(&render_day_label(target_date))
}
