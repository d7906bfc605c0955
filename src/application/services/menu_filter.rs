//! # Menu Filtering
//!
//! Decides which restaurants have something to show for a date.
//!
//! [`apply_filters`] partitions restaurants into two ordered buckets:
//! - `with_menu`: fulfilled, with a non-empty day matching the target date,
//!   in the requested city, and serving at least one course with a requested
//!   diet tag (when diet tags are requested)
//! - `without_menu`: in the requested city, but without a usable menu for the
//!   date (fetch failed or pending, no matching day, or an empty day)
//!
//! Restaurants outside the city filter, and restaurants with a menu but no
//! course matching the diet filter, are in neither bucket.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use menu_finder::application::services::menu_filter::{FilterCriteria, apply_filters};
//! use menu_finder::domain::value_objects::DietTags;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let criteria = FilterCriteria::new(date)
//!     .with_diets(DietTags::parse("VEG"))
//!     .with_city("helsinki");
//!
//! let outcome = apply_filters(&[], &criteria);
//! assert!(outcome.with_menu.is_empty());
//! ```

use crate::domain::entities::{Course, Day, FetchStatus, Restaurant};
use crate::domain::services::day_label::matches_date_label;
use crate::domain::value_objects::DietTags;
use chrono::NaiveDate;

/// Date, diet and city filter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Day to show menus for.
    pub target_date: NaiveDate,
    /// Requested diet tags; empty means no diet filtering.
    pub diets: DietTags,
    /// Case-insensitive city substring; `None` means any city.
    pub city: Option<String>,
}

impl FilterCriteria {
    /// Criteria matching every restaurant with a menu on `target_date`.
    #[must_use]
    pub fn new(target_date: NaiveDate) -> Self {
        Self {
            target_date,
            diets: DietTags::new(),
            city: None,
        }
    }

    /// Sets the diet filter.
    #[must_use]
    pub fn with_diets(mut self, diets: DietTags) -> Self {
        self.diets = diets;
        self
    }

    /// Sets the city filter. Blank input clears it.
    #[must_use]
    pub fn with_city(mut self, city: impl AsRef<str>) -> Self {
        self.city = normalize_city(city.as_ref());
        self
    }

    /// Returns true if `city` passes the city filter.
    #[must_use]
    pub fn matches_city(&self, city: &str) -> bool {
        self.city
            .as_deref()
            .is_none_or(|wanted| city.to_lowercase().contains(wanted))
    }
}

fn normalize_city(city: &str) -> Option<String> {
    let trimmed = city.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Result of [`apply_filters`]: both buckets keep the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome<'a> {
    /// Restaurants with a matching menu for the date.
    pub with_menu: Vec<&'a Restaurant>,
    /// Restaurants without a usable menu for the date.
    pub without_menu: Vec<&'a Restaurant>,
}

impl FilterOutcome<'_> {
    /// Total number of restaurants in both buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_menu.len() + self.without_menu.len()
    }

    /// Returns true if both buckets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the restaurant's menu for `target_date`, if fulfilled and present.
#[must_use]
pub fn select_day_menu(restaurant: &Restaurant, target_date: NaiveDate) -> Option<&Day> {
    restaurant
        .menu()?
        .days
        .iter()
        .find(|day| matches_date_label(&day.label, target_date))
}

/// Courses of `day` to display under `diets`: all of them when no diet is
/// requested, otherwise those carrying a requested tag.
pub fn visible_courses<'a>(day: &'a Day, diets: &'a DietTags) -> impl Iterator<Item = &'a Course> {
    day.courses
        .iter()
        .filter(move |course| diets.is_empty() || course.matches_diet(diets))
}

/// Partitions `restaurants` into those with and without a menu to show.
#[must_use]
pub fn apply_filters<'a>(restaurants: &'a [Restaurant], criteria: &FilterCriteria) -> FilterOutcome<'a> {
    let mut outcome = FilterOutcome::default();

    for restaurant in restaurants {
        if !criteria.matches_city(restaurant.city()) {
            continue;
        }

        let day = match restaurant.status() {
            FetchStatus::Fulfilled => select_day_menu(restaurant, criteria.target_date),
            FetchStatus::Pending | FetchStatus::Rejected => None,
        };

        match day.filter(|day| !day.is_empty()) {
            Some(day) => {
                if visible_courses(day, &criteria.diets).next().is_some() {
                    outcome.with_menu.push(restaurant);
                }
            }
            None => outcome.without_menu.push(restaurant),
        }
    }

    outcome
}
