//! # Menu Entities
//!
//! Weekly menu structure as delivered by the restaurant API.
//!
//! A [`WeeklyMenu`] is an ordered list of [`Day`]s. Each day carries the
//! API's long-form date label (for example `"Monday 4 March"`) and the
//! [`Course`]s served that day.

use crate::domain::value_objects::DietTags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dish on a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Dish name.
    pub name: String,
    /// Price as printed by the restaurant (free text, e.g. `"2,70 € / 5,10 €"`).
    #[serde(default)]
    pub price: Option<String>,
    /// Normalized diet tags.
    #[serde(default)]
    pub diets: DietTags,
}

impl Course {
    /// Creates a course without a price.
    #[must_use]
    pub fn new(name: impl Into<String>, diets: DietTags) -> Self {
        Self {
            name: name.into(),
            price: None,
            diets,
        }
    }

    /// Sets the price.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Returns true if any of the course's tags is in `filter`.
    #[must_use]
    pub fn matches_diet(&self, filter: &DietTags) -> bool {
        self.diets.intersects(filter)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.diets.is_empty() {
            write!(f, " [{}]", self.diets)?;
        }
        if let Some(price) = &self.price {
            write!(f, " {}", price)?;
        }
        Ok(())
    }
}

/// Menu for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Long-form date label, e.g. `"Monday 4 March"`.
    #[serde(rename = "date")]
    pub label: String,
    /// Courses served that day.
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Day {
    /// Creates a day menu.
    #[must_use]
    pub fn new(label: impl Into<String>, courses: Vec<Course>) -> Self {
        Self {
            label: label.into(),
            courses,
        }
    }

    /// Returns true if the day has no courses.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// A restaurant's menu for the current week.
///
/// An empty `days` list is a valid menu: the API answers "no menu" that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    /// Days in the order the API lists them.
    #[serde(default)]
    pub days: Vec<Day>,
}

impl WeeklyMenu {
    /// Creates a menu from days.
    #[must_use]
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }

    /// The "no menu" value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps a single day.
    #[must_use]
    pub fn single_day(day: Day) -> Self {
        Self { days: vec![day] }
    }

    /// Returns true if there are no days.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_weekly_payload() {
        let json = r#"{
            "days": [
                {
                    "date": "Monday 4 March",
                    "courses": [
                        {"name": "Lentil soup", "price": "2,70 €", "diets": "VEG, G"},
                        {"name": "Salmon", "diets": ["l", "g"]},
                        {"name": "Bread", "price": null, "diets": null}
                    ]
                },
                {"date": "Tuesday 5 March"}
            ]
        }"#;

        let menu: WeeklyMenu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.days.len(), 2);
        assert_eq!(menu.days[0].label, "Monday 4 March");
        assert_eq!(menu.days[0].courses.len(), 3);
        assert_eq!(menu.days[0].courses[0].price.as_deref(), Some("2,70 €"));
        assert!(menu.days[0].courses[1].diets.contains("L"));
        assert!(menu.days[0].courses[2].diets.is_empty());
        assert!(menu.days[1].is_empty());
    }

    #[test]
    fn missing_days_is_empty_menu() {
        let menu: WeeklyMenu = serde_json::from_str("{}").unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn course_display() {
        let course = Course::new("Soup", DietTags::parse("veg")).with_price("3 €");
        assert_eq!(course.to_string(), "Soup [VEG] 3 €");
        assert!(course.matches_diet(&DietTags::parse("VEG")));
    }
}
