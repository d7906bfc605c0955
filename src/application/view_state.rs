//! # View State
//!
//! Everything the host needs to render the restaurant list: the loaded
//! restaurants, the selected date, the user's position and the filter
//! inputs. The state is a plain value; operations consume it and return the
//! updated state.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use menu_finder::application::view_state::ViewState;
//! use menu_finder::domain::value_objects::DietTags;
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let state = ViewState::new(monday, Vec::new(), None)
//!     .with_diet_filter(DietTags::parse("VEG"))
//!     .with_city_filter("Helsinki");
//!
//! assert!(state.partition().is_empty());
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::menu_aggregation::AggregationSummary;
use crate::application::services::menu_filter::{FilterCriteria, FilterOutcome, apply_filters};
use crate::application::services::ranking::rank_restaurants;
use crate::domain::entities::Restaurant;
use crate::domain::value_objects::{Coordinate, DietTags, RestaurantId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Session state owned by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    selected_date: NaiveDate,
    restaurants: Vec<Restaurant>,
    fetch_order: HashMap<RestaurantId, usize>,
    user_location: Option<Coordinate>,
    diet_filter: DietTags,
    city_filter: String,
}

impl ViewState {
    /// Creates a state with no filters from restaurants in fetch order, and
    /// ranks them by distance from `user_location`.
    ///
    /// The fetch order is remembered: it breaks distance ties on every later
    /// [`ViewState::reranked`].
    #[must_use]
    pub fn new(
        selected_date: NaiveDate,
        restaurants: Vec<Restaurant>,
        user_location: Option<Coordinate>,
    ) -> Self {
        let mut fetch_order = HashMap::with_capacity(restaurants.len());
        for (index, restaurant) in restaurants.iter().enumerate() {
            fetch_order.entry(restaurant.id().clone()).or_insert(index);
        }

        Self {
            selected_date,
            restaurants: rank_restaurants(restaurants, user_location),
            fetch_order,
            user_location,
            diet_filter: DietTags::new(),
            city_filter: String::new(),
        }
    }

    /// Selected calendar date.
    #[must_use]
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Restaurants, nearest first when a location is known.
    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// User position, if known.
    #[must_use]
    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Current diet filter.
    #[must_use]
    pub fn diet_filter(&self) -> &DietTags {
        &self.diet_filter
    }

    /// Current city filter text.
    #[must_use]
    pub fn city_filter(&self) -> &str {
        &self.city_filter
    }

    /// Selects another date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = date;
        self
    }

    /// Replaces the diet filter.
    #[must_use]
    pub fn with_diet_filter(mut self, diets: DietTags) -> Self {
        self.diet_filter = diets;
        self
    }

    /// Replaces the city filter.
    #[must_use]
    pub fn with_city_filter(mut self, city: impl Into<String>) -> Self {
        self.city_filter = city.into();
        self
    }

    /// Records a new user position and re-sorts the restaurants, breaking
    /// ties by fetch order.
    #[must_use]
    pub fn reranked(mut self, user_location: Option<Coordinate>) -> Self {
        let fetch_order = &self.fetch_order;
        self.restaurants
            .sort_by_key(|r| fetch_order.get(r.id()).copied().unwrap_or(usize::MAX));
        self.user_location = user_location;
        self.restaurants = rank_restaurants(self.restaurants, user_location);
        self
    }

    /// Filter inputs as [`FilterCriteria`].
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.selected_date)
            .with_diets(self.diet_filter.clone())
            .with_city(&self.city_filter)
    }

    /// Restaurants to display, split into "has menu" and "no menu".
    #[must_use]
    pub fn partition(&self) -> FilterOutcome<'_> {
        apply_filters(&self.restaurants, &self.criteria())
    }

    /// Looks up a restaurant by id.
    #[must_use]
    pub fn restaurant(&self, id: &RestaurantId) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id() == id)
    }

    /// Like [`ViewState::restaurant`], for callers that need the restaurant.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for an unknown id.
    pub fn require_restaurant(&self, id: &RestaurantId) -> ApplicationResult<&Restaurant> {
        self.restaurant(id)
            .ok_or_else(|| ApplicationError::not_found("restaurant", id.as_str()))
    }

    /// Menu outcome counts.
    #[must_use]
    pub fn summary(&self) -> AggregationSummary {
        AggregationSummary::from_restaurants(&self.restaurants)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{Course, Day, WeeklyMenu};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn restaurant(id: &str, city: &str, lat: f64, day: &str) -> Restaurant {
        let mut r = Restaurant::new(RestaurantId::new(id), id, "address", city)
            .with_coordinate(Some(Coordinate::new(lat, 24.94).unwrap()));
        r.settle_menu(Ok(WeeklyMenu::single_day(Day::new(
            day,
            vec![Course::new("Soup", DietTags::parse("VEG"))],
        ))));
        r
    }

    fn state() -> ViewState {
        ViewState::new(
            monday(),
            vec![
                restaurant("far", "Espoo", 61.0, "Monday 4 March"),
                restaurant("near", "Helsinki", 60.17, "Tuesday 5 March"),
            ],
            None,
        )
    }

    #[test]
    fn date_selection_changes_partition() {
        let state = state();
        let ids: Vec<_> = state.partition().with_menu.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["far"]);

        let tuesday = state.with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let ids: Vec<_> = tuesday.partition().with_menu.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn reranking_orders_by_new_location() {
        let user = Coordinate::new(60.169, 24.938).unwrap();
        let state = state().reranked(Some(user));
        assert_eq!(state.restaurants()[0].id().as_str(), "near");
        assert_eq!(state.user_location(), Some(user));
    }

    #[test]
    fn criteria_reflects_filters() {
        let criteria = state()
            .with_diet_filter(DietTags::parse("g"))
            .with_city_filter(" Espoo ")
            .criteria();
        assert_eq!(criteria.city.as_deref(), Some("espoo"));
        assert!(criteria.diets.contains("G"));
    }

    #[test]
    fn lookup_and_summary() {
        let state = state();
        assert!(state.restaurant(&RestaurantId::new("near")).is_some());
        assert!(state.restaurant(&RestaurantId::new("missing")).is_none());
        assert_eq!(state.summary().fulfilled, 2);
    }

    #[test]
    fn reranking_breaks_ties_by_fetch_order() {
        let user = Coordinate::new(60.169, 24.938).unwrap();
        let ranked = ViewState::new(
            monday(),
            vec![
                restaurant("a", "Espoo", 61.0, "Monday 4 March"),
                restaurant("b", "Helsinki", 60.17, "Monday 4 March"),
            ],
            Some(user),
        );
        let ids: Vec<_> = ranked.restaurants().iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let unranked = ranked.reranked(None);
        let ids: Vec<_> = unranked.restaurants().iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(unranked.restaurants().iter().all(|r| r.distance_km().is_none()));

        let same_spot = Coordinate::new(60.17, 24.94).unwrap();
        let tied = ViewState::new(
            monday(),
            vec![
                restaurant("x", "Helsinki", 60.17, "Monday 4 March"),
                restaurant("y", "Helsinki", 60.17, "Monday 4 March"),
            ],
            None,
        )
        .reranked(Some(user))
        .reranked(Some(same_spot));
        let ids: Vec<_> = tied.restaurants().iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn require_restaurant_reports_unknown_id() {
        let state = state();
        assert!(state.require_restaurant(&RestaurantId::new("far")).is_ok());
        let err = state
            .require_restaurant(&RestaurantId::new("missing"))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
