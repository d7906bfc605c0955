//! # Load Session Use Case
//!
//! Builds the initial [`ViewState`]:
//!
//! 1. Locate the user and fetch the restaurant list concurrently
//! 2. Fail if the restaurant list cannot be fetched
//! 3. Continue without distances if the user cannot be located
//! 4. Fetch all menus through the [`MenuAggregator`]
//! 5. Rank restaurants by distance
//!
//! [`LoadSessionUseCase::load_restaurant`] does the same for a single
//! restaurant looked up by id.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::menu_aggregation::MenuAggregator;
use crate::application::view_state::ViewState;
use crate::domain::entities::Restaurant;
use crate::domain::services::distance::distance_between;
use crate::domain::value_objects::{Coordinate, RestaurantId};
use crate::infrastructure::api::traits::RestaurantDirectory;
use crate::infrastructure::location::LocationProvider;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Loads restaurants, menus and the user's position into a [`ViewState`].
#[derive(Debug, Clone)]
pub struct LoadSessionUseCase {
    directory: Arc<dyn RestaurantDirectory>,
    aggregator: MenuAggregator,
    location: Arc<dyn LocationProvider>,
}

impl LoadSessionUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(
        directory: Arc<dyn RestaurantDirectory>,
        aggregator: MenuAggregator,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            directory,
            aggregator,
            location,
        }
    }

    /// Loads the session for `selected_date`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Api` if the restaurant list cannot be
    /// fetched. Menu and location failures are not errors.
    pub async fn execute(&self, selected_date: NaiveDate) -> ApplicationResult<ViewState> {
        self.run(selected_date, None).await
    }

    /// Like [`LoadSessionUseCase::execute`], with a cancellable menu batch.
    ///
    /// # Errors
    ///
    /// Same as [`LoadSessionUseCase::execute`].
    pub async fn execute_with_cancel(
        &self,
        selected_date: NaiveDate,
        cancel: &CancellationToken,
    ) -> ApplicationResult<ViewState> {
        self.run(selected_date, Some(cancel)).await
    }

    /// Loads one restaurant with its menu and distance, without touching the
    /// rest of the directory.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the API does not know `id`,
    /// and `ApplicationError::Api` for other restaurant lookup failures. A
    /// failed menu fetch is recorded on the restaurant instead.
    pub async fn load_restaurant(&self, id: &RestaurantId) -> ApplicationResult<Restaurant> {
        let (user_location, restaurant) =
            tokio::join!(self.locate_user(), self.directory.fetch_restaurant(id));

        let restaurant = restaurant.map_err(|e| {
            if e.is_not_found() {
                ApplicationError::not_found("restaurant", id.as_str())
            } else {
                tracing::error!(restaurant = %id, error = %e, "failed to fetch restaurant");
                ApplicationError::from(e)
            }
        })?;

        let mut restaurant = self
            .aggregator
            .fetch_all_menus(vec![restaurant])
            .await
            .pop()
            .ok_or_else(|| ApplicationError::not_found("restaurant", id.as_str()))?;
        restaurant.set_distance(distance_between(user_location, restaurant.coordinate()));
        Ok(restaurant)
    }

    async fn run(
        &self,
        selected_date: NaiveDate,
        cancel: Option<&CancellationToken>,
    ) -> ApplicationResult<ViewState> {
        let (user_location, restaurants) =
            tokio::join!(self.locate_user(), self.directory.fetch_restaurants());

        let restaurants = restaurants.inspect_err(|e| {
            tracing::error!(error = %e, "failed to fetch restaurant list");
        })?;
        tracing::info!(count = restaurants.len(), "restaurant list loaded");

        let restaurants = match cancel {
            Some(token) => {
                self.aggregator
                    .fetch_all_menus_with_cancel(restaurants, token)
                    .await
            }
            None => self.aggregator.fetch_all_menus(restaurants).await,
        };

        Ok(ViewState::new(selected_date, restaurants, user_location))
    }

    async fn locate_user(&self) -> Option<Coordinate> {
        match self.location.current_location().await {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                tracing::warn!(error = %e, "user location unavailable, distance sorting disabled");
                None
            }
        }
    }
}
