//! # Restaurant API Client
//!
//! REST implementation of [`RestaurantDirectory`] and [`MenuProvider`].
//!
//! Endpoints (relative to the configured base URL):
//! - `api/v1/restaurants`
//! - `api/v1/restaurants/{id}`
//! - `api/v1/restaurants/weekly/{id}/{lang}`
//! - `api/v1/restaurants/daily/{id}/{lang}`
//!
//! Menu requests answered with 404 or a 5xx status yield an empty menu.
//! The daily endpoint has no date information, so its courses are wrapped in
//! a single day labelled with today's date.

use crate::domain::entities::{Course, Day, Restaurant, WeeklyMenu};
use crate::domain::services::day_label::render_day_label;
use crate::domain::value_objects::{LanguageCode, RestaurantId};
use crate::infrastructure::api::dto::{RestaurantRecord, parse_restaurant_list};
use crate::infrastructure::api::error::{ApiError, ApiResult};
use crate::infrastructure::api::http_client::HttpClient;
use crate::infrastructure::api::traits::{MenuProvider, RestaurantDirectory};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which menu endpoint to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuEndpoint {
    /// Whole week, one entry per day.
    #[default]
    Weekly,
    /// Today only.
    Daily,
}

/// Client for the restaurant endpoints.
#[derive(Debug, Clone)]
pub struct RestaurantApiClient {
    http: HttpClient,
    menu_endpoint: MenuEndpoint,
}

impl RestaurantApiClient {
    /// Creates a client reading weekly menus.
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            menu_endpoint: MenuEndpoint::Weekly,
        }
    }

    /// Selects the menu endpoint.
    #[must_use]
    pub fn with_menu_endpoint(mut self, menu_endpoint: MenuEndpoint) -> Self {
        self.menu_endpoint = menu_endpoint;
        self
    }

    /// Returns the selected menu endpoint.
    #[must_use]
    pub fn menu_endpoint(&self) -> MenuEndpoint {
        self.menu_endpoint
    }

    /// Fetches the weekly menu.
    ///
    /// # Errors
    ///
    /// Returns transport failures, statuses other than 404/5xx, and bodies
    /// that are not JSON.
    pub async fn weekly_menu(
        &self,
        id: &RestaurantId,
        language: LanguageCode,
    ) -> ApiResult<WeeklyMenu> {
        let Some(payload) = self
            .menu_payload(id, "api/v1/restaurants/weekly", language)
            .await?
        else {
            return Ok(WeeklyMenu::empty());
        };

        match payload.get("days") {
            Some(Value::Array(_)) => serde_json::from_value(payload)
                .map_err(|e| ApiError::format(format!("Invalid weekly menu: {}", e))),
            _ => {
                tracing::warn!(restaurant = %id, "unexpected weekly menu structure");
                Ok(WeeklyMenu::empty())
            }
        }
    }

    /// Fetches today's menu as a one-day weekly menu labelled for `today`.
    ///
    /// # Errors
    ///
    /// Same as [`RestaurantApiClient::weekly_menu`].
    pub async fn daily_menu(
        &self,
        id: &RestaurantId,
        language: LanguageCode,
        today: NaiveDate,
    ) -> ApiResult<WeeklyMenu> {
        let Some(mut payload) = self
            .menu_payload(id, "api/v1/restaurants/daily", language)
            .await?
        else {
            return Ok(WeeklyMenu::empty());
        };

        match payload.get_mut("courses").map(Value::take) {
            Some(courses @ Value::Array(_)) => {
                let courses: Vec<Course> = serde_json::from_value(courses)
                    .map_err(|e| ApiError::format(format!("Invalid daily menu: {}", e)))?;
                Ok(WeeklyMenu::single_day(Day::new(
                    render_day_label(today),
                    courses,
                )))
            }
            _ => {
                tracing::warn!(restaurant = %id, "unexpected daily menu structure");
                Ok(WeeklyMenu::empty())
            }
        }
    }

    /// `Ok(None)` means the API has no menu for this restaurant.
    async fn menu_payload(
        &self,
        id: &RestaurantId,
        path: &str,
        language: LanguageCode,
    ) -> ApiResult<Option<Value>> {
        match self
            .http
            .get_with_params::<Value>(path, &[id.as_str(), language.as_str()])
            .await
        {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(restaurant = %id, "menu not found");
                Ok(None)
            }
            Err(e) if e.is_server_error() => {
                tracing::warn!(restaurant = %id, error = %e, "menu unavailable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RestaurantDirectory for RestaurantApiClient {
    async fn fetch_restaurants(&self) -> ApiResult<Vec<Restaurant>> {
        let payload: Value = self.http.get("api/v1/restaurants").await?;
        let records = parse_restaurant_list(payload)?;
        tracing::debug!(count = records.len(), "fetched restaurant list");
        Ok(records.into_iter().map(Restaurant::from).collect())
    }

    async fn fetch_restaurant(&self, id: &RestaurantId) -> ApiResult<Restaurant> {
        let record: RestaurantRecord = self
            .http
            .get_with_params("api/v1/restaurants", &[id.as_str()])
            .await?;
        Ok(Restaurant::from(record))
    }
}

#[async_trait]
impl MenuProvider for RestaurantApiClient {
    async fn fetch_menu(
        &self,
        id: &RestaurantId,
        language: LanguageCode,
    ) -> ApiResult<WeeklyMenu> {
        match self.menu_endpoint {
            MenuEndpoint::Weekly => self.weekly_menu(id, language).await,
            MenuEndpoint::Daily => {
                self.daily_menu(id, language, Local::now().date_naive())
                    .await
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_weekly() {
        let http = HttpClient::new("https://example.com/restaurant/", 1000).unwrap();
        let client = RestaurantApiClient::new(http);
        assert_eq!(client.menu_endpoint(), MenuEndpoint::Weekly);

        let client = client.with_menu_endpoint(MenuEndpoint::Daily);
        assert_eq!(client.menu_endpoint(), MenuEndpoint::Daily);
    }

    #[test]
    fn menu_endpoint_serde() {
        let endpoint: MenuEndpoint = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(endpoint, MenuEndpoint::Daily);
    }
}
