//! # Restaurant API Ports
//!
//! Capability traits the application layer depends on. The concrete REST
//! client lives in [`crate::infrastructure::api::restaurant_client`]; tests
//! substitute their own implementations.
//!
//! # Examples
//!
//! ```ignore
//! use menu_finder::infrastructure::api::traits::MenuProvider;
//!
//! struct CannedMenus;
//!
//! #[async_trait::async_trait]
//! impl MenuProvider for CannedMenus {
//!     // ...
//! }
//! ```

use crate::domain::entities::{Restaurant, WeeklyMenu};
use crate::domain::value_objects::{LanguageCode, RestaurantId};
use crate::infrastructure::api::error::ApiResult;
use async_trait::async_trait;
use std::fmt;

/// Source of the restaurant list.
#[async_trait]
pub trait RestaurantDirectory: Send + Sync + fmt::Debug {
    /// Fetches every restaurant, in the order the API lists them.
    ///
    /// # Errors
    ///
    /// Returns a network error if the request fails and a format error if
    /// the payload is neither an array nor an object with a `restaurants`
    /// array.
    async fn fetch_restaurants(&self) -> ApiResult<Vec<Restaurant>>;

    /// Fetches a single restaurant.
    ///
    /// # Errors
    ///
    /// Returns a network error if the request fails (including 404) and a
    /// format error if the payload cannot be read.
    async fn fetch_restaurant(&self, id: &RestaurantId) -> ApiResult<Restaurant>;
}

/// Source of per-restaurant menus.
#[async_trait]
pub trait MenuProvider: Send + Sync + fmt::Debug {
    /// Fetches the menu of one restaurant.
    ///
    /// "No menu" (HTTP 404 or 5xx from the API) is an empty [`WeeklyMenu`],
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures and other unusable responses.
    async fn fetch_menu(&self, id: &RestaurantId, language: LanguageCode)
    -> ApiResult<WeeklyMenu>;
}
