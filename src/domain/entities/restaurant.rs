//! # Restaurant Entity
//!
//! A restaurant from the directory, enriched with its distance from the user
//! and the outcome of its menu fetch.
//!
//! The menu outcome is a single [`MenuState`] so that a fulfilled restaurant
//! always has menu data and a rejected one always has an error record.
//!
//! # Examples
//!
//! ```
//! use menu_finder::domain::entities::{FetchStatus, Restaurant, WeeklyMenu};
//! use menu_finder::domain::value_objects::RestaurantId;
//!
//! let mut restaurant = Restaurant::new(RestaurantId::new("r1"), "Kitchen", "Street 1", "Espoo");
//! assert_eq!(restaurant.status(), FetchStatus::Pending);
//!
//! restaurant.settle_menu(Ok(WeeklyMenu::empty()));
//! assert_eq!(restaurant.status(), FetchStatus::Fulfilled);
//! assert!(restaurant.menu().is_some());
//! ```

use crate::domain::entities::menu::WeeklyMenu;
use crate::domain::value_objects::{Coordinate, RestaurantId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle of a restaurant's menu fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Fetch not settled yet.
    Pending,
    /// Menu data is available (possibly with zero days).
    Fulfilled,
    /// The fetch failed; an error record is available.
    Rejected,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Category of a failed menu fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuErrorKind {
    /// Transport or HTTP failure.
    Network,
    /// The response did not have the expected shape.
    Format,
    /// The fetch exceeded its time limit.
    Timeout,
    /// The batch was cancelled before this fetch settled.
    Cancelled,
    /// The fetch task failed unexpectedly.
    Internal,
}

impl fmt::Display for MenuErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Format => write!(f, "format error"),
            Self::Timeout => write!(f, "timeout"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

/// Error record attached to a rejected restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct MenuFetchError {
    /// Error category.
    pub kind: MenuErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl MenuFetchError {
    /// Creates a new error record.
    #[must_use]
    pub fn new(kind: MenuErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error for a fetch abandoned by batch cancellation.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(MenuErrorKind::Cancelled, "menu batch cancelled")
    }
}

/// Menu fetch outcome for a restaurant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum MenuState {
    /// Not settled yet.
    #[default]
    Pending,
    /// Menu data returned by the API.
    Fulfilled(WeeklyMenu),
    /// The fetch failed.
    Rejected(MenuFetchError),
}

/// A restaurant and its per-session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    id: RestaurantId,
    name: String,
    address: String,
    city: String,
    postal_code: Option<String>,
    company: Option<String>,
    phone: Option<String>,
    coordinate: Option<Coordinate>,
    distance_km: Option<f64>,
    menu: MenuState,
}

impl Restaurant {
    /// Creates a restaurant with no coordinate and a pending menu.
    #[must_use]
    pub fn new(
        id: RestaurantId,
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            city: city.into(),
            postal_code: None,
            company: None,
            phone: None,
            coordinate: None,
            distance_km: None,
            menu: MenuState::Pending,
        }
    }

    /// Sets the coordinate.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Option<Coordinate>) -> Self {
        self.coordinate = coordinate;
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: Option<String>) -> Self {
        self.postal_code = postal_code;
        self
    }

    /// Sets the operating company.
    #[must_use]
    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company = company;
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    /// Restaurant identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RestaurantId {
        &self.id
    }

    /// Display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// City.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postal code, if known.
    #[inline]
    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Operating company, if known.
    #[inline]
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Phone number, if known.
    #[inline]
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Location, if the directory provided one.
    #[inline]
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Distance from the user in kilometers; `None` without location data.
    #[inline]
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    /// Sets the computed distance. Negative or non-finite values are stored as `None`.
    pub fn set_distance(&mut self, distance_km: Option<f64>) {
        self.distance_km = distance_km.filter(|d| d.is_finite() && *d >= 0.0);
    }

    /// Menu fetch outcome.
    #[inline]
    #[must_use]
    pub fn menu_state(&self) -> &MenuState {
        &self.menu
    }

    /// Menu fetch status.
    #[must_use]
    pub fn status(&self) -> FetchStatus {
        match self.menu {
            MenuState::Pending => FetchStatus::Pending,
            MenuState::Fulfilled(_) => FetchStatus::Fulfilled,
            MenuState::Rejected(_) => FetchStatus::Rejected,
        }
    }

    /// Menu data when fulfilled.
    #[must_use]
    pub fn menu(&self) -> Option<&WeeklyMenu> {
        match &self.menu {
            MenuState::Fulfilled(menu) => Some(menu),
            _ => None,
        }
    }

    /// Error record when rejected.
    #[must_use]
    pub fn error(&self) -> Option<&MenuFetchError> {
        match &self.menu {
            MenuState::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// Records the outcome of the menu fetch.
    pub fn settle_menu(&mut self, outcome: Result<WeeklyMenu, MenuFetchError>) {
        self.menu = match outcome {
            Ok(menu) => MenuState::Fulfilled(menu),
            Err(error) => MenuState::Rejected(error),
        };
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.address, self.city)?;
        if let Some(distance) = self.distance_km {
            write!(f, " {:.2} km", distance)?;
        }
        Ok(())
    }
}
