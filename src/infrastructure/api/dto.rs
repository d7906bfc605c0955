//! # API Payloads
//!
//! Wire shapes of the restaurant API and their conversion into domain types.

use crate::domain::entities::Restaurant;
use crate::domain::value_objects::{Coordinate, RestaurantId};
use crate::infrastructure::api::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GeoJSON point: `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    /// GeoJSON type, `"Point"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Longitude then latitude.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Restaurant as returned by `api/v1/restaurants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    /// Identifier (`_id` in the API, `id` accepted too).
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Operating company.
    #[serde(default)]
    pub company: Option<String>,
    /// Location.
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl RestaurantRecord {
    fn coordinate(&self) -> Option<Coordinate> {
        let position = self.location.as_ref()?;
        match position.coordinates.as_slice() {
            [lng, lat] => match Coordinate::from_geojson([*lng, *lat]) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(restaurant = %self.id, error = %e, "ignoring invalid coordinate");
                    None
                }
            },
            _ => None,
        }
    }
}

impl From<RestaurantRecord> for Restaurant {
    fn from(record: RestaurantRecord) -> Self {
        let coordinate = record.coordinate();
        Restaurant::new(
            RestaurantId::new(record.id),
            record.name,
            record.address,
            record.city,
        )
        .with_coordinate(coordinate)
        .with_postal_code(record.postal_code)
        .with_company(record.company)
        .with_phone(record.phone)
    }
}

/// Extracts the restaurant array from either a bare array or
/// `{"restaurants": [...]}`.
///
/// # Errors
///
/// Returns `ApiError::Format` for any other shape or for entries that are
/// not restaurants.
pub fn parse_restaurant_list(payload: Value) -> ApiResult<Vec<RestaurantRecord>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("restaurants") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::format(
                    "Received unexpected data format for restaurants",
                ));
            }
        },
        _ => {
            return Err(ApiError::format(
                "Received unexpected data format for restaurants",
            ));
        }
    };

    serde_json::from_value(Value::Array(items))
        .map_err(|e| ApiError::format(format!("Invalid restaurant entry: {}", e)))
}

/// Credentials for `api/v1/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Username.
    pub username: &'a str,
    /// Password.
    pub password: &'a str,
}

/// New account for `api/v1/users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest<'a> {
    /// Username.
    pub username: &'a str,
    /// Password.
    pub password: &'a str,
    /// Email address.
    pub email: &'a str,
}

/// A user as returned by the account endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identifier.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Username.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Role, e.g. `"admin"` or `"user"`.
    #[serde(default)]
    pub role: Option<String>,
    /// Avatar file name.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Favourite restaurant id.
    #[serde(default)]
    pub favourite_restaurant: Option<String>,
}

impl UserProfile {
    /// Returns true if the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// The logged-in user.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// The created user, when echoed back.
    #[serde(default)]
    pub data: Option<UserProfile>,
}

/// Body of `api/v1/users/available/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    /// Whether the username is free.
    pub available: bool,
}
