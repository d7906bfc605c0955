//! # Configuration
//!
//! Layered settings: built-in defaults, then an optional TOML file, then
//! `MENU_FINDER_*` environment variables (nested keys separated by `__`,
//! e.g. `MENU_FINDER_API__BASE_URL`).
//!
//! ```toml
//! [api]
//! base_url = "https://media2.edu.metropolia.fi/restaurant/"
//! timeout_ms = 10000
//! language = "en"
//! menu_endpoint = "weekly"
//!
//! [aggregation]
//! per_restaurant_timeout_ms = 8000
//!
//! [location]
//! latitude = 60.169
//! longitude = 24.938
//!
//! [session]
//! token_path = ".menu-finder-token"
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::menu_aggregation::AggregationConfig;
use crate::domain::value_objects::{Coordinate, LanguageCode};
use crate::infrastructure::api::error::ApiResult;
use crate::infrastructure::api::http_client::HttpClient;
use crate::infrastructure::api::restaurant_client::MenuEndpoint;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://media2.edu.metropolia.fi/restaurant/";

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable prefix.
const ENV_PREFIX: &str = "MENU_FINDER";

/// Restaurant API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root URL.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout_ms: u64,
    /// Menu language.
    pub language: LanguageCode,
    /// Weekly or daily menus.
    pub menu_endpoint: MenuEndpoint,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            language: LanguageCode::default(),
            menu_endpoint: MenuEndpoint::default(),
        }
    }
}

/// Menu batch settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Per-restaurant timeout; unset waits for the HTTP timeout only.
    pub per_restaurant_timeout_ms: Option<u64>,
}

/// Fixed user position, used when no live position source exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
}

/// Login session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the bearer token.
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(".menu-finder-token"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API settings.
    pub api: ApiConfig,
    /// Menu batch settings.
    pub aggregation: AggregationSettings,
    /// User position.
    pub location: LocationConfig,
    /// Login session.
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads defaults, the optional file at `path`, then the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be read
    /// or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parses configuration from TOML text, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for invalid TOML or values.
    pub fn from_toml_str(toml: &str) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Settings for the [`crate::application::services::MenuAggregator`].
    #[must_use]
    pub fn aggregation_config(&self) -> AggregationConfig {
        let config = AggregationConfig::with_language(self.api.language);
        match self.aggregation.per_restaurant_timeout_ms {
            Some(ms) => config.with_per_restaurant_timeout(ms),
            None => config,
        }
    }

    /// The configured user position.
    ///
    /// # Errors
    ///
    /// Returns a validation error if only one of latitude/longitude is set,
    /// and a coordinate error if the values are out of range.
    pub fn user_location(&self) -> ApplicationResult<Option<Coordinate>> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinate::new(lat, lng)?)),
            (None, None) => Ok(None),
            _ => Err(ApplicationError::validation(
                "location needs both latitude and longitude",
            )),
        }
    }

    /// Builds the HTTP client for the API.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the base URL is invalid.
    pub fn http_client(&self) -> ApiResult<HttpClient> {
        HttpClient::new(&self.api.base_url, self.api.timeout_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.language, LanguageCode::En);
        assert_eq!(config.api.menu_endpoint, MenuEndpoint::Weekly);
        assert_eq!(config.aggregation_config().per_restaurant_timeout_ms, None);
        assert_eq!(config.user_location().unwrap(), None);
    }

    #[test]
    fn parses_toml_with_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            language = "fi"
            menu_endpoint = "daily"

            [aggregation]
            per_restaurant_timeout_ms = 2500

            [location]
            latitude = 60.169
            longitude = 24.938
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.api.menu_endpoint, MenuEndpoint::Daily);

        let aggregation = config.aggregation_config();
        assert_eq!(aggregation.language, LanguageCode::Fi);
        assert_eq!(aggregation.per_restaurant_timeout_ms, Some(2500));

        let location = config.user_location().unwrap().unwrap();
        assert!((location.latitude() - 60.169).abs() < f64::EPSILON);
    }

    #[test]
    fn half_a_location_is_invalid() {
        let config = AppConfig::from_toml_str("[location]\nlatitude = 60.0\n").unwrap();
        assert!(matches!(
            config.user_location(),
            Err(ApplicationError::Validation(_))
        ));
    }

    #[test]
    fn out_of_range_location_is_invalid() {
        let config =
            AppConfig::from_toml_str("[location]\nlatitude = 95.0\nlongitude = 0.0\n").unwrap();
        assert!(matches!(
            config.user_location(),
            Err(ApplicationError::Coordinate(_))
        ));
    }

    #[test]
    fn unknown_language_is_a_configuration_error() {
        let err = AppConfig::from_toml_str("[api]\nlanguage = \"sv\"\n").unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = AppConfig::load(Some(Path::new("definitely-missing-menu-finder.toml")));
        assert!(config.is_ok());
    }
}
