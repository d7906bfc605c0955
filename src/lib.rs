//! # Menu Finder
//!
//! Client library for a campus restaurant API: lists restaurants, fetches
//! every menu concurrently, ranks restaurants by distance from the user and
//! filters them by date, diet and city.
//!
//! ## Layers
//!
//! - [`domain`]: restaurants, menus, coordinates, diet tags, haversine
//!   distance and day-label matching
//! - [`application`]: ranking, filtering, menu aggregation and the
//!   session-loading use case
//! - [`infrastructure`]: HTTP clients for the restaurant and account
//!   endpoints, token storage and location sources
//! - [`config`]: layered settings
//!
//! ## Example
//!
//! ```ignore
//! use menu_finder::application::services::MenuAggregator;
//! use menu_finder::application::use_cases::LoadSessionUseCase;
//! use menu_finder::config::AppConfig;
//! use menu_finder::infrastructure::api::RestaurantApiClient;
//! use menu_finder::infrastructure::location::NoLocation;
//! use std::sync::Arc;
//!
//! let config = AppConfig::load(None)?;
//! let client = Arc::new(RestaurantApiClient::new(config.http_client()?));
//! let aggregator = MenuAggregator::new(client.clone(), config.aggregation_config());
//! let session = LoadSessionUseCase::new(client, aggregator, Arc::new(NoLocation));
//! let view = session.execute(chrono::Local::now().date_naive()).await?;
//! for restaurant in view.partition().with_menu {
//!     println!("{restaurant}");
//! }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
