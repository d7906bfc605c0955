//! # Menu Aggregation
//!
//! Fetches every restaurant's menu concurrently.
//!
//! [`MenuAggregator`] spawns one task per restaurant, waits for all of them
//! to settle and records each outcome on its restaurant: `Fulfilled` with the
//! menu, or `Rejected` with an error record. A failing restaurant never
//! aborts or delays the others, and nothing is retried. Results come back in
//! input order.
//!
//! A batch can optionally be cancelled through a [`CancellationToken`];
//! fetches that have not settled by then are rejected as cancelled.

use crate::domain::entities::{FetchStatus, MenuErrorKind, MenuFetchError, Restaurant, WeeklyMenu};
use crate::domain::value_objects::{LanguageCode, RestaurantId};
use crate::infrastructure::api::error::ApiError;
use crate::infrastructure::api::traits::MenuProvider;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Configuration for menu aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Menu language.
    pub language: LanguageCode,
    /// Per-restaurant timeout in milliseconds; `None` waits indefinitely.
    pub per_restaurant_timeout_ms: Option<u64>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            language: LanguageCode::En,
            per_restaurant_timeout_ms: None,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration for `language` with no timeout.
    #[must_use]
    pub fn with_language(language: LanguageCode) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    /// Sets the per-restaurant timeout.
    #[must_use]
    pub fn with_per_restaurant_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_restaurant_timeout_ms = Some(timeout_ms);
        self
    }
}

/// Counts of menu outcomes in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationSummary {
    /// Number of restaurants in the batch.
    pub requested: usize,
    /// Restaurants with at least one menu day.
    pub fulfilled: usize,
    /// Restaurants whose fetch succeeded with no menu days.
    pub empty: usize,
    /// Restaurants whose fetch failed.
    pub rejected: usize,
}

impl AggregationSummary {
    /// Tallies the menu outcomes of `restaurants`.
    #[must_use]
    pub fn from_restaurants(restaurants: &[Restaurant]) -> Self {
        restaurants
            .iter()
            .fold(Self::default(), |mut summary, restaurant| {
                summary.requested += 1;
                match (restaurant.status(), restaurant.menu()) {
                    (FetchStatus::Fulfilled, Some(menu)) if menu.is_empty() => summary.empty += 1,
                    (FetchStatus::Fulfilled, _) => summary.fulfilled += 1,
                    (FetchStatus::Rejected, _) => summary.rejected += 1,
                    (FetchStatus::Pending, _) => {}
                }
                summary
            })
    }

    /// Returns true if every fetch failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.requested > 0 && self.rejected == self.requested
    }
}

impl fmt::Display for AggregationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} restaurants: {} with menu, {} without, {} failed",
            self.requested, self.fulfilled, self.empty, self.rejected
        )
    }
}

/// Concurrent menu fetcher.
#[derive(Debug, Clone)]
pub struct MenuAggregator {
    provider: Arc<dyn MenuProvider>,
    config: AggregationConfig,
}

impl MenuAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new(provider: Arc<dyn MenuProvider>, config: AggregationConfig) -> Self {
        Self { provider, config }
    }

    /// Creates an aggregator with default configuration.
    #[must_use]
    pub fn with_defaults(provider: Arc<dyn MenuProvider>) -> Self {
        Self::new(provider, AggregationConfig::default())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Fetches all menus and waits for every fetch to settle.
    pub async fn fetch_all_menus(&self, restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
        self.fetch_batch(restaurants, None).await
    }

    /// Like [`MenuAggregator::fetch_all_menus`], but stops waiting once
    /// `cancel` fires.
    pub async fn fetch_all_menus_with_cancel(
        &self,
        restaurants: Vec<Restaurant>,
        cancel: &CancellationToken,
    ) -> Vec<Restaurant> {
        self.fetch_batch(restaurants, Some(cancel.clone())).await
    }

    async fn fetch_batch(
        &self,
        mut restaurants: Vec<Restaurant>,
        cancel: Option<CancellationToken>,
    ) -> Vec<Restaurant> {
        let handles: Vec<_> = restaurants
            .iter()
            .map(|restaurant| {
                let provider = Arc::clone(&self.provider);
                let id = restaurant.id().clone();
                let language = self.config.language;
                let timeout_ms = self.config.per_restaurant_timeout_ms;
                let cancel = cancel.clone();

                tokio::spawn(async move {
                    fetch_one(provider, id, language, timeout_ms, cancel).await
                })
            })
            .collect();

        let outcomes = join_all(handles).await;

        for (restaurant, outcome) in restaurants.iter_mut().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|e| {
                Err(MenuFetchError::new(
                    MenuErrorKind::Internal,
                    format!("menu task failed: {}", e),
                ))
            });
            if let Err(error) = &outcome {
                tracing::warn!(
                    restaurant = %restaurant.id(),
                    error = %error,
                    "menu fetch failed"
                );
            }
            restaurant.settle_menu(outcome);
        }

        let summary = AggregationSummary::from_restaurants(&restaurants);
        tracing::info!(
            requested = summary.requested,
            fulfilled = summary.fulfilled,
            empty = summary.empty,
            rejected = summary.rejected,
            "menu aggregation finished"
        );

        restaurants
    }
}

async fn fetch_one(
    provider: Arc<dyn MenuProvider>,
    id: RestaurantId,
    language: LanguageCode,
    timeout_ms: Option<u64>,
    cancel: Option<CancellationToken>,
) -> Result<WeeklyMenu, MenuFetchError> {
    let request = async {
        let result = match timeout_ms {
            Some(ms) => timeout(Duration::from_millis(ms), provider.fetch_menu(&id, language))
                .await
                .unwrap_or_else(|_| {
                    Err(ApiError::timeout_with_duration("menu request timed out", ms))
                }),
            None => provider.fetch_menu(&id, language).await,
        };
        result.map_err(MenuFetchError::from)
    };

    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(MenuFetchError::cancelled()),
                result = request => result,
            }
        }
        None => request.await,
    }
}
