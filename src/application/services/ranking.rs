//! # Distance Ranking
//!
//! Orders restaurants by distance from the user.
//!
//! Restaurants without a distance (no coordinate, or no user location) sort
//! after every restaurant with one. The sort is stable, so equal distances
//! and the all-unknown case keep the directory's order.

use crate::domain::entities::Restaurant;
use crate::domain::services::distance::distance_between;
use crate::domain::value_objects::Coordinate;
use std::cmp::Ordering;

/// Computes each restaurant's distance from `user_location` and returns the
/// restaurants sorted nearest first.
#[must_use]
pub fn rank_restaurants(
    mut restaurants: Vec<Restaurant>,
    user_location: Option<Coordinate>,
) -> Vec<Restaurant> {
    for restaurant in &mut restaurants {
        restaurant.set_distance(distance_between(user_location, restaurant.coordinate()));
    }

    // `sort_by` is stable.
    restaurants.sort_by(|a, b| compare_distance(a.distance_km(), b.distance_km()));
    restaurants
}

/// Ascending order with `None` last.
#[must_use]
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RestaurantId;

    fn restaurant(id: &str, position: Option<(f64, f64)>) -> Restaurant {
        Restaurant::new(RestaurantId::new(id), id, "address", "Helsinki")
            .with_coordinate(position.map(|(lat, lng)| Coordinate::new(lat, lng).unwrap()))
    }

    fn ids(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.id().as_str()).collect()
    }

    fn user() -> Option<Coordinate> {
        Some(Coordinate::new(60.169, 24.938).unwrap())
    }

    #[test]
    fn helsinki_example() {
        let ranked = rank_restaurants(
            vec![
                restaurant("2", Some((60.20, 24.96))),
                restaurant("1", Some((60.17, 24.94))),
            ],
            user(),
        );

        assert_eq!(ids(&ranked), vec!["1", "2"]);
        let near = ranked[0].distance_km().unwrap();
        let far = ranked[1].distance_km().unwrap();
        assert!((0.1..0.2).contains(&near));
        assert!((3.0..5.0).contains(&far));
    }

    #[test]
    fn missing_coordinates_sort_last_in_input_order() {
        let ranked = rank_restaurants(
            vec![
                restaurant("a", None),
                restaurant("far", Some((61.0, 25.0))),
                restaurant("b", None),
                restaurant("near", Some((60.17, 24.94))),
            ],
            user(),
        );

        assert_eq!(ids(&ranked), vec!["near", "far", "a", "b"]);
        assert!(ranked[2].distance_km().is_none());
    }

    #[test]
    fn no_user_location_keeps_input_order() {
        let ranked = rank_restaurants(
            vec![
                restaurant("c", Some((61.0, 25.0))),
                restaurant("a", Some((60.17, 24.94))),
                restaurant("b", None),
            ],
            None,
        );

        assert_eq!(ids(&ranked), vec!["c", "a", "b"]);
        assert!(ranked.iter().all(|r| r.distance_km().is_none()));
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let ranked = rank_restaurants(
            vec![
                restaurant("x", Some((60.17, 24.94))),
                restaurant("y", Some((60.17, 24.94))),
            ],
            user(),
        );
        assert_eq!(ids(&ranked), vec!["x", "y"]);
    }

    #[test]
    fn reranking_clears_stale_distances() {
        let ranked = rank_restaurants(vec![restaurant("a", Some((60.17, 24.94)))], user());
        assert!(ranked[0].distance_km().is_some());

        let reranked = rank_restaurants(ranked, None);
        assert!(reranked[0].distance_km().is_none());
    }

    #[test]
    fn empty_input() {
        assert!(rank_restaurants(Vec::new(), user()).is_empty());
    }
}
