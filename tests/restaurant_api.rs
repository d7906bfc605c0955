//! HTTP-level tests for the restaurant client and the session use case.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use menu_finder::application::services::{MenuAggregator, apply_filters, FilterCriteria};
use menu_finder::application::use_cases::LoadSessionUseCase;
use menu_finder::domain::entities::{FetchStatus, MenuErrorKind};
use menu_finder::domain::services::render_day_label;
use menu_finder::domain::value_objects::{Coordinate, LanguageCode, RestaurantId};
use menu_finder::infrastructure::api::{
    HttpClient, MenuEndpoint, MenuProvider, RestaurantApiClient, RestaurantDirectory,
};
use menu_finder::infrastructure::location::FixedLocation;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RestaurantApiClient {
    RestaurantApiClient::new(HttpClient::new(&server.uri(), 2000).unwrap())
}

fn restaurants_json() -> serde_json::Value {
    json!([
        {
            "_id": "far",
            "name": "Far Away",
            "address": "Pajuniityntie 11",
            "city": "Helsinki",
            "location": { "type": "Point", "coordinates": [24.8789, 60.2238] }
        },
        {
            "_id": "near",
            "name": "Near By",
            "address": "Kaivokatu 1",
            "city": "Helsinki",
            "location": { "type": "Point", "coordinates": [24.9400, 60.1710] }
        },
        {
            "_id": "nowhere",
            "name": "No Location",
            "address": "Unknown 1",
            "city": "Espoo"
        }
    ])
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

#[tokio::test]
async fn fetches_bare_restaurant_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurants_json()))
        .mount(&server)
        .await;

    let restaurants = client(&server).fetch_restaurants().await.unwrap();

    assert_eq!(restaurants.len(), 3);
    assert_eq!(restaurants[0].id().as_str(), "far");
    let near = restaurants[1].coordinate().unwrap();
    assert!((near.latitude() - 60.1710).abs() < 1e-9);
    assert!((near.longitude() - 24.9400).abs() < 1e-9);
    assert!(restaurants[2].coordinate().is_none());
    assert_eq!(restaurants[2].status(), FetchStatus::Pending);
}

#[tokio::test]
async fn fetches_wrapped_restaurant_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "restaurants": restaurants_json() })),
        )
        .mount(&server)
        .await;

    let restaurants = client(&server).fetch_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 3);
}

#[tokio::test]
async fn malformed_restaurant_list_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": 1 })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_restaurants().await.unwrap_err();
    assert!(err.is_format_error());
}

#[tokio::test]
async fn restaurant_list_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).fetch_restaurants().await.unwrap_err();
    assert_eq!(err.http_status(), Some(503));
}

#[tokio::test]
async fn fetches_single_restaurant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/near"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurants_json()[1].clone()))
        .mount(&server)
        .await;

    let restaurant = client(&server)
        .fetch_restaurant(&RestaurantId::new("near"))
        .await
        .unwrap();
    assert_eq!(restaurant.name(), "Near By");
}

#[tokio::test]
async fn parses_weekly_menu() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/near/fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [
                {
                    "date": "Monday, 4 March",
                    "courses": [
                        { "name": "Lohikeitto", "price": "5,20 €", "diets": "G, L" },
                        { "name": "Kasvispata", "diets": ["VEG"] }
                    ]
                },
                { "date": "Tuesday 5 March", "courses": [] }
            ]
        })))
        .mount(&server)
        .await;

    let menu = client(&server)
        .fetch_menu(&RestaurantId::new("near"), LanguageCode::Fi)
        .await
        .unwrap();

    assert_eq!(menu.days.len(), 2);
    let monday = &menu.days[0];
    assert_eq!(monday.courses.len(), 2);
    assert_eq!(monday.courses[0].price.as_deref(), Some("5,20 €"));
    assert!(monday.courses[0].diets.contains("g"));
    assert!(monday.courses[1].diets.contains("VEG"));
    assert!(menu.days[1].is_empty());
}

#[tokio::test]
async fn restaurant_id_is_encoded_in_menu_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/odd%2Fid/en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [{ "date": "Monday 4 March", "courses": [{ "name": "Soup" }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let menu = client(&server)
        .weekly_menu(&RestaurantId::new("odd/id"), LanguageCode::En)
        .await
        .unwrap();
    assert_eq!(menu.days.len(), 1);
}

#[tokio::test]
async fn missing_menu_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/gone/en"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/broken/en"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);
    let gone = client
        .weekly_menu(&RestaurantId::new("gone"), LanguageCode::En)
        .await
        .unwrap();
    let broken = client
        .weekly_menu(&RestaurantId::new("broken"), LanguageCode::En)
        .await
        .unwrap();

    assert!(gone.is_empty());
    assert!(broken.is_empty());
}

#[tokio::test]
async fn unexpected_menu_shape_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/odd/en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "closed" })))
        .mount(&server)
        .await;

    let menu = client(&server)
        .weekly_menu(&RestaurantId::new("odd"), LanguageCode::En)
        .await
        .unwrap();
    assert!(menu.is_empty());
}

#[tokio::test]
async fn non_json_menu_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/html/en"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .weekly_menu(&RestaurantId::new("html"), LanguageCode::En)
        .await
        .unwrap_err();
    assert!(err.is_format_error());
}

#[tokio::test]
async fn daily_menu_is_labelled_with_the_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/daily/near/en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "courses": [{ "name": "Pasta", "price": "4 €", "diets": "VEG" }]
        })))
        .mount(&server)
        .await;

    let client = client(&server).with_menu_endpoint(MenuEndpoint::Daily);
    let menu = client
        .daily_menu(&RestaurantId::new("near"), LanguageCode::En, monday())
        .await
        .unwrap();

    assert_eq!(menu.days.len(), 1);
    assert_eq!(menu.days[0].label, render_day_label(monday()));
    assert_eq!(menu.days[0].courses[0].name, "Pasta");
}

#[tokio::test]
async fn session_ranks_and_isolates_menu_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurants_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/near/en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [{
                "date": "Monday 4 March",
                "courses": [{ "name": "Soup", "diets": "VEG" }]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/far/en"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/restaurants/weekly/nowhere/en"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = Arc::new(client(&server));
    let user = Coordinate::new(60.1699, 24.9384).unwrap();
    let session = LoadSessionUseCase::new(
        api.clone(),
        MenuAggregator::with_defaults(api),
        Arc::new(FixedLocation::new(user)),
    );

    let view = session.execute(monday()).await.unwrap();
    let ids: Vec<&str> = view.restaurants().iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, ["near", "far", "nowhere"]);

    let far = view.restaurant(&RestaurantId::new("far")).unwrap();
    assert_eq!(far.status(), FetchStatus::Rejected);
    assert_eq!(far.error().unwrap().kind, MenuErrorKind::Format);

    let nowhere = view.restaurant(&RestaurantId::new("nowhere")).unwrap();
    assert_eq!(nowhere.status(), FetchStatus::Fulfilled);
    assert!(nowhere.distance_km().is_none());

    let outcome = apply_filters(view.restaurants(), &FilterCriteria::new(monday()));
    assert_eq!(outcome.with_menu.len(), 1);
    assert_eq!(outcome.with_menu[0].id().as_str(), "near");
    assert_eq!(outcome.without_menu.len(), 2);
}
