// SPDX-License-Identifier: MIT

//! Recommendation endpoint tests.
//!
//! The test app has no planner service configured, so these exercise the
//! local heuristic path end to end. Requests carry coordinates inline so
//! the geocoder is never called.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

/// San Francisco to Los Angeles, roughly 347 miles.
fn sf_to_la() -> serde_json::Value {
    json!({
        "start": "San Francisco, CA",
        "destination": "Los Angeles, CA",
        "startCoords": { "lat": 37.7749, "lng": -122.4194 },
        "destCoords": { "lat": 34.0522, "lng": -118.2437 }
    })
}

fn public_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/public/getRecommendations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn signup(app: &axum::Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Ada",
                        "email": email,
                        "password": "correct horse"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn put_preferences(app: &axum::Router, token: &str, prefs: serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/user/preferences")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(prefs.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_short_trip_has_no_intermediate_stops() {
    let (app, _) = common::create_test_app();

    // San Francisco to Berkeley, under ten miles
    let response = app
        .oneshot(public_request(json!({
            "start": "San Francisco, CA",
            "destination": "Berkeley, CA",
            "startCoords": { "lat": 37.7749, "lng": -122.4194 },
            "destCoords": { "lat": 37.8716, "lng": -122.2727 }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let stops = body["route"]["stops"].as_array().unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0]["type"], "start");
    assert_eq!(stops[0]["name"], "San Francisco, CA");
    assert_eq!(stops[1]["type"], "destination");
    assert_eq!(stops[1]["name"], "Berkeley, CA");
    assert!(body["route"].get("restaurantSuggestions").is_none());
}

#[tokio::test]
async fn test_long_trip_adds_restaurant_and_gas_stops() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(public_request(sf_to_la())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let stops = body["route"]["stops"].as_array().unwrap();

    assert_eq!(stops.len(), 4);
    assert_eq!(stops[0]["type"], "start");
    assert_eq!(stops[1]["type"], "restaurant");
    assert_eq!(stops[1]["name"], "Recommended Restaurant");
    assert_eq!(stops[1]["description"], "Based on trip route");
    assert_eq!(stops[2]["type"], "gas");
    assert_eq!(stops[2]["name"], "Recommended Gas Station");
    assert_eq!(stops[3]["type"], "destination");

    // Suggested stops sit near the route midpoint, within the jitter window
    let mid_lat = (37.7749 + 34.0522) / 2.0;
    let mid_lng = (-122.4194 + -118.2437) / 2.0;
    for stop in &stops[1..3] {
        let lat = stop["location"]["lat"].as_f64().unwrap();
        let lng = stop["location"]["lng"].as_f64().unwrap();
        assert!((lat - mid_lat).abs() < 0.02, "lat {lat} too far from midpoint");
        assert!((lng - mid_lng).abs() < 0.02, "lng {lng} too far from midpoint");
    }
}

#[tokio::test]
async fn test_distance_and_time_for_known_route() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(public_request(sf_to_la())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert_eq!(body["route"]["distance"]["miles"], 347);
    assert_eq!(body["route"]["distance"]["kilometers"], 559);
    assert_eq!(body["route"]["estimatedTime"]["hours"], 5);
    assert_eq!(body["route"]["estimatedTime"]["minutes"], 21);
}

#[tokio::test]
async fn test_google_maps_link_is_url_encoded() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(public_request(sf_to_la())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(
        body["route"]["googleMapsLink"],
        "https://www.google.com/maps/dir/San%20Francisco%2C%20CA/Los%20Angeles%2C%20CA/"
    );
}

#[tokio::test]
async fn test_cuisine_preference_personalizes_restaurant() {
    let (app, _) = common::create_test_app();
    let token = signup(&app, "ada@example.com").await;
    put_preferences(&app, &token, json!({ "foodPreferences": ["Italian"] })).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/getRecommendations")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(sf_to_la().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let stops = body["route"]["stops"].as_array().unwrap();

    assert_eq!(stops[1]["name"], "Italian Restaurant");
    assert_eq!(stops[1]["type"], "italian");
    assert_eq!(stops[1]["description"], "Based on your preferences");
}

#[tokio::test]
async fn test_favorite_chain_used_without_cuisine_preference() {
    let (app, _) = common::create_test_app();
    let token = signup(&app, "ada@example.com").await;
    put_preferences(&app, &token, json!({ "favoriteChains": ["In-N-Out"] })).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/getRecommendations")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(sf_to_la().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let stops = body["route"]["stops"].as_array().unwrap();

    assert_eq!(stops[1]["name"], "In-N-Out");
    assert_eq!(stops[1]["type"], "restaurant");
    assert_eq!(stops[1]["description"], "Based on your preferences");
}

#[tokio::test]
async fn test_low_fuel_moves_gas_stop_forward() {
    let (app, _) = common::create_test_app();

    let mut body = sf_to_la();
    body["fuelStatus"] = json!(100.0);

    let response = app.oneshot(public_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let stops = body["route"]["stops"].as_array().unwrap();

    // 100 miles of range on a 347-mile trip puts the gas stop at about
    // 29% of the way, well before the midpoint.
    let gas = &stops[2];
    assert_eq!(gas["type"], "gas");
    let lat = gas["location"]["lat"].as_f64().unwrap();
    let lng = gas["location"]["lng"].as_f64().unwrap();
    assert!((lat - 36.7033).abs() < 0.02, "gas lat {lat} misplaced");
    assert!((lng - -121.2174).abs() < 0.02, "gas lng {lng} misplaced");
}

#[tokio::test]
async fn test_personalized_endpoint_requires_auth() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/getRecommendations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(sf_to_la().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
