// SPDX-License-Identifier: MIT

//! Saved-trip routes for authenticated users.

use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppJson, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Coordinates, Stop, Trip, TripResponse};
use crate::AppState;

/// Trip routes. The auth middleware is layered on in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/trips", get(list_trips).post(save_trip))
}

/// Trip to save, with the stops exactly as shown to the user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveTripRequest {
    #[validate(length(min = 1, message = "start is required"))]
    pub start: String,
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,
    pub start_coords: Coordinates,
    pub dest_coords: Coordinates,
    pub stops: Vec<Stop>,
}

/// List the caller's saved trips, newest first.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Vec<TripResponse>> {
    let trips = state.store.trips_for_user(&user.user_id).await;
    Json(trips.into_iter().map(TripResponse::from).collect())
}

/// Save a planned trip under the caller's account.
async fn save_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<SaveTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>)> {
    payload.validate()?;

    let trip = Trip::new(
        user.user_id,
        payload.start,
        payload.destination,
        payload.start_coords,
        payload.dest_coords,
        payload.stops,
    );
    state.store.create_trip(&trip).await;

    tracing::info!(trip_id = %trip.id, "Trip saved");

    Ok((StatusCode::CREATED, Json(TripResponse::from(trip))))
}
