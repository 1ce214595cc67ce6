// SPDX-License-Identifier: MIT

//! Route recommendation endpoints.
//!
//! The authenticated endpoint folds the caller's stored dining preferences
//! into the suggestions; the public one serves defaults so the landing page
//! can demo the planner without an account.

use axum::{extract::State, routing::post, Extension, Json, Router};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppJson, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Preferences, RouteResponse};
use crate::services::recommend::RecommendationRequest;
use crate::AppState;

/// Personalized recommendations. The auth middleware is layered on in
/// routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/getRecommendations", post(get_recommendations))
}

/// Anonymous recommendations.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/public/getRecommendations",
        post(get_public_recommendations),
    )
}

/// Plan a route using the caller's stored preferences.
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<RecommendationRequest>,
) -> Result<Json<RouteResponse>> {
    payload.validate()?;

    // A valid token whose account has since vanished still gets a route,
    // just without personalization.
    let preferences = state
        .store
        .get_user(&user.user_id)
        .await
        .map(|u| u.preferences)
        .unwrap_or_default();

    let route = state.recommender.plan_route(&payload, &preferences).await?;
    Ok(Json(RouteResponse { route }))
}

/// Plan a route without an account.
async fn get_public_recommendations(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RecommendationRequest>,
) -> Result<Json<RouteResponse>> {
    payload.validate()?;

    let route = state
        .recommender
        .plan_route(&payload, &Preferences::default())
        .await?;
    Ok(Json(RouteResponse { route }))
}
