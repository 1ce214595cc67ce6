// SPDX-License-Identifier: MIT

//! Profile routes for authenticated users.

use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, AppJson, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Preferences, UserResponse};
use crate::AppState;

/// Profile routes. The auth middleware is layered on in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/user/preferences", put(update_preferences))
}

/// Current user's full profile (minus the password hash).
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .store
        .get_user(&user.user_id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(profile)))
}

/// Preference lists to store on the profile. Absent lists reset to empty,
/// so the client always sends the full picture.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    #[serde(default)]
    pub food_preferences: Vec<String>,
    #[serde(default)]
    pub favorite_chains: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

/// Replace the caller's dining preferences.
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<PreferencesRequest>,
) -> Result<Json<UserResponse>> {
    let mut profile = state
        .store
        .get_user(&user.user_id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    profile.preferences = Preferences {
        food_preferences: payload.food_preferences,
        favorite_chains: payload.favorite_chains,
        dietary_restrictions: payload.dietary_restrictions,
    };
    state.store.upsert_user(&profile).await;

    tracing::debug!(user_id = %profile.id, "Preferences updated");

    Ok(Json(UserResponse::from(profile)))
}
