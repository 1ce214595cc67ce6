// SPDX-License-Identifier: MIT

//! Account signup, login, and logout routes.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, AppJson, Result};
use crate::middleware::auth::{clear_session_cookie, create_jwt, session_cookie};
use crate::models::{AuthUserSummary, User};
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Signup request body.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Session token plus a slim profile for the client to cache.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUserSummary,
}

/// Create an account and start a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    payload.validate()?;

    if state
        .store
        .find_user_by_email(&payload.email)
        .await
        .is_some()
    {
        return Err(AppError::EmailTaken);
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = User::new(payload.name, payload.email, password_hash);
    state.store.upsert_user(&user).await;

    tracing::info!(user_id = %user.id, "New account created");

    let token = create_jwt(&user.id, &user.email, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(token.clone(), state.config.secure_cookies()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            token,
            user: AuthUserSummary::from(&user),
        }),
    ))
}

/// Exchange credentials for a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    payload.validate()?;

    // Unknown email and wrong password answer identically.
    let user = state
        .store
        .find_user_by_email(&payload.email)
        .await
        .ok_or(AppError::InvalidCredentials)?;
    if !password::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(&user.id, &user.email, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(token.clone(), state.config.secure_cookies()));

    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: AuthUserSummary::from(&user),
        }),
    ))
}

/// Expire the session cookie. Bearer clients just drop their token.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar.add(clear_session_cookie(state.config.secure_cookies()));
    (StatusCode::NO_CONTENT, jar)
}
