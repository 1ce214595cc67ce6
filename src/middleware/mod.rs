// SPDX-License-Identifier: MIT

//! Middleware modules (authentication, security headers).

pub mod auth;
pub mod security;

pub use auth::{clear_session_cookie, create_jwt, require_auth, session_cookie, AuthUser};
