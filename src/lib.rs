// SPDX-License-Identifier: MIT

//! OnRoute: plan road trips with food and fuel stops along the way.
//!
//! This crate provides the backend API for planning routes between two
//! places, recommending stops personalized to each user's dining
//! preferences, and saving finished trips.

pub mod config;
pub mod db;
pub mod error;
pub mod geo_utils;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::Recommender;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub recommender: Recommender,
}
