// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod route;
pub mod trip;
pub mod user;

pub use route::{
    Coordinates, PlaceSuggestion, RouteDistance, RouteEta, RoutePlan, RouteResponse, RouteSummary,
    Stop,
};
pub use trip::{Trip, TripResponse};
pub use user::{AuthUserSummary, Preferences, User, UserResponse};
