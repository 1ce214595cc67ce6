// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod geocode;
pub mod password;
pub mod planner;
pub mod recommend;

pub use geocode::GeocodeClient;
pub use planner::PlannerClient;
pub use recommend::{RecommendationRequest, Recommender};
