// SPDX-License-Identifier: MIT

//! Client for the hosted trip-planner service.
//!
//! The planner exposes three JSON endpoints: a travel plan with scheduled
//! stops, a free-text restaurant search, and a combined form that attaches
//! nearby places to each stop. Replies arrive in a `{status, data}`
//! envelope, and a "success" envelope can still carry an in-band `error`
//! field, which surfaces as [`PlannerError::Upstream`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, PlaceSuggestion, RouteSummary};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Query sent to the combined endpoint when the caller asked for restaurant
/// suggestions without writing a prompt.
pub const DEFAULT_RESTAURANT_QUERY: &str = "Where should I stop for food during my trip?";

/// Errors from the planner service.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("planner request failed: {0}")]
    Transport(String),
    #[error("planner returned HTTP {0}")]
    Http(reqwest::StatusCode),
    #[error("planner reply was malformed: {0}")]
    Malformed(String),
    #[error("planner could not produce a plan: {0}")]
    Upstream(String),
}

/// Trip overview plus scheduled stops from the plain travel-plan endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TravelPlan {
    #[serde(default)]
    pub route_summary: Option<RouteSummary>,
    #[serde(default)]
    pub suggested_stops: Vec<PlannerStop>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

/// A scheduled break on the planner's route.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerStop {
    /// Break category ("Lunch", "Coffee Break", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Why the planner placed the stop; doubles as its display name
    pub reason: String,
    /// Clock time of the break ("12:30 PM")
    pub time: String,
    pub coordinates: PlannerCoordinates,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlannerCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<PlannerCoordinates> for Coordinates {
    fn from(coords: PlannerCoordinates) -> Self {
        Self {
            lat: coords.latitude,
            lng: coords.longitude,
        }
    }
}

/// One stop from the combined endpoint, with the places found near it.
#[derive(Debug, Clone, Deserialize)]
pub struct StopWithPlaces {
    pub stop_info: PlannerStop,
    #[serde(default)]
    pub places: Vec<PlannerPlace>,
}

impl StopWithPlaces {
    /// The highest-rated nearby place; unrated places rank last.
    pub fn top_place(&self) -> Option<&PlannerPlace> {
        self.places.iter().max_by(|a, b| {
            a.rating
                .unwrap_or(0.0)
                .partial_cmp(&b.rating.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// A place found near a stop. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price_level: Option<u8>,
}

/// Combined travel plan plus restaurant suggestion text.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedPlan {
    #[serde(default)]
    pub travel_plan: Option<CombinedTravelPlan>,
    #[serde(default)]
    pub restaurant_suggestions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedTravelPlan {
    #[serde(default)]
    pub route_summary: Option<RouteSummary>,
    #[serde(default)]
    pub stops_with_restaurants: Vec<StopWithPlaces>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: T,
}

#[derive(Serialize)]
struct PlanRequest<'a> {
    source: &'a str,
    destination: &'a str,
    start_time: &'a str,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    source: &'a str,
    destination: &'a str,
    start_time: &'a str,
}

#[derive(Serialize)]
struct CombinedRequest<'a> {
    source: &'a str,
    destination: &'a str,
    start_time: &'a str,
    restaurant_query: &'a str,
}

/// Planner service client.
#[derive(Clone)]
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Scheduled stops for a trip.
    pub async fn travel_plan(
        &self,
        source: &str,
        destination: &str,
        start_time: &str,
    ) -> Result<TravelPlan, PlannerError> {
        let mut plan: TravelPlan = self
            .post_json(
                "/api/travel-plan",
                &PlanRequest {
                    source,
                    destination,
                    start_time,
                },
            )
            .await?;
        if let Some(message) = plan.error.take() {
            return Err(PlannerError::Upstream(message));
        }
        Ok(plan)
    }

    /// Free-text restaurant suggestions along the route.
    pub async fn restaurant_search(
        &self,
        query: &str,
        source: &str,
        destination: &str,
        start_time: &str,
    ) -> Result<String, PlannerError> {
        self.post_json(
            "/api/restaurant-search",
            &SearchRequest {
                query,
                source,
                destination,
                start_time,
            },
        )
        .await
    }

    /// Travel plan with nearby places attached to each stop.
    pub async fn travel_plan_with_restaurants(
        &self,
        source: &str,
        destination: &str,
        start_time: &str,
        restaurant_query: &str,
    ) -> Result<CombinedPlan, PlannerError> {
        self.post_json(
            "/api/travel-plan-with-restaurants",
            &CombinedRequest {
                source,
                destination,
                start_time,
                restaurant_query,
            },
        )
        .await
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, PlannerError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| PlannerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlannerError::Http(response.status()));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| PlannerError::Malformed(e.to_string()))?;
        if envelope.status != "success" {
            return Err(PlannerError::Upstream(format!(
                "status was \"{}\"",
                envelope.status
            )));
        }
        Ok(envelope.data)
    }
}

/// Parse the planner's free-text suggestions into structured entries.
///
/// Entries are blank-line separated and look like "You can stop at {name}
/// with a rating of {r}/5 during your {type} at {time}. It's located at
/// {address}.", with the rating and address pieces optional. Anything that
/// does not match (the header line, the no-results sentence) is skipped.
pub fn parse_suggestion_text(text: &str) -> Vec<PlaceSuggestion> {
    text.split("\n\n").filter_map(parse_suggestion_entry).collect()
}

fn parse_suggestion_entry(entry: &str) -> Option<PlaceSuggestion> {
    let rest = entry.trim().strip_prefix("You can stop at ")?;

    let (head, address) = match rest.split_once(". It's located at ") {
        Some((head, tail)) => (head, Some(tail.trim_end_matches('.').trim().to_string())),
        None => (rest.trim_end_matches('.'), None),
    };

    let (head, when) = match head.split_once(" during your ") {
        Some((head, when)) => (head, Some(when)),
        None => (head, None),
    };

    let (name, rating) = match head.split_once(" with a rating of ") {
        Some((name, rating)) => (
            name,
            rating
                .strip_suffix("/5")
                .and_then(|value| value.trim().parse::<f64>().ok()),
        ),
        None => (head, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let (stop_type, time) = match when {
        Some(when) => match when.rsplit_once(" at ") {
            Some((kind, time)) => (Some(kind.trim().to_string()), Some(time.trim().to_string())),
            None => (Some(when.trim().to_string()), None),
        },
        None => (None, None),
    };

    Some(PlaceSuggestion {
        name: name.to_string(),
        rating,
        stop_type,
        time,
        address,
    })
}
