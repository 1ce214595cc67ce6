// SPDX-License-Identifier: MIT

//! Route recommendation pipeline.
//!
//! Coordinates come from the request or the geocoder; the trip then goes
//! through the planner service when one is configured, and otherwise (or on
//! any planner failure) through a local heuristic that places restaurant
//! and gas stops around the route midpoint.

use rand::Rng;
use serde::Deserialize;
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::geo_utils;
use crate::models::{Coordinates, Preferences, RouteDistance, RouteEta, RoutePlan, Stop};
use crate::services::geocode::GeocodeClient;
use crate::services::planner::{
    self, CombinedPlan, PlannerClient, PlannerError, StopWithPlaces, TravelPlan,
};
use crate::time_utils;

/// Trips at or under this length get no intermediate stops.
const LONG_TRIP_MILES: f64 = 50.0;
/// Assumed average speed for the time estimate.
const AVERAGE_SPEED_MPH: f64 = 65.0;
const KM_PER_MILE: f64 = 1.60934;
/// Jitter applied to suggested stop positions, in degrees per axis.
const STOP_JITTER_DEGREES: f64 = 0.01;

/// Recommendation request body, shared by the public and authenticated
/// endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[validate(length(min = 1, message = "start is required"))]
    pub start: String,
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,
    #[serde(default)]
    pub start_coords: Option<Coordinates>,
    #[serde(default)]
    pub dest_coords: Option<Coordinates>,
    /// Remaining fuel range in miles
    #[serde(default)]
    #[validate(range(min = 0.0, message = "fuelStatus cannot be negative"))]
    pub fuel_status: Option<f64>,
    #[serde(default)]
    pub use_custom_prompt: bool,
    #[serde(default)]
    pub custom_prompt: Option<String>,
    /// RFC3339 departure time; defaults to now
    #[serde(default)]
    #[validate(custom(function = validate_rfc3339))]
    pub departure_time: Option<String>,
}

fn validate_rfc3339(value: &str) -> Result<(), validator::ValidationError> {
    match chrono::DateTime::parse_from_rfc3339(value) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = validator::ValidationError::new("rfc3339");
            err.message = Some("departureTime must be an RFC3339 timestamp".into());
            Err(err)
        }
    }
}

/// Route recommendation service.
#[derive(Clone)]
pub struct Recommender {
    geocoder: GeocodeClient,
    planner: Option<PlannerClient>,
}

impl Recommender {
    pub fn new(config: &Config) -> Self {
        Self {
            geocoder: GeocodeClient::new(config.google_maps_api_key.clone()),
            planner: config.planner_api_url.clone().map(PlannerClient::new),
        }
    }

    /// Build from explicit clients (used by tests).
    pub fn with_clients(geocoder: GeocodeClient, planner: Option<PlannerClient>) -> Self {
        Self { geocoder, planner }
    }

    /// Plan a route for the request, personalized with `prefs`.
    pub async fn plan_route(
        &self,
        request: &RecommendationRequest,
        prefs: &Preferences,
    ) -> Result<RoutePlan, AppError> {
        let (start, dest) = self.resolve_coords(request).await?;
        let miles = geo_utils::haversine_miles(start, dest);

        if let Some(planner) = &self.planner {
            match self
                .plan_with_planner(planner, request, start, dest, miles)
                .await
            {
                Ok(plan) => return Ok(plan),
                Err(err) => {
                    tracing::warn!(error = %err, "Planner unavailable, using local suggestions");
                }
            }
        }

        Ok(build_heuristic_route(request, prefs, start, dest, miles))
    }

    /// Coordinates from the request when present, otherwise from the
    /// geocoder. Lookups for the two endpoints run concurrently.
    async fn resolve_coords(
        &self,
        request: &RecommendationRequest,
    ) -> Result<(Coordinates, Coordinates), AppError> {
        let start = async {
            match request.start_coords {
                Some(coords) => Ok(coords),
                None => self.geocoder.geocode(&request.start).await,
            }
        };
        let dest = async {
            match request.dest_coords {
                Some(coords) => Ok(coords),
                None => self.geocoder.geocode(&request.destination).await,
            }
        };
        let (start, dest) = futures_util::try_join!(start, dest)?;
        Ok((start, dest))
    }

    async fn plan_with_planner(
        &self,
        planner: &PlannerClient,
        request: &RecommendationRequest,
        start: Coordinates,
        dest: Coordinates,
        miles: f64,
    ) -> Result<RoutePlan, PlannerError> {
        let start_time = departure_clock(request.departure_time.as_deref());
        let prompt = request
            .custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        if request.use_custom_prompt {
            if let Some(query) = prompt {
                let text = planner
                    .restaurant_search(query, &request.start, &request.destination, &start_time)
                    .await?;
                return Ok(route_from_text(request, start, dest, miles, text));
            }
            let combined = planner
                .travel_plan_with_restaurants(
                    &request.start,
                    &request.destination,
                    &start_time,
                    planner::DEFAULT_RESTAURANT_QUERY,
                )
                .await?;
            return Ok(route_from_places(request, start, dest, miles, combined));
        }

        let plan = planner
            .travel_plan(&request.start, &request.destination, &start_time)
            .await?;
        Ok(route_from_plan(request, start, dest, miles, plan))
    }
}

/// Departure clock string for the planner ("9:30 AM"). Missing or invalid
/// departure times fall back to now.
fn departure_clock(departure_time: Option<&str>) -> String {
    let date = departure_time
        .and_then(|value| chrono::DateTime::parse_from_rfc3339(value).ok())
        .unwrap_or_else(|| chrono::Local::now().fixed_offset());
    time_utils::format_clock_12h(date)
}

/// Local fallback: midpoint restaurant and gas stops for long trips.
pub fn build_heuristic_route(
    request: &RecommendationRequest,
    prefs: &Preferences,
    start: Coordinates,
    dest: Coordinates,
    miles: f64,
) -> RoutePlan {
    let mut middle = Vec::new();
    if miles > LONG_TRIP_MILES {
        let mid = geo_utils::midpoint(start, dest);
        middle.push(restaurant_stop(prefs, mid));
        middle.push(gas_stop(request.fuel_status, start, dest, mid, miles));
    }
    base_plan(request, start, dest, miles, middle)
}

fn restaurant_stop(prefs: &Preferences, mid: Coordinates) -> Stop {
    let (name, kind, personalized) = if let Some(pref) = prefs.food_preferences.first() {
        (format!("{pref} Restaurant"), pref.to_lowercase(), true)
    } else if let Some(chain) = prefs.favorite_chains.first() {
        (chain.clone(), "restaurant".to_string(), true)
    } else {
        (
            "Recommended Restaurant".to_string(),
            "restaurant".to_string(),
            false,
        )
    };

    Stop {
        name,
        kind,
        location: jitter(mid),
        address: None,
        rating: Some(4.5),
        price_level: Some(2),
        description: Some(
            if personalized {
                "Based on your preferences"
            } else {
                "Based on trip route"
            }
            .to_string(),
        ),
        time: None,
    }
}

/// Gas lands at the midpoint unless the caller reports less range than the
/// trip needs, in which case it moves to where the tank runs low.
fn gas_stop(
    fuel_status: Option<f64>,
    start: Coordinates,
    dest: Coordinates,
    mid: Coordinates,
    miles: f64,
) -> Stop {
    let center = match fuel_status {
        Some(range) if range > 0.0 && range < miles => {
            geo_utils::point_along(start, dest, (range / miles).clamp(0.05, 0.95))
        }
        _ => mid,
    };

    Stop {
        name: "Recommended Gas Station".to_string(),
        kind: "gas".to_string(),
        location: jitter(center),
        address: None,
        rating: Some(4.0),
        price_level: None,
        description: Some("Based on trip route".to_string()),
        time: None,
    }
}

fn jitter(center: Coordinates) -> Coordinates {
    let mut rng = rand::thread_rng();
    Coordinates {
        lat: center.lat + rng.gen_range(-STOP_JITTER_DEGREES..STOP_JITTER_DEGREES),
        lng: center.lng + rng.gen_range(-STOP_JITTER_DEGREES..STOP_JITTER_DEGREES),
    }
}

fn route_from_text(
    request: &RecommendationRequest,
    start: Coordinates,
    dest: Coordinates,
    miles: f64,
    text: String,
) -> RoutePlan {
    let places = planner::parse_suggestion_text(&text);
    let mut plan = base_plan(request, start, dest, miles, Vec::new());
    plan.suggested_places = (!places.is_empty()).then_some(places);
    plan.restaurant_suggestions = Some(text);
    plan
}

fn route_from_places(
    request: &RecommendationRequest,
    start: Coordinates,
    dest: Coordinates,
    miles: f64,
    combined: CombinedPlan,
) -> RoutePlan {
    let mut middle = Vec::new();
    let mut summary = None;
    if let Some(travel_plan) = combined.travel_plan {
        summary = travel_plan.route_summary;
        middle.extend(travel_plan.stops_with_restaurants.iter().map(place_stop));
    }

    let mut plan = base_plan(request, start, dest, miles, middle);
    plan.summary = summary;
    if let Some(text) = combined.restaurant_suggestions {
        let places = planner::parse_suggestion_text(&text);
        plan.suggested_places = (!places.is_empty()).then_some(places);
        plan.restaurant_suggestions = Some(text);
    }
    plan
}

/// Stop for the best-rated place near a planner stop; the stop's reason and
/// coordinates fill in whatever the place is missing.
fn place_stop(stop: &StopWithPlaces) -> Stop {
    let top = stop.top_place();
    let info = &stop.stop_info;
    Stop {
        name: top
            .and_then(|place| place.name.clone())
            .unwrap_or_else(|| info.reason.clone()),
        kind: info.kind.to_lowercase(),
        location: top
            .and_then(|place| place.location)
            .unwrap_or_else(|| info.coordinates.into()),
        address: top.and_then(|place| place.address.clone()),
        rating: top.and_then(|place| place.rating),
        price_level: top.and_then(|place| place.price_level),
        description: None,
        time: Some(info.time.clone()),
    }
}

fn route_from_plan(
    request: &RecommendationRequest,
    start: Coordinates,
    dest: Coordinates,
    miles: f64,
    plan: TravelPlan,
) -> RoutePlan {
    let middle = plan
        .suggested_stops
        .iter()
        .map(|stop| Stop {
            name: stop.reason.clone(),
            kind: stop.kind.to_lowercase(),
            location: stop.coordinates.into(),
            address: None,
            rating: None,
            price_level: None,
            description: None,
            time: Some(stop.time.clone()),
        })
        .collect();

    let mut built = base_plan(request, start, dest, miles, middle);
    built.summary = plan.route_summary;
    built
}

/// Base plan with the intermediate stops framed by start and destination
/// markers.
fn base_plan(
    request: &RecommendationRequest,
    start: Coordinates,
    dest: Coordinates,
    miles: f64,
    middle: Vec<Stop>,
) -> RoutePlan {
    let mut stops = Vec::with_capacity(middle.len() + 2);
    stops.push(Stop::endpoint(request.start.clone(), "start", start));
    stops.extend(middle);
    stops.push(Stop::endpoint(
        request.destination.clone(),
        "destination",
        dest,
    ));

    RoutePlan {
        stops,
        google_maps_link: google_maps_link(&request.start, &request.destination),
        distance: route_distance(miles),
        estimated_time: route_eta(miles),
        restaurant_suggestions: None,
        suggested_places: None,
        summary: None,
    }
}

fn route_distance(miles: f64) -> RouteDistance {
    RouteDistance {
        miles: miles.round() as u32,
        kilometers: (miles * KM_PER_MILE).round() as u32,
    }
}

fn route_eta(miles: f64) -> RouteEta {
    let hours_exact = miles / AVERAGE_SPEED_MPH;
    RouteEta {
        hours: hours_exact.floor() as u32,
        minutes: ((hours_exact * 60.0).round() as u32) % 60,
    }
}

fn google_maps_link(start: &str, destination: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/{}/{}/",
        urlencoding::encode(start),
        urlencoding::encode(destination)
    )
}
