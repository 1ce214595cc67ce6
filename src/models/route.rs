//! Route planning models shared by the recommendation pipeline and saved
//! trips.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A stop along a planned or saved route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Stop {
    /// Display name ("Recommended Gas Station", "Luigi's Trattoria")
    pub name: String,
    /// Stop category ("start", "restaurant", "gas", "destination", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub location: Coordinates,
    /// Street address, when a concrete place is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Price bucket (0 = free .. 4 = very expensive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scheduled arrival clock time ("12:30 PM"), present on planner stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Stop {
    /// A route endpoint marker ("start" or "destination").
    pub fn endpoint(name: impl Into<String>, kind: &str, location: Coordinates) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            location,
            address: None,
            rating: None,
            price_level: None,
            description: None,
            time: None,
        }
    }
}

/// Trip distance rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteDistance {
    pub miles: u32,
    pub kilometers: u32,
}

/// Driving time estimate at highway speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteEta {
    pub hours: u32,
    pub minutes: u32,
}

/// One entry parsed out of the planner's free-text restaurant suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlaceSuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Break the place was suggested for ("lunch", "coffee break")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Planner trip overview, passed through to clients with its original keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteSummary {
    pub total_duration: String,
    pub total_distance: String,
    pub departure: String,
    pub estimated_arrival: String,
}

/// A fully assembled route recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RoutePlan {
    /// Ordered stops, always bracketed by start and destination markers
    pub stops: Vec<Stop>,
    /// Google Maps directions link for the start/destination pair
    pub google_maps_link: String,
    pub distance: RouteDistance,
    pub estimated_time: RouteEta,
    /// Raw planner suggestion text, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_suggestions: Option<String>,
    /// The suggestion text parsed into structured entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_places: Option<Vec<PlaceSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RouteSummary>,
}

/// Response envelope for the recommendation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteResponse {
    pub route: RoutePlan,
}
