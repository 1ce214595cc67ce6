//! Saved trip model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::route::{Coordinates, Stop};

/// A trip saved by a user, stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Document ID (UUID v4)
    pub id: String,
    /// Owning user's document ID
    pub user_id: String,
    /// Start address as the user entered it
    pub start: String,
    /// Destination address as the user entered it
    pub destination: String,
    pub start_coords: Coordinates,
    pub dest_coords: Coordinates,
    /// Route stops as shown when the trip was saved
    pub stops: Vec<Stop>,
    /// When the trip was saved (ISO 8601)
    pub created_at: String,
}

impl Trip {
    pub fn new(
        user_id: String,
        start: String,
        destination: String,
        start_coords: Coordinates,
        dest_coords: Coordinates,
        stops: Vec<Stop>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            start,
            destination,
            start_coords,
            dest_coords,
            stops,
            created_at: crate::time_utils::now_utc_rfc3339(),
        }
    }
}

/// Trip as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripResponse {
    pub id: String,
    pub user_id: String,
    pub start: String,
    pub destination: String,
    pub start_coords: Coordinates,
    pub dest_coords: Coordinates,
    pub stops: Vec<Stop>,
    pub created_at: String,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            user_id: trip.user_id,
            start: trip.start,
            destination: trip.destination,
            start_coords: trip.start_coords,
            dest_coords: trip.dest_coords,
            stops: trip.stops,
            created_at: trip.created_at,
        }
    }
}
