// SPDX-License-Identifier: MIT

//! In-memory store used when Firestore is unreachable.
//!
//! Backed by `DashMap` so request handlers can share it freely. Contents
//! vanish on restart.

use std::sync::Arc;

use dashmap::DashMap;

use crate::models::{Trip, User};

/// Process-local user and trip storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    trips: Arc<DashMap<String, Trip>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|entry| entry.value().clone())
    }

    /// Linear scan over all users.
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone())
    }

    pub fn upsert_user(&self, user: &User) {
        self.users.insert(user.id.clone(), user.clone());
    }

    /// Insert a trip and record its ID on the owning user, when present.
    pub fn create_trip(&self, trip: &Trip) {
        self.trips.insert(trip.id.clone(), trip.clone());
        if let Some(mut user) = self.users.get_mut(&trip.user_id) {
            if !user.trips.contains(&trip.id) {
                user.trips.push(trip.id.clone());
            }
        }
    }

    /// Trips saved by a user, newest first. The trip ID breaks timestamp
    /// ties so the order is stable.
    pub fn trips_for_user(&self, user_id: &str) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        trips.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        trips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn trip(id: &str, user_id: &str, created_at: &str) -> Trip {
        Trip {
            id: id.to_string(),
            user_id: user_id.to_string(),
            start: "A".to_string(),
            destination: "B".to_string(),
            start_coords: Coordinates { lat: 0.0, lng: 0.0 },
            dest_coords: Coordinates { lat: 1.0, lng: 1.0 },
            stops: Vec::new(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_user_roundtrip_and_email_lookup() {
        let store = MemoryStore::new();
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        );
        store.upsert_user(&user);

        assert_eq!(store.get_user(&user.id).unwrap().name, "Ada");
        assert_eq!(
            store.find_user_by_email("ada@example.com").unwrap().id,
            user.id
        );
        assert!(store.find_user_by_email("someone@else.com").is_none());
    }

    #[test]
    fn test_create_trip_links_user() {
        let store = MemoryStore::new();
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        );
        store.upsert_user(&user);

        let saved = trip("t1", &user.id, "2025-01-01T00:00:00Z");
        store.create_trip(&saved);
        store.create_trip(&saved);

        let user = store.get_user(&user.id).unwrap();
        assert_eq!(user.trips, vec!["t1".to_string()]);
    }

    #[test]
    fn test_trips_sorted_newest_first() {
        let store = MemoryStore::new();
        store.create_trip(&trip("t1", "u1", "2025-01-01T00:00:00Z"));
        store.create_trip(&trip("t2", "u1", "2025-03-01T00:00:00Z"));
        store.create_trip(&trip("t3", "u1", "2025-02-01T00:00:00Z"));
        store.create_trip(&trip("t4", "u2", "2025-04-01T00:00:00Z"));

        let trips = store.trips_for_user("u1");
        let ids: Vec<&str> = trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t1"]);
    }
}
