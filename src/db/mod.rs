// SPDX-License-Identifier: MIT

//! Database layer: Firestore primary with an in-memory fallback.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Trip, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TRIPS: &str = "trips";
}

/// Store facade over Firestore with an in-memory fallback.
///
/// Every operation tries Firestore first; when the call fails (offline
/// mode, unreachable backend, emulator not running) the same operation is
/// served from the process-local [`MemoryStore`] instead, with a warning.
#[derive(Clone)]
pub struct Store {
    primary: FirestoreDb,
    fallback: MemoryStore,
}

impl Store {
    pub fn new(primary: FirestoreDb) -> Self {
        Self {
            primary,
            fallback: MemoryStore::new(),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Option<User> {
        match self.primary.get_user(user_id).await {
            Ok(user) => user,
            Err(err) => {
                warn_fallback("get_user", &err);
                self.fallback.get_user(user_id)
            }
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        match self.primary.find_user_by_email(email).await {
            Ok(user) => user,
            Err(err) => {
                warn_fallback("find_user_by_email", &err);
                self.fallback.find_user_by_email(email)
            }
        }
    }

    pub async fn upsert_user(&self, user: &User) {
        match self.primary.upsert_user(user).await {
            Ok(()) => {}
            Err(err) => {
                warn_fallback("upsert_user", &err);
                self.fallback.upsert_user(user);
            }
        }
    }

    /// Save a trip and record its ID on the owning user.
    pub async fn create_trip(&self, trip: &Trip) {
        match self.primary_create_trip(trip).await {
            Ok(()) => {}
            Err(err) => {
                warn_fallback("create_trip", &err);
                self.fallback.create_trip(trip);
            }
        }
    }

    async fn primary_create_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.primary.upsert_trip(trip).await?;
        if let Some(mut user) = self.primary.get_user(&trip.user_id).await? {
            if !user.trips.contains(&trip.id) {
                user.trips.push(trip.id.clone());
                self.primary.upsert_user(&user).await?;
            }
        }
        Ok(())
    }

    pub async fn trips_for_user(&self, user_id: &str) -> Vec<Trip> {
        match self.primary.trips_for_user(user_id).await {
            Ok(trips) => trips,
            Err(err) => {
                warn_fallback("trips_for_user", &err);
                self.fallback.trips_for_user(user_id)
            }
        }
    }
}

fn warn_fallback(operation: &str, err: &AppError) {
    tracing::warn!(operation, error = %err, "Firestore unavailable, serving from in-memory store");
}
