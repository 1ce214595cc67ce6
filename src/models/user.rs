//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in Firestore.
///
/// The password hash never leaves the server; API responses use
/// [`UserResponse`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (one account per email)
    pub email: String,
    /// PBKDF2 hash in `scheme$iterations$salt$hash` form
    pub password_hash: String,
    /// Dining preferences used to personalize recommendations
    #[serde(default)]
    pub preferences: Preferences,
    /// IDs of saved trips, oldest first
    #[serde(default)]
    pub trips: Vec<String>,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

impl User {
    /// Fresh account with a new document ID and empty preferences.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            preferences: Preferences::default(),
            trips: Vec::new(),
            created_at: crate::time_utils::now_utc_rfc3339(),
        }
    }
}

/// Dining preferences attached to a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Preferences {
    /// Cuisine keywords ("Italian", "Thai")
    #[serde(default)]
    pub food_preferences: Vec<String>,
    /// Favorite restaurant chains
    #[serde(default)]
    pub favorite_chains: Vec<String>,
    /// Dietary restrictions ("vegetarian", "gluten-free")
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

/// User profile as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub preferences: Preferences,
    pub trips: Vec<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            preferences: user.preferences,
            trips: user.trips,
            created_at: user.created_at,
        }
    }
}

/// Slim profile embedded in signup and login responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthUserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for AuthUserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
