//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; handlers only ever see the parsed
//! `Config` through shared state.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for the CORS allow-list and cookie Secure flag
    pub frontend_url: String,
    /// GCP project ID for Firestore
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Base URL of the hosted trip-planner service, if deployed
    pub planner_api_url: Option<String>,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Google Maps API key for geocoding
    pub google_maps_api_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file. In
    /// production they arrive as env vars through the deployment's secret
    /// bindings; there are no in-code defaults for them.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();
        if jwt_signing_key.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_SIGNING_KEY",
                "must be at least 32 bytes".to_string(),
            ));
        }

        Ok(Self {
            // Non-sensitive config from env
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
            planner_api_url: env::var("PLANNER_API_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),

            // Secrets - from env for local dev, secret bindings in prod
            jwt_signing_key,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_MAPS_API_KEY"))?,
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    ///
    /// Follows the frontend scheme: an https frontend means the API sits
    /// behind TLS as well.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 3001,
            planner_api_url: None,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            google_maps_api_key: "test_maps_key".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because env vars are process-global and tests run in
    // parallel threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("GOOGLE_MAPS_API_KEY", "test_maps_key");
        env::remove_var("PORT");
        env::remove_var("PLANNER_API_URL");

        env::set_var("JWT_SIGNING_KEY", "too-short");
        match Config::from_env() {
            Err(ConfigError::Invalid("JWT_SIGNING_KEY", _)) => {}
            other => panic!("expected invalid key error, got {other:?}"),
        }

        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!!");
        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.google_maps_api_key, "test_maps_key");
        assert_eq!(config.port, 3001);
        assert!(config.planner_api_url.is_none());
    }
}
