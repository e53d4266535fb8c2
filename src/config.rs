//! Application configuration loaded from environment variables.
//!
//! Third-party API credentials are optional at startup: the endpoints that
//! depend on them fail with a service-unavailable error instead of keeping
//! the whole process from booting.

use std::env;

const DEFAULT_EXERCISE_API_URL: &str = "https://api.api-ninjas.com";
const DEFAULT_FOOD_API_URL: &str = "https://trackapi.nutritionix.com";
const DEFAULT_USER_API_URL: &str = "https://nutrition-calculator.p.rapidapi.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database URL (e.g. `sqlite:data/tracker.sqlite`)
    pub database_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,

    // --- Third-party API credentials (each one optional) ---
    /// Calorie-burn estimator API key
    pub exercise_api_key: Option<String>,
    /// Food nutrition lookup API key
    pub food_api_key: Option<String>,
    /// Food nutrition lookup application id
    pub food_api_id: Option<String>,
    /// Nutrition calculator (BMI/macros) API key
    pub user_api_key: Option<String>,

    // --- Third-party API base URLs (overridable for tests) ---
    pub exercise_api_url: String,
    pub food_api_url: String,
    pub user_api_url: String,

    // --- Rate limiting for /auth routes ---
    /// Maximum requests per window per client IP
    pub auth_rate_limit: u32,
    /// Window length in seconds
    pub auth_rate_window_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/tracker.sqlite".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_signing_key: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),

            exercise_api_key: optional_env("EXERCISE_API_KEY"),
            food_api_key: optional_env("FOOD_API_KEY"),
            food_api_id: optional_env("FOOD_API_ID"),
            user_api_key: optional_env("USER_API_KEY"),

            exercise_api_url: env::var("EXERCISE_API_URL")
                .unwrap_or_else(|_| DEFAULT_EXERCISE_API_URL.to_string()),
            food_api_url: env::var("FOOD_API_URL")
                .unwrap_or_else(|_| DEFAULT_FOOD_API_URL.to_string()),
            user_api_url: env::var("USER_API_URL")
                .unwrap_or_else(|_| DEFAULT_USER_API_URL.to_string()),

            auth_rate_limit: env::var("AUTH_RATE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_rate_window_secs: env::var("AUTH_RATE_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15 * 60),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 3000,
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            exercise_api_key: Some("test-key".to_string()),
            food_api_key: Some("test-key".to_string()),
            food_api_id: Some("test-id".to_string()),
            user_api_key: Some("test-key".to_string()),
            exercise_api_url: "http://127.0.0.1:0".to_string(),
            food_api_url: "http://127.0.0.1:0".to_string(),
            user_api_url: "http://127.0.0.1:0".to_string(),
            auth_rate_limit: 100,
            auth_rate_window_secs: 15 * 60,
        }
    }
}

/// Treat unset and empty environment variables the same way.
fn optional_env(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so this is a single test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SECRET", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("EXERCISE_API_KEY", "  trimme  ");
        env::set_var("FOOD_API_KEY", "   ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 3000);
        assert_eq!(config.exercise_api_key.as_deref(), Some("trimme"));
        // Blank keys count as absent
        assert_eq!(config.food_api_key, None);

        env::remove_var("JWT_SECRET");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }
}
