// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod auth;
pub(crate) mod backoff;
pub mod exercise;
pub mod exercise_api;
pub mod food;
pub mod food_api;
pub mod nutrition_api;
pub mod user;

use std::time::Duration;

pub use auth::AuthService;
pub use exercise::ExerciseService;
pub use exercise_api::CaloriesBurnedClient;
pub use food::FoodService;
pub use food_api::FoodSearchClient;
pub use nutrition_api::NutritionApiClient;
pub use user::UserService;

/// Timeout applied to every outbound third-party API call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client construction for the API clients.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        // The builder only fails when the TLS backend cannot initialize,
        // in which case the default client would fail identically.
        .unwrap_or_default()
}

/// Error raised by the third-party API clients. Services translate these
/// into the fixed user-facing service-unavailable message for their
/// endpoint, so no upstream detail leaks to callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("API credentials not configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ApiClientError {
    /// Whether a retry could plausibly succeed. Network failures, 429s and
    /// upstream 5xx are transient; 4xx and malformed responses are
    /// deterministic and retrying them only burns the backoff budget.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            ApiClientError::Request(_) => true,
            ApiClientError::Status(status, _) => *status >= 500 || *status == 429,
            ApiClientError::MissingCredentials | ApiClientError::Shape(_) => false,
        }
    }
}
