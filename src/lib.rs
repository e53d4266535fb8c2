// SPDX-License-Identifier: MIT

//! Calorie Tracker: log exercises and foods, track calorie targets
//!
//! This crate provides the backend API for user registration, exercise and
//! food logging, and nutrition lookups backed by third-party APIs.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use middleware::rate_limit::RateLimiter;
use services::{
    AuthService, CaloriesBurnedClient, ExerciseService, FoodSearchClient, FoodService,
    NutritionApiClient, UserService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub exercise_service: ExerciseService,
    pub food_service: FoodService,
    pub auth_limiter: RateLimiter,
}

impl AppState {
    /// Wire up all services against a connected database.
    pub fn new(config: Config, db: Database) -> Self {
        let nutrition_api =
            NutritionApiClient::new(config.user_api_url.clone(), config.user_api_key.clone());
        let exercise_api = CaloriesBurnedClient::new(
            config.exercise_api_url.clone(),
            config.exercise_api_key.clone(),
        );
        let food_api = FoodSearchClient::new(
            config.food_api_url.clone(),
            config.food_api_id.clone(),
            config.food_api_key.clone(),
        );

        let auth_limiter = RateLimiter::new(
            config.auth_rate_limit,
            std::time::Duration::from_secs(config.auth_rate_window_secs),
        );

        Self {
            auth_service: AuthService::new(db.clone()),
            user_service: UserService::new(db.clone(), nutrition_api),
            exercise_service: ExerciseService::new(db.clone(), exercise_api),
            food_service: FoodService::new(db.clone(), food_api),
            auth_limiter,
            config,
            db,
        }
    }
}
