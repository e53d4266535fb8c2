//! Exercise entry models: the stored log entry and the shape returned by
//! the calorie-burn estimator API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logged exercise tied to a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseEntry {
    pub id: i64,
    pub name: String,
    /// Duration in minutes
    pub time: i64,
    pub calories: i64,
    pub user_id: i64,
}

/// Payload for `POST /exercise/add`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewExercise {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty."))]
    pub name: String,
    #[validate(range(min = 1, message = "Time must be at least 1 minute."))]
    pub time: i64,
    #[validate(range(min = 1, message = "Calories must be at least 1."))]
    pub calories: i64,
}

/// One result from the calorie-burn estimator API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseApiItem {
    pub name: String,
    pub calories_per_hour: i64,
    pub duration_minutes: i64,
    pub total_calories: i64,
}
