//! Food entry models: the stored log entry and the shape returned by the
//! food nutrition lookup API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logged food item tied to a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FoodEntry {
    pub id: i64,
    pub name: String,
    pub calories: i64,
    /// Number of servings
    pub count: i64,
    /// Serving unit, e.g. "medium" or "ml"
    pub unit: String,
    pub user_id: i64,
}

/// Payload for `POST /food/add`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFood {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty."))]
    pub name: String,
    #[validate(range(min = 1, message = "Calories must be at least 1."))]
    pub calories: i64,
    #[validate(range(min = 1, message = "Count must be at least 1."))]
    pub count: i64,
    #[validate(length(min = 1, max = 100, message = "Unit cannot be empty."))]
    pub unit: String,
}

/// One result from the food lookup, with calories already scaled by the
/// requested serving count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodApiItem {
    pub name: String,
    pub calories: i64,
    pub count: i64,
    pub unit: String,
}
