// SPDX-License-Identifier: MIT

//! Exercise service: logging entries and searching the calorie-burn API.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{ExerciseApiItem, NewExercise};
use crate::services::CaloriesBurnedClient;

const SEARCH_UNAVAILABLE: &str = "Searching for exercises is not available.";
const USER_MISSING: &str = "User does not exist.";

/// Body weight assumed for anonymous callers, in kilograms.
pub const DEFAULT_WEIGHT_KG: i64 = 75;

#[derive(Clone)]
pub struct ExerciseService {
    db: Database,
    exercise_api: CaloriesBurnedClient,
}

impl ExerciseService {
    pub fn new(db: Database, exercise_api: CaloriesBurnedClient) -> Self {
        Self { db, exercise_api }
    }

    /// Persist a logged exercise for the caller.
    pub async fn add(&self, user_id: i64, entry: &NewExercise) -> Result<i64> {
        self.db.insert_exercise(user_id, entry).await
    }

    /// Estimate calories burned for activities matching `query`.
    ///
    /// Authenticated callers get estimates for their stored body weight;
    /// anonymous callers get the [`DEFAULT_WEIGHT_KG`] assumption.
    pub async fn find(
        &self,
        user_id: Option<i64>,
        query: &str,
        duration: i64,
    ) -> Result<Vec<ExerciseApiItem>> {
        let weight = match user_id {
            Some(id) => match self.db.get_user(id).await? {
                Some(user) => user.weight,
                None => {
                    tracing::warn!(user_id = id, "Valid session references a missing user row");
                    return Err(AppError::Unavailable(USER_MISSING));
                }
            },
            None => DEFAULT_WEIGHT_KG,
        };

        self.exercise_api
            .search(query, weight, duration)
            .await
            .map_err(|e| {
                tracing::warn!(query, error = %e, "Exercise search failed");
                AppError::Unavailable(SEARCH_UNAVAILABLE)
            })
    }
}
