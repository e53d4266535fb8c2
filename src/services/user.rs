// SPDX-License-Identifier: MIT

//! User service: profile retrieval and attribute updates.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{User, UserAttributes, UserProfile};
use crate::services::NutritionApiClient;

const USER_MISSING: &str = "User does not exist.";
const STATS_UNAVAILABLE: &str =
    "User statistics could not be updated. Please try again later";

#[derive(Clone)]
pub struct UserService {
    db: Database,
    nutrition_api: NutritionApiClient,
}

impl UserService {
    pub fn new(db: Database, nutrition_api: NutritionApiClient) -> Self {
        Self { db, nutrition_api }
    }

    /// Fetch the user row plus the exercise and food entries they logged.
    ///
    /// A missing row behind a valid token means the databases disagree
    /// with the session; that is an integrity problem, not a 404.
    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile> {
        let user = self.require_user(user_id).await?;
        let exercises = self.db.list_exercises_for_user(user_id).await?;
        let foods = self.db.list_foods_for_user(user_id).await?;

        Ok(UserProfile {
            user,
            exercises,
            foods,
        })
    }

    /// Recompute derived nutrition fields for the new attributes, then
    /// persist attributes and derived fields together. The external call
    /// happens first so storage is never touched when it fails.
    pub async fn update_attributes(
        &self,
        user_id: i64,
        attrs: UserAttributes,
    ) -> Result<User> {
        let facts = self.nutrition_api.calculate(&attrs).await.map_err(|e| {
            tracing::warn!(user_id, error = %e, "Nutrition calculator call failed");
            AppError::Unavailable(STATS_UNAVAILABLE)
        })?;

        self.db
            .update_user_attributes(user_id, &attrs, &facts)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Attribute update failed to persist");
                AppError::Unavailable(STATS_UNAVAILABLE)
            })?;

        self.require_user(user_id).await
    }

    async fn require_user(&self, user_id: i64) -> Result<User> {
        match self.db.get_user(user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!(user_id, "Valid session references a missing user row");
                Err(AppError::Unavailable(USER_MISSING))
            }
        }
    }
}
