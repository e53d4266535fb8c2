// SPDX-License-Identifier: MIT

//! Food service: logging entries and searching the food nutrition API.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{FoodApiItem, NewFood};
use crate::services::FoodSearchClient;

const SEARCH_UNAVAILABLE: &str = "Searching for foods is not available.";

#[derive(Clone)]
pub struct FoodService {
    db: Database,
    food_api: FoodSearchClient,
}

impl FoodService {
    pub fn new(db: Database, food_api: FoodSearchClient) -> Self {
        Self { db, food_api }
    }

    /// Persist a logged food item for the caller.
    pub async fn add(&self, user_id: i64, entry: &NewFood) -> Result<i64> {
        self.db.insert_food(user_id, entry).await
    }

    /// Look up foods matching `query`, with calories scaled to `amount`
    /// servings.
    pub async fn find(&self, query: &str, amount: i64) -> Result<Vec<FoodApiItem>> {
        self.food_api.search(query, amount).await.map_err(|e| {
            tracing::warn!(query, error = %e, "Food search failed");
            AppError::Unavailable(SEARCH_UNAVAILABLE)
        })
    }
}
