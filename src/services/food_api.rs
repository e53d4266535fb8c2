// SPDX-License-Identifier: MIT

//! Food nutrition lookup API client.
//!
//! The lookup is a two-step flow: an instant-search call returns common
//! and branded candidates, then a detail call per candidate yields the
//! per-serving calories. Calories are scaled by the requested serving
//! count before results are returned.

use crate::models::FoodApiItem;
use crate::services::backoff::retry_with_backoff;
use crate::services::ApiClientError;
use serde::Deserialize;
use serde_json::json;

/// Maximum number of combined common + branded results.
pub const MAX_RESULTS: usize = 5;

/// Client for the food nutrition lookup API.
#[derive(Clone)]
pub struct FoodSearchClient {
    http: reqwest::Client,
    base_url: String,
    app_id: Option<String>,
    app_key: Option<String>,
}

/// Instant-search response: candidate foods without nutrition data.
#[derive(Debug, Deserialize)]
struct InstantSearchResponse {
    #[serde(default)]
    common: Vec<CommonCandidate>,
    #[serde(default)]
    branded: Vec<BrandedCandidate>,
}

#[derive(Debug, Deserialize)]
struct CommonCandidate {
    food_name: String,
}

#[derive(Debug, Deserialize)]
struct BrandedCandidate {
    nix_item_id: String,
}

/// Detail response carrying per-serving nutrition facts.
#[derive(Debug, Deserialize)]
struct FoodDetailsResponse {
    foods: Vec<FoodDetails>,
}

#[derive(Debug, Deserialize)]
struct FoodDetails {
    food_name: String,
    nf_calories: f64,
    serving_unit: String,
}

impl FoodSearchClient {
    pub fn new(base_url: String, app_id: Option<String>, app_key: Option<String>) -> Self {
        Self {
            http: crate::services::http_client(),
            base_url,
            app_id,
            app_key,
        }
    }

    /// Search foods matching `query` and scale calories by `amount`
    /// servings. At most [`MAX_RESULTS`] combined results.
    ///
    /// Fails with [`ApiClientError::MissingCredentials`] before any network
    /// call when the app id or key is not configured.
    pub async fn search(
        &self,
        query: &str,
        amount: i64,
    ) -> Result<Vec<FoodApiItem>, ApiClientError> {
        let (app_id, app_key) = match (self.app_id.as_deref(), self.app_key.as_deref()) {
            (Some(id), Some(key)) => (id, key),
            _ => return Err(ApiClientError::MissingCredentials),
        };

        let instant = self.instant_search(query, app_id, app_key).await?;

        let mut items = Vec::new();
        for candidate in instant.common.iter().take(MAX_RESULTS) {
            let details = self
                .common_details(&candidate.food_name, app_id, app_key)
                .await?;
            items.push(scale_details(&details, amount));
        }

        let remaining = MAX_RESULTS.saturating_sub(items.len());
        for candidate in instant.branded.iter().take(remaining) {
            let details = self
                .branded_details(&candidate.nix_item_id, app_id, app_key)
                .await?;
            items.push(scale_details(&details, amount));
        }

        Ok(items)
    }

    async fn instant_search(
        &self,
        query: &str,
        app_id: &str,
        app_key: &str,
    ) -> Result<InstantSearchResponse, ApiClientError> {
        let url = format!("{}/v2/search/instant", self.base_url);
        retry_with_backoff("food_instant_search", || async {
            let response = self
                .http
                .get(&url)
                .header("x-app-id", app_id)
                .header("x-app-key", app_key)
                .query(&[("query", query)])
                .send()
                .await
                .map_err(|e| ApiClientError::Request(e.to_string()))?;
            parse_json(response).await
        })
        .await
    }

    /// Common foods have no item id; nutrition facts come from a
    /// natural-language query on the food name.
    async fn common_details(
        &self,
        food_name: &str,
        app_id: &str,
        app_key: &str,
    ) -> Result<FoodDetails, ApiClientError> {
        let url = format!("{}/v2/natural/nutrients", self.base_url);
        let details: FoodDetailsResponse = retry_with_backoff("food_common_details", || async {
            let response = self
                .http
                .post(&url)
                .header("x-app-id", app_id)
                .header("x-app-key", app_key)
                .json(&json!({ "query": food_name }))
                .send()
                .await
                .map_err(|e| ApiClientError::Request(e.to_string()))?;
            parse_json(response).await
        })
        .await?;

        details
            .foods
            .into_iter()
            .next()
            .ok_or_else(|| ApiClientError::Shape(format!("no details for '{food_name}'")))
    }

    async fn branded_details(
        &self,
        nix_item_id: &str,
        app_id: &str,
        app_key: &str,
    ) -> Result<FoodDetails, ApiClientError> {
        let url = format!("{}/v2/search/item", self.base_url);
        let details: FoodDetailsResponse = retry_with_backoff("food_branded_details", || async {
            let response = self
                .http
                .get(&url)
                .header("x-app-id", app_id)
                .header("x-app-key", app_key)
                .query(&[("nix_item_id", nix_item_id)])
                .send()
                .await
                .map_err(|e| ApiClientError::Request(e.to_string()))?;
            parse_json(response).await
        })
        .await?;

        details
            .foods
            .into_iter()
            .next()
            .ok_or_else(|| ApiClientError::Shape(format!("no details for item '{nix_item_id}'")))
    }
}

async fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiClientError::Status(status, body));
    }

    response
        .json()
        .await
        .map_err(|e| ApiClientError::Shape(e.to_string()))
}

fn scale_details(details: &FoodDetails, amount: i64) -> FoodApiItem {
    FoodApiItem {
        name: details.food_name.clone(),
        calories: (details.nf_calories * amount as f64).round() as i64,
        count: amount,
        unit: details.serving_unit.clone(),
    }
}
