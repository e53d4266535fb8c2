// SPDX-License-Identifier: MIT

//! Calorie-burn estimator API client.
//!
//! Looks up activities by name and estimates calories burned for a given
//! body weight and duration. Transient failures are retried with
//! exponential backoff; results are capped before they reach callers.

use crate::models::ExerciseApiItem;
use crate::services::backoff::retry_with_backoff;
use crate::services::ApiClientError;

/// Maximum number of results returned to callers.
pub const MAX_RESULTS: usize = 5;

/// Client for the calories-burned API.
#[derive(Clone)]
pub struct CaloriesBurnedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CaloriesBurnedClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: crate::services::http_client(),
            base_url,
            api_key,
        }
    }

    /// Search activities matching `activity`, estimating burn for the given
    /// weight (kg) and duration (minutes). At most [`MAX_RESULTS`] items.
    ///
    /// Fails with [`ApiClientError::MissingCredentials`] before any network
    /// call when no API key is configured.
    pub async fn search(
        &self,
        activity: &str,
        weight: i64,
        duration: i64,
    ) -> Result<Vec<ExerciseApiItem>, ApiClientError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiClientError::MissingCredentials)?;

        let url = format!("{}/v1/caloriesburned", self.base_url);

        let items: Vec<ExerciseApiItem> = retry_with_backoff("exercise_find", || async {
            let response = self
                .http
                .get(&url)
                .header("X-Api-Key", api_key)
                .query(&[
                    ("activity", activity.to_string()),
                    ("weight", weight.to_string()),
                    ("duration", duration.to_string()),
                ])
                .send()
                .await
                .map_err(|e| ApiClientError::Request(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(ApiClientError::Status(status, body));
            }

            response
                .json()
                .await
                .map_err(|e| ApiClientError::Shape(e.to_string()))
        })
        .await?;

        Ok(truncate_results(items))
    }
}

fn truncate_results(mut items: Vec<ExerciseApiItem>) -> Vec<ExerciseApiItem> {
    items.truncate(MAX_RESULTS);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> ExerciseApiItem {
        ExerciseApiItem {
            name: format!("activity-{n}"),
            calories_per_hour: 600,
            duration_minutes: 30,
            total_calories: 300,
        }
    }

    #[test]
    fn test_truncates_to_cap() {
        let items: Vec<_> = (0..8).map(item).collect();
        assert_eq!(truncate_results(items).len(), MAX_RESULTS);
    }

    #[test]
    fn test_short_lists_pass_through() {
        let items: Vec<_> = (0..2).map(item).collect();
        assert_eq!(truncate_results(items).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = CaloriesBurnedClient::new("http://127.0.0.1:1".to_string(), None);
        let err = client.search("running", 75, 30).await.unwrap_err();
        assert!(matches!(err, ApiClientError::MissingCredentials));
    }
}
