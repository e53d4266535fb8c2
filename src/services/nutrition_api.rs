// SPDX-License-Identifier: MIT

//! Nutrition calculator API client.
//!
//! Computes BMI, daily calorie needs and macronutrient targets from a
//! user's demographic attributes. The upstream response is a BMI/EER
//! block plus a row-oriented macronutrient table; both are normalized
//! into [`NutritionFacts`].

use crate::models::{NutritionFacts, UserAttributes};
use crate::services::backoff::retry_with_backoff;
use crate::services::ApiClientError;
use serde::Deserialize;

/// Client for the nutrition calculator API.
#[derive(Clone)]
pub struct NutritionApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NutritionResponse {
    #[serde(rename = "BMI_EER")]
    bmi_eer: BmiEer,
    macronutrients_table: MacronutrientsTable,
}

#[derive(Debug, Deserialize)]
struct BmiEer {
    #[serde(rename = "BMI")]
    bmi: String,
    #[serde(rename = "Estimated Daily Caloric Needs")]
    estimated_daily_caloric_needs: String,
}

#[derive(Debug, Deserialize)]
struct MacronutrientsTable {
    #[serde(rename = "macronutrients-table")]
    rows: Vec<Vec<String>>,
}

impl NutritionApiClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: crate::services::http_client(),
            base_url,
            api_key,
        }
    }

    /// Compute nutrition facts for the given attributes.
    ///
    /// Fails with [`ApiClientError::MissingCredentials`] before any network
    /// call when no API key is configured.
    pub async fn calculate(
        &self,
        attrs: &UserAttributes,
    ) -> Result<NutritionFacts, ApiClientError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiClientError::MissingCredentials)?;

        let url = format!("{}/api/nutrition-info", self.base_url);

        let response: NutritionResponse = retry_with_backoff("nutrition_calculate", || async {
            let response = self
                .http
                .get(&url)
                .header("X-RapidAPI-Key", api_key)
                .query(&[
                    ("measurement_units", "met".to_string()),
                    ("sex", attrs.gender.as_str().to_string()),
                    ("age_value", attrs.age.to_string()),
                    ("age_type", "yrs".to_string()),
                    ("cm", attrs.height.to_string()),
                    ("kilos", attrs.weight.to_string()),
                    ("activity_level", "Active".to_string()),
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

        facts_from_response(response)
    }
}

fn facts_from_response(response: NutritionResponse) -> Result<NutritionFacts, ApiClientError> {
    let rows = &response.macronutrients_table.rows;

    Ok(NutritionFacts {
        bmi: response.bmi_eer.bmi,
        calories: response.bmi_eer.estimated_daily_caloric_needs,
        carbs: macro_row(rows, "Carb")?,
        fiber: macro_row(rows, "Fiber")?,
        protein: macro_row(rows, "Protein")?,
        fat: macro_row(rows, "Fat")?,
    })
}

/// Find a macronutrient row by label prefix. The first row is a header,
/// and upstream labels vary slightly ("Carbs" vs "Carbohydrate"), so the
/// match is a case-insensitive prefix check.
fn macro_row(rows: &[Vec<String>], label: &str) -> Result<String, ApiClientError> {
    rows.iter()
        .skip(1)
        .find(|row| {
            row.first()
                .is_some_and(|cell| cell.to_lowercase().starts_with(&label.to_lowercase()))
        })
        .and_then(|row| row.get(1))
        .cloned()
        .ok_or_else(|| ApiClientError::Shape(format!("missing macronutrient row '{label}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_fixture() -> Vec<Vec<String>> {
        vec![
            vec!["Macronutrient".to_string(), "Recommended Intake Per Day".to_string()],
            vec!["Carbs".to_string(), "320 - 460 grams".to_string()],
            vec!["Fiber".to_string(), "40 grams".to_string()],
            vec!["Protein".to_string(), "65 grams".to_string()],
            vec!["Fat".to_string(), "65 - 110 grams".to_string()],
        ]
    }

    #[test]
    fn test_parse_full_response() {
        let response = NutritionResponse {
            bmi_eer: BmiEer {
                bmi: "25.5".to_string(),
                estimated_daily_caloric_needs: "2,900 kcal/day".to_string(),
            },
            macronutrients_table: MacronutrientsTable {
                rows: table_fixture(),
            },
        };

        let facts = facts_from_response(response).unwrap();
        assert_eq!(facts.bmi, "25.5");
        assert_eq!(facts.calories, "2,900 kcal/day");
        assert_eq!(facts.carbs, "320 - 460 grams");
        assert_eq!(facts.fiber, "40 grams");
        assert_eq!(facts.protein, "65 grams");
        assert_eq!(facts.fat, "65 - 110 grams");
    }

    #[test]
    fn test_missing_row_is_shape_error() {
        let mut rows = table_fixture();
        rows.retain(|row| row_first(row) != Some("Fiber"));

        let response = NutritionResponse {
            bmi_eer: BmiEer {
                bmi: "25.5".to_string(),
                estimated_daily_caloric_needs: "2,900 kcal/day".to_string(),
            },
            macronutrients_table: MacronutrientsTable { rows },
        };

        assert!(matches!(
            facts_from_response(response),
            Err(ApiClientError::Shape(_))
        ));
    }

    fn row_first(row: &[String]) -> Option<&str> {
        row.first().map(String::as_str)
    }

    #[test]
    fn test_label_match_is_prefix_and_case_insensitive() {
        let rows = vec![
            vec!["header".to_string(), "value".to_string()],
            vec!["Carbohydrate".to_string(), "300 grams".to_string()],
        ];
        assert_eq!(macro_row(&rows, "Carb").unwrap(), "300 grams");
        assert_eq!(macro_row(&rows, "carbohydrate").unwrap(), "300 grams");
    }
}
