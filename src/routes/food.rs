// SPDX-License-Identifier: MIT

//! Food routes: search the nutrition lookup and log entries.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::NewFood;
use crate::response::ApiResponse;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub fn lookup_routes() -> Router<Arc<AppState>> {
    Router::new().route("/food/find", get(find))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/food/add", post(add))
}

#[derive(Debug, Deserialize)]
struct FindQuery {
    name: Option<String>,
    amount: Option<String>,
}

/// Search foods by name, scaling calories by the requested amount.
async fn find(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FindQuery>,
) -> Result<Json<ApiResponse>> {
    let name = sanitize_name(params.name.as_deref())?;
    let amount = parse_amount(params.amount.as_deref())?;

    let foods = state.food_service.find(&name, amount).await?;

    Ok(ApiResponse::success(
        "Foods retrieved.",
        json!({ "foods": foods }),
    ))
}

/// Log a food item for the authenticated caller.
async fn add(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(entry): Json<NewFood>,
) -> Result<Json<ApiResponse>> {
    entry.validate()?;
    state.food_service.add(user.user_id, &entry).await?;

    Ok(ApiResponse::success(
        "Food item successfully added.",
        Value::Null,
    ))
}

fn sanitize_name(raw: Option<&str>) -> Result<String> {
    let name: String = raw
        .unwrap_or("")
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Name must be a string and contain at least 1 letter.".to_string(),
        ));
    }
    Ok(name)
}

fn parse_amount(raw: Option<&str>) -> Result<i64> {
    let raw = raw.ok_or_else(|| {
        AppError::BadRequest("Please provide the amount of the food.".to_string())
    })?;

    let amount: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Please provide a valid amount value.".to_string()))?;

    if amount <= 0 {
        return Err(AppError::BadRequest(
            "Amount must be greater than 0.".to_string(),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(Some("2")).unwrap(), 2);
        assert!(parse_amount(None).is_err());
        assert!(parse_amount(Some("two")).is_err());
        assert!(parse_amount(Some("0")).is_err());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(Some(" apple pie! ")).unwrap(), "apple pie");
        assert!(sanitize_name(Some("")).is_err());
    }
}
