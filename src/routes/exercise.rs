// SPDX-License-Identifier: MIT

//! Exercise routes: search the calorie-burn estimator and log entries.

use crate::error::{AppError, Result};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::models::NewExercise;
use crate::response::ApiResponse;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub fn lookup_routes() -> Router<Arc<AppState>> {
    Router::new().route("/exercise/find", get(find))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/exercise/add", post(add))
}

#[derive(Debug, Deserialize)]
struct FindQuery {
    name: Option<String>,
    duration: Option<String>,
}

/// Search activities by name. Uses the caller's stored weight when a
/// valid token is present, a default weight otherwise.
async fn find(
    State(state): State<Arc<AppState>>,
    Extension(MaybeUser(user_id)): Extension<MaybeUser>,
    Query(params): Query<FindQuery>,
) -> Result<Json<ApiResponse>> {
    let name = sanitize_name(params.name.as_deref())?;
    let duration = parse_duration(params.duration.as_deref())?;

    let exercises = state.exercise_service.find(user_id, &name, duration).await?;

    Ok(ApiResponse::success(
        "Retrieved exercises.",
        json!({ "exercises": exercises }),
    ))
}

/// Log an exercise for the authenticated caller.
async fn add(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(entry): Json<NewExercise>,
) -> Result<(StatusCode, Json<ApiResponse>)> {
    entry.validate()?;
    state.exercise_service.add(user.user_id, &entry).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Exercise added.", Value::Null),
    ))
}

/// Strip the query down to letters and spaces, as the upstream API only
/// understands activity names.
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

fn parse_duration(raw: Option<&str>) -> Result<i64> {
    let raw = raw.ok_or_else(|| {
        AppError::BadRequest("Please provide duration of the exercise.".to_string())
    })?;

    let duration: i64 = raw.trim().parse().map_err(|_| {
        AppError::BadRequest("Please provide a valid duration value.".to_string())
    })?;

    if duration <= 0 {
        return Err(AppError::BadRequest(
            "Duration must be greater than 0.".to_string(),
        ));
    }
    Ok(duration)
}
