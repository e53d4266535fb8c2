// SPDX-License-Identifier: MIT

//! Authentication routes: login, register, logout.

use crate::error::Result;
use crate::middleware::auth::create_jwt;
use crate::response::ApiResponse;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

/// Login/register request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsPayload {
    #[validate(length(min = 1, max = 100, message = "Username cannot be empty."))]
    username: String,
    #[validate(length(min = 1, max = 255, message = "Password cannot be empty."))]
    password: String,
}

/// Log in with username and password, returning a bearer token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<ApiResponse>> {
    payload.validate()?;

    let user_id = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;
    let token = create_jwt(user_id, &state.config.jwt_signing_key)?;

    Ok(ApiResponse::success(
        "Successfully logged in.",
        json!({ "token": token }),
    ))
}

/// Register a new account and return a bearer token for it.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<ApiResponse>> {
    payload.validate()?;

    let user_id = state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;
    let token = create_jwt(user_id, &state.config.jwt_signing_key)?;

    Ok(ApiResponse::success(
        "Successfully registered.",
        json!({ "token": token }),
    ))
}

/// Sessions are stateless bearer tokens; logout is the client discarding
/// its token. The endpoint exists so the frontend has something to call.
async fn logout() -> Json<ApiResponse> {
    ApiResponse::success("Logged out successfully.", Value::Null)
}
