// SPDX-License-Identifier: MIT

//! User profile routes (require authentication).

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::UserAttributes;
use crate::response::ApiResponse;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/profile", get(get_profile))
        .route("/user/set-attr", post(set_attributes))
}

/// Get the caller's profile with logged exercises and foods included.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse>> {
    let profile = state.user_service.get_profile(user.user_id).await?;

    Ok(ApiResponse::success(
        "Profile successfully retrieved.",
        json!({ "user": profile }),
    ))
}

/// Update the caller's demographic attributes. The derived nutrition
/// fields are recomputed via the external calculator as part of the same
/// update.
async fn set_attributes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(attrs): Json<UserAttributes>,
) -> Result<Json<ApiResponse>> {
    attrs.validate()?;

    let updated = state
        .user_service
        .update_attributes(user.user_id, attrs)
        .await?;

    Ok(ApiResponse::success(
        "Attributes successfully set.",
        json!({ "user": updated }),
    ))
}
