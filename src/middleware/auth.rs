// SPDX-License-Identifier: MIT

//! JWT authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session lifetime in seconds (24 hours).
const TOKEN_TTL_SECS: usize = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Authentication state on routes that serve both anonymous and
/// logged-in callers.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<i64>);

/// Middleware that requires a valid bearer token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or(AppError::Unauthorized("Unauthorized - Please provide valid token"))?;

    let user_id = verify_jwt(&token, &state.config.jwt_signing_key)
        .ok_or(AppError::Unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Middleware that extracts the user when a valid token is present, but
/// lets anonymous requests through.
pub async fn optional_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = bearer_token(&request)
        .and_then(|token| verify_jwt(&token, &state.config.jwt_signing_key));

    request.extensions_mut().insert(MaybeUser(user_id));
    next.run(request).await
}

fn bearer_token(request: &Request) -> Option<String> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

fn verify_jwt(token: &str, signing_key: &[u8]) -> Option<i64> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    token_data.claims.sub.parse().ok()
}

/// Create a JWT for a user session.
pub fn create_jwt(user_id: i64, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
