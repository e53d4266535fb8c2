// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod auth;
pub mod exercise;
pub mod food;
pub mod user;

use crate::error::AppError;
use crate::middleware::auth::{optional_auth, require_auth};
use crate::middleware::rate_limit::limit_auth_attempts;
use crate::response::ApiResponse;
use crate::AppState;
use axum::http::{header, Method, Uri};
use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Health check response
async fn health_check() -> Json<ApiResponse> {
    ApiResponse::success("Service is healthy.", json!({ "status": "ok" }))
}

/// Unknown paths get the same envelope as every other response.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}.", uri.path()))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Login/register get a per-IP rate limit on top of being public
    let auth_routes = auth::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_auth_attempts));

    // The find routes serve anonymous callers but honor a token if present
    let lookup_routes = Router::new()
        .merge(exercise::lookup_routes())
        .merge(food::lookup_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(lookup_routes);

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(user::routes())
        .merge(exercise::protected_routes())
        .merge(food::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
