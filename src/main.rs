// SPDX-License-Identifier: MIT

//! Calorie Tracker API Server
//!
//! Serves registration/login, user profiles with derived nutrition
//! targets, and exercise/food logging backed by third-party lookup APIs.

use calorie_tracker::{config::Config, db::Database, routes, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Calorie Tracker API");

    if config.exercise_api_key.is_none() {
        tracing::warn!("EXERCISE_API_KEY not set; /exercise/find will be unavailable");
    }
    if config.food_api_key.is_none() || config.food_api_id.is_none() {
        tracing::warn!("FOOD_API_KEY/FOOD_API_ID not set; /food/find will be unavailable");
    }
    if config.user_api_key.is_none() {
        tracing::warn!("USER_API_KEY not set; /user/set-attr will be unavailable");
    }

    // Open the database and run migrations
    let db = Database::connect(&config.database_url).await?;
    tracing::info!(url = %config.database_url, "Database ready");

    let port = config.port;
    let state = Arc::new(AppState::new(config, db));

    // Build router
    let app = routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    state.db.close().await;
    tracing::info!("Database connection closed, shutting down");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calorie_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

/// Resolve on SIGINT or SIGTERM so the server can drain connections.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
