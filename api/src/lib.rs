use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        handle::handle_route::handle, health_route::health, roles_route::list_roles,
    },
};

/// Listen address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// Build the HTTP application around shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/handle", post(handle))
        .route("/roles", get(list_roles))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load state from env, bind `API_ADDRESS`, and serve until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
