//! Static shell host
//!
//! `greenayu serve` hosts the built web frontend and a few JSON endpoints
//! the frontend and operators use. Inference never goes through here: the
//! browser calls the backend directly.
//!
//! # API Endpoints
//!
//! - `GET /api/health` - liveness, version and configured backend URL
//! - `GET /api/routes` - the page table with guard status
//! - `GET /api/routes/resolve?path=...` - the page a browser path renders
//!
//! Every other path is served from `server.static_dir`, falling back to
//! `index.html` so client-side routes survive a reload.

/// Request handlers.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{AppError, Result};
use crate::utils::toml_config::GreenAyuConfig;
use crate::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Full application: API, static files and middleware.
pub fn build_app(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let index = static_dir.join("index.html");
    if !index.exists() {
        warn!(
            "{} not found; build the frontend (trunk build) before serving pages",
            index.display()
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::create_router())
        .fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `server.host:server.port` and serves until Ctrl-C.
pub async fn serve(config: GreenAyuConfig) -> Result<()> {
    let addr = config.bind_addr();
    let state = AppState {
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
    info!("GreenAyu shell listening on http://{}", addr);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))
}
