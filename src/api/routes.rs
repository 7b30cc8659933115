use crate::api::handlers::{health, pages};
use crate::AppState;
use axum::{routing::get, Router};

/// JSON endpoints, nested under `/api` by [`crate::api::build_app`].
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/routes", get(pages::list_routes))
        .route("/routes/resolve", get(pages::resolve_route))
        .route("/{*rest}", get(pages::api_not_found))
}
