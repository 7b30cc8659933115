use crate::{types::HealthResponse, AppState};
use axum::{extract::State, Json};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend_url: state.config.backend.base_url.clone(),
    })
}
