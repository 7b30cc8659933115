use crate::{
    types::{AppError, Result, RouteInfo},
    AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use greenayu_core::Route;
use serde::Deserialize;

/// Every page with its guard status, in navigation order.
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteInfo>> {
    let guard = state.config.route_guard();
    Json(
        Route::ALL
            .iter()
            .map(|route| RouteInfo::for_route(*route, &guard))
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: Option<String>,
}

/// Which page a browser path renders. Unknown paths resolve to `/404`.
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<RouteInfo>> {
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("path query parameter is required".to_string()))?;

    let guard = state.config.route_guard();
    Ok(Json(RouteInfo::for_route(Route::resolve(&path), &guard)))
}

pub async fn api_not_found() -> AppError {
    AppError::NotFound("no such API endpoint".to_string())
}
