use greenayu_core::{AuthError, FeatureError, Route, RouteGuard, StorageError};
use serde::Serialize;

// ============= Shell Host Response Types =============

/// `GET /api/health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backend_url: String,
}

/// One entry of the route table as served by `GET /api/routes`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub title: &'static str,
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<&'static str>,
}

impl RouteInfo {
    /// Describes `route` as seen through `guard`.
    pub fn for_route(route: Route, guard: &RouteGuard) -> Self {
        Self {
            path: route.path(),
            title: route.title(),
            protected: guard.is_protected(route.path()),
            endpoint: match route {
                Route::Feature(kind) => Some(kind.endpoint()),
                _ => None,
            },
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Feature(#[from] FeatureError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Sign in required. Run `greenayu login` first.")]
    SignInRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Auth(_) | AppError::SignInRequired => axum::http::StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) | AppError::Feature(FeatureError::Validation(_)) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::Feature(_) => axum::http::StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Storage(_) | AppError::Internal(_) => {
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
