//! Error types for greenayu-core.

use thiserror::Error;

/// Remediation shown whenever the inference backend cannot be reached.
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot reach API. Make sure backend is running and reachable (CORS enabled for browser clients).";

/// Classified failure of one feature submission.
///
/// Exactly one of a result or a `FeatureError` is produced per submission.
/// [`FeatureError::Busy`] is the exception: it rejects an overlapping attempt
/// and never replaces the live outcome of the pending one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("{}", UNREACHABLE_MESSAGE)]
    NetworkUnreachable {
        /// Underlying transport detail, kept for logs.
        detail: String,
    },

    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided text, or a generic status message.
        message: String,
    },

    /// Backend answered 2xx but omitted a contracted field.
    #[error("API response missing {field}.")]
    MalformedResponse {
        /// Name of the missing or mistyped field.
        field: String,
    },

    /// Backend answered 2xx with a body that is not JSON.
    #[error("API response is not valid JSON: {0}")]
    InvalidJson(String),

    /// A submission for the same adapter is still pending.
    #[error("A submission is already in progress")]
    Busy,
}

/// Coarse category of a [`FeatureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureErrorKind {
    /// File type/size rejected or a field missing.
    Validation,
    /// Transport failure.
    NetworkUnreachable,
    /// Non-2xx HTTP status.
    NonSuccessStatus,
    /// 2xx response without the contracted shape.
    MalformedResponse,
    /// Overlapping submission rejected.
    Rejected,
}

impl FeatureError {
    /// Builds a status error, preferring backend text over the bare code.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed ({})", status)
        } else {
            body.to_string()
        };
        FeatureError::Status { status, message }
    }

    /// Builds a malformed-response error naming `field`.
    pub fn missing(field: impl Into<String>) -> Self {
        FeatureError::MalformedResponse {
            field: field.into(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> FeatureErrorKind {
        match self {
            FeatureError::Validation(_) => FeatureErrorKind::Validation,
            FeatureError::NetworkUnreachable { .. } => FeatureErrorKind::NetworkUnreachable,
            FeatureError::Status { .. } => FeatureErrorKind::NonSuccessStatus,
            FeatureError::MalformedResponse { .. } | FeatureError::InvalidJson(_) => {
                FeatureErrorKind::MalformedResponse
            }
            FeatureError::Busy => FeatureErrorKind::Rejected,
        }
    }
}

/// Failure reported by a [`Transport`](crate::feature::Transport).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Host unreachable or the connection broke mid-exchange.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// No response within the client-side timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The payload could not be encoded; nothing was sent.
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
}

impl From<TransportError> for FeatureError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::InvalidRequest(detail) => {
                tracing::debug!(%detail, "Payload rejected by transport");
                FeatureError::Validation(crate::feature::upload::UNSUPPORTED_TYPE_MESSAGE.to_string())
            }
            other => FeatureError::NetworkUnreachable {
                detail: other.to_string(),
            },
        }
    }
}

/// Failure of the durable session storage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Storage could not be read.
    #[error("failed to read session storage: {0}")]
    Read(String),

    /// Storage could not be written.
    #[error("failed to write session storage: {0}")]
    Write(String),

    /// Stored data could not be decoded.
    #[error("session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Authentication failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Identifier/secret did not match.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Credentials matched but the session could not be persisted.
    #[error("Could not save session: {0}")]
    Storage(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Storage(err.to_string())
    }
}
