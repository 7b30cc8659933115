//! Feature adapters.
//!
//! Every feature page repeats the same contract: gather input, validate it
//! locally, send exactly one request to a fixed endpoint, and map the JSON
//! reply into a view model. [`Feature`] captures the per-feature parts
//! (schema, endpoint, mapping); [`FeatureAdapter`] owns the shared parts
//! (single-flight, error classification, outcome slot).
//!
//! | Feature | Endpoint | Body |
//! |---|---|---|
//! | [`identify::IdentifyHealth`] | `/plant/analyze` | multipart image |
//! | [`fertilizer::Fertilizer`] | `/fertilizer` | JSON |
//! | [`yield_forecast::YieldForecast`] | `/yield` | JSON |
//! | [`shelf_life::ShelfLife`] | `/shelf-life` | JSON |
//! | [`parts::PartsQuality`] | `/plant-part` | multipart image |

pub mod adapter;
pub mod fertilizer;
pub mod identify;
pub mod options;
pub mod parts;
pub mod shelf_life;
pub mod upload;
pub mod yield_forecast;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{AdapterState, FeatureAdapter};
pub use upload::ImageUpload;

use crate::error::{FeatureError, TransportError};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Multipart field name image uploads are sent under.
pub const UPLOAD_FIELD: &str = "file";

/// The five backend-powered features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    /// Species and health classification from a photo.
    IdentifyHealth,
    /// Fertilizer recommendation from soil and climate readings.
    Fertilizer,
    /// Yield forecast from field conditions.
    Yield,
    /// Shelf-life prediction from storage conditions.
    ShelfLife,
    /// Plant-part detection from a photo.
    PartsQuality,
}

/// How a feature encodes its request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `application/json`
    Json,
    /// `multipart/form-data` with one image part
    Multipart,
}

impl FeatureKind {
    /// All features in navigation order.
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::IdentifyHealth,
        FeatureKind::Fertilizer,
        FeatureKind::Yield,
        FeatureKind::ShelfLife,
        FeatureKind::PartsQuality,
    ];

    /// Backend endpoint path, relative to the configured base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FeatureKind::IdentifyHealth => "/plant/analyze",
            FeatureKind::Fertilizer => "/fertilizer",
            FeatureKind::Yield => "/yield",
            FeatureKind::ShelfLife => "/shelf-life",
            FeatureKind::PartsQuality => "/plant-part",
        }
    }

    /// Frontend route path.
    pub fn route_path(&self) -> &'static str {
        match self {
            FeatureKind::IdentifyHealth => "/features/identify-health",
            FeatureKind::Fertilizer => "/features/fertilizer",
            FeatureKind::Yield => "/features/yield",
            FeatureKind::ShelfLife => "/features/shelf-life",
            FeatureKind::PartsQuality => "/features/parts-quality",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKind::IdentifyHealth => "Identify & Health",
            FeatureKind::Fertilizer => "Fertilizer Mix",
            FeatureKind::Yield => "Yield Forecast",
            FeatureKind::ShelfLife => "Stability Analysis",
            FeatureKind::PartsQuality => "Quality Grade",
        }
    }

    /// One-line description for menus.
    pub fn description(&self) -> &'static str {
        match self {
            FeatureKind::IdentifyHealth => "Disease & species check",
            FeatureKind::Fertilizer => "Growth optimization",
            FeatureKind::Yield => "Harvest projections",
            FeatureKind::ShelfLife => "Potency retention",
            FeatureKind::PartsQuality => "Specimen grading",
        }
    }

    /// Request body encoding.
    pub fn encoding(&self) -> Encoding {
        match self {
            FeatureKind::IdentifyHealth | FeatureKind::PartsQuality => Encoding::Multipart,
            _ => Encoding::Json,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outbound request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON document.
    Json(Value),
    /// Multipart form with a single file part.
    Multipart {
        /// Form field name, always [`UPLOAD_FIELD`] for the shipped features.
        field: &'static str,
        /// The validated file.
        upload: ImageUpload,
    },
}

impl Payload {
    /// Serializes `body` into a JSON payload.
    pub fn json<T: Serialize>(body: &T) -> Result<Self, FeatureError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|e| FeatureError::Validation(format!("Could not encode request: {}", e)))
    }
}

/// Status and body text of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body as text (empty if unreadable).
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries one payload to the inference backend.
///
/// Implementations resolve `path` against their own base URL. They report
/// only transport failures; HTTP status handling belongs to the adapter.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    /// Sends `payload` to `path` and returns whatever the server answered.
    async fn send(&self, path: &str, payload: Payload) -> Result<RawResponse, TransportError>;
}

/// Per-feature schema, endpoint and response mapping.
pub trait Feature {
    /// Which feature this is.
    const KIND: FeatureKind;

    /// Form state submitted by the user.
    type Input;

    /// View model built from a successful response.
    type Output: Clone;

    /// Local checks run before any network call.
    fn validate(input: &Self::Input) -> Result<(), FeatureError>;

    /// Builds the request body from validated input.
    fn payload(input: &Self::Input) -> Result<Payload, FeatureError>;

    /// Maps a parsed 2xx body into the view model.
    fn map_response(input: &Self::Input, body: &Value) -> Result<Self::Output, FeatureError>;
}

/// Scales a `[0,1]` confidence to an integer percentage.
///
/// Values are clamped to `[0,1]` and rounded half-up. Floating-point noise
/// below 1e-9 is discarded first so that `0.845` scales to exactly `84.5`
/// and rounds to `85`.
pub fn confidence_percent(fraction: f64) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    let scaled = fraction.clamp(0.0, 1.0) * 100.0;
    let scaled = (scaled * 1e9).round() / 1e9;
    (scaled + 0.5).floor() as u32
}

/// Reads a required string at `pointer`, reporting `field` when absent.
pub(crate) fn required_str<'a>(
    body: &'a Value,
    pointer: &str,
    field: &str,
) -> Result<&'a str, FeatureError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FeatureError::missing(field))
}

/// Reads a required number at `pointer`, reporting `field` when absent.
pub(crate) fn required_f64(body: &Value, pointer: &str, field: &str) -> Result<f64, FeatureError> {
    body.pointer(pointer)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or_else(|| FeatureError::missing(field))
}

/// Rejects non-finite numbers.
pub(crate) fn ensure_finite(label: &str, value: f64) -> Result<(), FeatureError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FeatureError::Validation(format!("{} is required.", label)))
    }
}

/// Rejects values outside `[min, max]` (and non-finite ones).
pub(crate) fn ensure_range(label: &str, value: f64, min: f64, max: f64) -> Result<(), FeatureError> {
    ensure_finite(label, value)?;
    if value < min || value > max {
        return Err(FeatureError::Validation(format!(
            "{} must be between {} and {}.",
            label, min, max
        )));
    }
    Ok(())
}

/// Rejects negative values (and non-finite ones).
pub(crate) fn ensure_non_negative(label: &str, value: f64) -> Result<(), FeatureError> {
    ensure_finite(label, value)?;
    if value < 0.0 {
        return Err(FeatureError::Validation(format!(
            "{} cannot be negative.",
            label
        )));
    }
    Ok(())
}

/// Trimmed label or `fallback` when blank.
pub(crate) fn label_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0.8765, 88)]
    #[case(0.845, 85)]
    #[case(0.5, 50)]
    #[case(0.005, 1)]
    #[case(0.0049, 0)]
    #[case(0.0, 0)]
    #[case(1.0, 100)]
    #[case(0.125, 13)]
    #[case(0.335, 34)]
    #[case(1.7, 100)]
    #[case(-0.2, 0)]
    #[case(f64::NAN, 0)]
    fn confidence_rounds_half_up(#[case] fraction: f64, #[case] expected: u32) {
        assert_eq!(confidence_percent(fraction), expected);
    }

    #[test]
    fn feature_tables_are_consistent() {
        for kind in FeatureKind::ALL {
            assert!(kind.endpoint().starts_with('/'));
            assert!(kind.route_path().starts_with("/features/"));
        }
        assert_eq!(FeatureKind::IdentifyHealth.encoding(), Encoding::Multipart);
        assert_eq!(FeatureKind::PartsQuality.encoding(), Encoding::Multipart);
        assert_eq!(FeatureKind::ShelfLife.encoding(), Encoding::Json);
    }

    #[test]
    fn required_fields_reject_wrong_types() {
        let body = json!({"a": "text", "n": 1.5, "s": "2.5", "blank": "  "});

        assert_eq!(required_str(&body, "/a", "a").unwrap(), "text");
        assert_eq!(required_f64(&body, "/n", "n").unwrap(), 1.5);
        assert_eq!(
            required_f64(&body, "/s", "s").unwrap_err(),
            FeatureError::missing("s")
        );
        assert_eq!(
            required_str(&body, "/n", "n").unwrap_err(),
            FeatureError::missing("n")
        );
        assert!(required_str(&body, "/blank", "blank").is_err());
        assert!(required_str(&body, "/nested/x", "nested.x").is_err());
    }

    #[test]
    fn range_checks() {
        assert!(ensure_range("Damage Level", 0.3, 0.0, 1.0).is_ok());
        assert_eq!(
            ensure_range("Damage Level", 1.3, 0.0, 1.0).unwrap_err(),
            FeatureError::Validation("Damage Level must be between 0 and 1.".into())
        );
        assert_eq!(
            ensure_finite("Rainfall", f64::NAN).unwrap_err(),
            FeatureError::Validation("Rainfall is required.".into())
        );
        assert!(ensure_non_negative("Nitrogen", -1.0).is_err());
    }

    #[test]
    fn raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }
}
