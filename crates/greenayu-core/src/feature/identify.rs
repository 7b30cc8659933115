//! Identify & Health: species category and health class from one photo.

use super::upload::{require_image, ImageUpload};
use super::{
    confidence_percent, required_f64, required_str, Feature, FeatureKind, Payload, UPLOAD_FIELD,
};
use crate::error::FeatureError;
use serde::Serialize;
use serde_json::Value;

const HEALTHY_ADVICE: &str = "Plant looks healthy. Suitable for harvesting / processing.";
const UNHEALTHY_ADVICE: &str =
    "Plant shows possible issues. Consider checking soil, water, and fertilizer plan.";

/// Form state.
#[derive(Debug, Clone, Default)]
pub struct IdentifyInput {
    /// Optional name the user knows the plant by.
    pub plant_name: Option<String>,
    /// The photo to analyze.
    pub image: Option<ImageUpload>,
}

/// Mapped analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyResult {
    /// `"<name> (<category>)"` when a name was given, else the category.
    pub plant: String,
    /// Predicted species category.
    pub category: String,
    /// Category confidence, percent.
    pub category_confidence: u32,
    /// Predicted health class.
    pub health: String,
    /// Health confidence, percent.
    pub health_confidence: u32,
    /// The higher of the two confidences, percent.
    pub confidence: u32,
    /// Whether the health class is `healthy`.
    pub healthy: bool,
    /// Advice derived from the health class.
    pub recommendation: String,
}

/// `POST /plant/analyze`, multipart.
pub struct IdentifyHealth;

impl Feature for IdentifyHealth {
    const KIND: FeatureKind = FeatureKind::IdentifyHealth;
    type Input = IdentifyInput;
    type Output = IdentifyResult;

    fn validate(input: &IdentifyInput) -> Result<(), FeatureError> {
        require_image(input.image.as_ref()).map(|_| ())
    }

    fn payload(input: &IdentifyInput) -> Result<Payload, FeatureError> {
        let upload = require_image(input.image.as_ref())?;
        Ok(Payload::Multipart {
            field: UPLOAD_FIELD,
            upload: upload.clone(),
        })
    }

    fn map_response(input: &IdentifyInput, body: &Value) -> Result<IdentifyResult, FeatureError> {
        let category = required_str(body, "/plant_category/class", "plant_category.class")?;
        let category_conf =
            required_f64(body, "/plant_category/confidence", "plant_category.confidence")?;
        let health = required_str(body, "/plant_health/class", "plant_health.class")?;
        let health_conf =
            required_f64(body, "/plant_health/confidence", "plant_health.confidence")?;

        let plant = match input.plant_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} ({})", name, category),
            _ => category.to_string(),
        };
        let healthy = health.eq_ignore_ascii_case("healthy");

        Ok(IdentifyResult {
            plant,
            category: category.to_string(),
            category_confidence: confidence_percent(category_conf),
            health: health.to_string(),
            health_confidence: confidence_percent(health_conf),
            confidence: confidence_percent(category_conf.max(health_conf)),
            healthy,
            recommendation: if healthy {
                HEALTHY_ADVICE
            } else {
                UNHEALTHY_ADVICE
            }
            .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::testing::StubTransport;
    use crate::feature::upload::MISSING_IMAGE_MESSAGE;
    use crate::feature::FeatureAdapter;
    use serde_json::json;
    use std::sync::Arc;

    fn photo() -> ImageUpload {
        ImageUpload::new("tulsi.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn reply() -> Value {
        json!({
            "plant_category": {"class": "Tulsi", "confidence": 0.8765},
            "plant_health": {"class": "Healthy", "confidence": 0.845}
        })
    }

    #[test]
    fn maps_named_healthy_plant() {
        let input = IdentifyInput {
            plant_name: Some("  Holy Basil ".into()),
            image: Some(photo()),
        };

        let out = IdentifyHealth::map_response(&input, &reply()).unwrap();

        assert_eq!(out.plant, "Holy Basil (Tulsi)");
        assert_eq!(out.category_confidence, 88);
        assert_eq!(out.health_confidence, 85);
        assert_eq!(out.confidence, 88);
        assert!(out.healthy);
        assert_eq!(out.recommendation, HEALTHY_ADVICE);
    }

    #[test]
    fn unnamed_unhealthy_plant() {
        let body = json!({
            "plant_category": {"class": "Neem", "confidence": 0.4},
            "plant_health": {"class": "Leaf Spot", "confidence": 0.91}
        });

        let out = IdentifyHealth::map_response(&IdentifyInput::default(), &body).unwrap();

        assert_eq!(out.plant, "Neem");
        assert_eq!(out.confidence, 91);
        assert!(!out.healthy);
        assert_eq!(out.recommendation, UNHEALTHY_ADVICE);
    }

    #[test]
    fn names_missing_nested_field() {
        let body = json!({
            "plant_category": {"class": "Neem", "confidence": 0.4},
            "plant_health": {"class": "Healthy"}
        });

        assert_eq!(
            IdentifyHealth::map_response(&IdentifyInput::default(), &body).unwrap_err(),
            FeatureError::missing("plant_health.confidence")
        );
    }

    #[tokio::test]
    async fn no_image_means_no_request() {
        let transport = Arc::new(StubTransport::ok(reply()));
        let adapter = FeatureAdapter::<IdentifyHealth>::new(transport.clone());

        let err = adapter.submit(&IdentifyInput::default()).await.unwrap_err();

        assert_eq!(err.to_string(), MISSING_IMAGE_MESSAGE);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn oversized_image_means_no_request() {
        let transport = Arc::new(StubTransport::ok(reply()));
        let adapter = FeatureAdapter::<IdentifyHealth>::new(transport.clone());
        let input = IdentifyInput {
            plant_name: None,
            image: Some(ImageUpload::new(
                "huge.png",
                "image/png",
                vec![0; 10 * 1024 * 1024 + 1],
            )),
        };

        assert!(adapter.submit(&input).await.is_err());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn sends_image_as_file_part() {
        let transport = Arc::new(StubTransport::ok(reply()));
        let adapter = FeatureAdapter::<IdentifyHealth>::new(transport.clone());
        let input = IdentifyInput {
            plant_name: None,
            image: Some(photo()),
        };

        adapter.submit(&input).await.unwrap();

        assert_eq!(transport.last_path().as_deref(), Some("/plant/analyze"));
        assert_eq!(
            transport.last_payload(),
            Some(Payload::Multipart {
                field: "file",
                upload: photo()
            })
        );
    }
}
