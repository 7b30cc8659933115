//! Quality Grade: plant-part detection from one photo.
//!
//! Only detection is live. Grading fields (quality, defects, purity) are
//! reported as unavailable until the backend grows a grading model.

use super::options::PlantPart;
use super::upload::{require_image, ImageUpload};
use super::{
    confidence_percent, required_f64, required_str, Feature, FeatureKind, Payload, UPLOAD_FIELD,
};
use crate::error::FeatureError;
use serde::Serialize;
use serde_json::Value;

/// Display text for grading fields that are not produced yet.
pub const GRADING_PENDING: &str = "Coming Soon";

const NOTE: &str =
    "Plant part detection is enabled. Quality grading will be added in the next release.";

/// Form state.
#[derive(Debug, Clone, Default)]
pub struct PartsInput {
    /// Part the user says the specimen is.
    pub part: PlantPart,
    /// The specimen photo.
    pub image: Option<ImageUpload>,
}

/// Mapped detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartsResult {
    /// Capitalised selected part.
    pub selected_part: String,
    /// Part reported by the detector.
    pub detected_part: String,
    /// Detection confidence, percent.
    pub confidence: u32,
    /// Quality grade, `None` until grading ships.
    pub quality: Option<String>,
    /// Defect summary, `None` until grading ships.
    pub defects: Option<String>,
    /// Purity estimate, `None` until grading ships.
    pub purity: Option<String>,
    /// Release note.
    pub note: String,
}

impl PartsResult {
    /// Whether the detector agrees with the user's selection.
    pub fn matches_selection(&self) -> bool {
        self.selected_part.eq_ignore_ascii_case(&self.detected_part)
    }
}

/// `POST /plant-part`, multipart.
pub struct PartsQuality;

impl Feature for PartsQuality {
    const KIND: FeatureKind = FeatureKind::PartsQuality;
    type Input = PartsInput;
    type Output = PartsResult;

    fn validate(input: &PartsInput) -> Result<(), FeatureError> {
        require_image(input.image.as_ref()).map(|_| ())
    }

    fn payload(input: &PartsInput) -> Result<Payload, FeatureError> {
        let upload = require_image(input.image.as_ref())?;
        Ok(Payload::Multipart {
            field: UPLOAD_FIELD,
            upload: upload.clone(),
        })
    }

    fn map_response(input: &PartsInput, body: &Value) -> Result<PartsResult, FeatureError> {
        let detected = required_str(body, "/plant_part", "plant_part")?;
        let confidence = required_f64(body, "/confidence", "confidence")?;

        Ok(PartsResult {
            selected_part: input.part.label().to_string(),
            detected_part: detected.to_string(),
            confidence: confidence_percent(confidence),
            quality: None,
            defects: None,
            purity: None,
            note: NOTE.to_string(),
        })
    }
}
