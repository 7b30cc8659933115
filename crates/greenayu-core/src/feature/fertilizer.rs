//! Fertilizer Mix: recommendation from climate and soil readings.

use super::options::{CropType, SoilType};
use super::{
    ensure_finite, ensure_non_negative, ensure_range, label_or, required_str, Feature,
    FeatureKind, Payload,
};
use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_PLANT: &str = "Medicinal Plant";
const NOTE: &str = "This recommendation is based on temperature, humidity, moisture and soil nutrients. Verify with local agronomist before large-scale usage.";

/// Form state. Serializes to the backend's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerInput {
    /// Optional plant label, never sent.
    #[serde(skip)]
    pub plant: Option<String>,
    /// Air temperature, °C. The backend spells it `Temparature`.
    #[serde(rename = "Temparature")]
    pub temperature: f64,
    /// Relative humidity, %.
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    /// Soil moisture, %.
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    /// Nitrogen level.
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    /// Phosphorous level.
    #[serde(rename = "Phosphorous")]
    pub phosphorous: f64,
    /// Potassium level.
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    /// Soil class.
    #[serde(rename = "Soil_Type")]
    pub soil_type: SoilType,
    /// Crop class.
    #[serde(rename = "Crop_Type")]
    pub crop_type: CropType,
}

impl Default for FertilizerInput {
    fn default() -> Self {
        Self {
            plant: None,
            temperature: 35.0,
            humidity: 58.0,
            moisture: 35.0,
            nitrogen: 4.0,
            phosphorous: 16.0,
            potassium: 14.0,
            soil_type: SoilType::default(),
            crop_type: CropType::default(),
        }
    }
}

/// Mapped recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerResult {
    /// Plant label, `Medicinal Plant` when none was given.
    pub plant: String,
    /// Fertilizer name returned by the model.
    pub recommended_fertilizer: String,
    /// The submitted readings.
    pub inputs: FertilizerInput,
    /// Advisory note.
    pub note: String,
}

impl FertilizerResult {
    /// `"Black soil • Iramusu"`
    pub fn soil_and_crop(&self) -> String {
        format!("{} soil • {}", self.inputs.soil_type, self.inputs.crop_type)
    }

    /// `"N:4, P:16, K:14"`
    pub fn npk(&self) -> String {
        format!(
            "N:{}, P:{}, K:{}",
            self.inputs.nitrogen, self.inputs.phosphorous, self.inputs.potassium
        )
    }
}

/// `POST /fertilizer`, JSON.
pub struct Fertilizer;

impl Feature for Fertilizer {
    const KIND: FeatureKind = FeatureKind::Fertilizer;
    type Input = FertilizerInput;
    type Output = FertilizerResult;

    fn validate(input: &FertilizerInput) -> Result<(), FeatureError> {
        ensure_finite("Temperature", input.temperature)?;
        ensure_range("Humidity", input.humidity, 0.0, 100.0)?;
        ensure_range("Moisture", input.moisture, 0.0, 100.0)?;
        ensure_non_negative("Nitrogen", input.nitrogen)?;
        ensure_non_negative("Phosphorous", input.phosphorous)?;
        ensure_non_negative("Potassium", input.potassium)
    }

    fn payload(input: &FertilizerInput) -> Result<Payload, FeatureError> {
        Payload::json(input)
    }

    fn map_response(input: &FertilizerInput, body: &Value) -> Result<FertilizerResult, FeatureError> {
        let recommended = required_str(body, "/recommended_fertilizer", "recommended_fertilizer")?;

        Ok(FertilizerResult {
            plant: label_or(input.plant.as_deref(), DEFAULT_PLANT),
            recommended_fertilizer: recommended.to_string(),
            inputs: input.clone(),
            note: NOTE.to_string(),
        })
    }
}
