//! Stability Analysis: shelf-life prediction plus a locally derived spoilage risk.

use super::options::{PlantPart, StorageType};
use super::{
    ensure_finite, ensure_non_negative, ensure_range, label_or, required_f64, Feature,
    FeatureKind, Payload,
};
use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const DEFAULT_PLANT: &str = "Sample plant";

/// Form state. Field names are the backend's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfLifeInput {
    /// Optional specimen label, never sent.
    #[serde(skip)]
    pub plant: Option<String>,
    /// Which part of the plant is stored.
    pub plant_type: PlantPart,
    /// Storage condition.
    pub storage_type: StorageType,
    /// Storage temperature, °C.
    pub temperature_c: f64,
    /// Relative humidity, %.
    pub humidity_percent: f64,
    /// Respiration rate of the material.
    pub respiration_rate: f64,
    /// Ethylene sensitivity, 0..1.
    pub ethylene_sensitivity: f64,
    /// Water content, %.
    pub water_content: f64,
    /// Physical damage, 0..1.
    pub damage_level: f64,
    /// Microbial contamination risk, 0..1.
    pub microbial_risk: f64,
}

impl Default for ShelfLifeInput {
    fn default() -> Self {
        Self {
            plant: None,
            plant_type: PlantPart::Leaf,
            storage_type: StorageType::Refrigerated,
            temperature_c: 4.0,
            humidity_percent: 90.0,
            respiration_rate: 18.0,
            ethylene_sensitivity: 0.85,
            water_content: 92.0,
            damage_level: 0.1,
            microbial_risk: 0.2,
        }
    }
}

impl ShelfLifeInput {
    /// Switches storage type and loads its temperature/humidity preset.
    pub fn apply_storage_preset(&mut self, storage: StorageType) {
        let (temperature, humidity) = storage.preset();
        self.storage_type = storage;
        self.temperature_c = temperature;
        self.humidity_percent = humidity;
    }

    /// `0.45·microbial + 0.35·damage + 0.2·min(1, respiration/30)`
    pub fn risk_score(&self) -> f64 {
        0.45 * self.microbial_risk
            + 0.35 * self.damage_level
            + 0.2 * (self.respiration_rate / 30.0).min(1.0)
    }
}

/// Spoilage risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    /// Score below 0.35.
    Low,
    /// Score from 0.35 up to 0.65.
    Moderate,
    /// Score of 0.65 or more.
    High,
}

impl RiskLevel {
    /// Buckets a risk score.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.65 {
            RiskLevel::High
        } else if score >= 0.35 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Display text.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended temperature band for a storage type.
pub fn thermal_range(storage: StorageType) -> &'static str {
    match storage {
        StorageType::Refrigerated => "0°C - 8°C",
        StorageType::Ambient => "18°C - 28°C",
        StorageType::Exposed => "> 30°C",
    }
}

/// Preservation advice for a storage type.
pub fn handling_note(storage: StorageType) -> &'static str {
    match storage {
        StorageType::Refrigerated => {
            "Keep sealed + clean container. Avoid bruising. Maintain high humidity to reduce dehydration."
        }
        StorageType::Ambient => {
            "Keep away from sunlight and moisture. Use breathable packing and monitor mold risk."
        }
        StorageType::Exposed => {
            "Reduce exposure to heat immediately. High temperature accelerates spoilage and potency loss."
        }
    }
}

/// Mapped prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfLifeResult {
    /// Specimen label.
    pub plant: String,
    /// Stored plant part.
    pub plant_type: PlantPart,
    /// Storage condition.
    pub storage_type: StorageType,
    /// Raw model output.
    pub shelf_life_days: f64,
    /// `"<days:.1> days"`
    pub shelf_life_text: String,
    /// Weighted risk score the level was bucketed from.
    pub risk_score: f64,
    /// Spoilage risk.
    pub risk_level: RiskLevel,
    /// Recommended temperature band.
    pub temp_range: String,
    /// Preservation advice.
    pub note: String,
}

/// `POST /shelf-life`, JSON.
pub struct ShelfLife;

impl Feature for ShelfLife {
    const KIND: FeatureKind = FeatureKind::ShelfLife;
    type Input = ShelfLifeInput;
    type Output = ShelfLifeResult;

    fn validate(input: &ShelfLifeInput) -> Result<(), FeatureError> {
        ensure_finite("Temperature", input.temperature_c)?;
        ensure_range("Humidity", input.humidity_percent, 0.0, 100.0)?;
        ensure_non_negative("Respiration Rate", input.respiration_rate)?;
        ensure_range("Ethylene Sensitivity", input.ethylene_sensitivity, 0.0, 1.0)?;
        ensure_range("Water Content", input.water_content, 0.0, 100.0)?;
        ensure_range("Damage Level", input.damage_level, 0.0, 1.0)?;
        ensure_range("Microbial Risk", input.microbial_risk, 0.0, 1.0)
    }

    fn payload(input: &ShelfLifeInput) -> Result<Payload, FeatureError> {
        Payload::json(input)
    }

    fn map_response(input: &ShelfLifeInput, body: &Value) -> Result<ShelfLifeResult, FeatureError> {
        let days = required_f64(body, "/shelf_life_days", "shelf_life_days")?;
        let score = input.risk_score();

        Ok(ShelfLifeResult {
            plant: label_or(input.plant.as_deref(), DEFAULT_PLANT),
            plant_type: input.plant_type,
            storage_type: input.storage_type,
            shelf_life_days: days,
            shelf_life_text: format!("{:.1} days", days),
            risk_score: score,
            risk_level: RiskLevel::from_score(score),
            temp_range: thermal_range(input.storage_type).to_string(),
            note: handling_note(input.storage_type).to_string(),
        })
    }
}
