//! Yield Forecast: tons per hectare from field conditions.

use super::options::{Region, SoilType, Weather, YieldCrop};
use super::{
    ensure_finite, ensure_non_negative, label_or, required_f64, Feature, FeatureKind, Payload,
};
use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_PLANT: &str = "Medicinal Crop";
const UNIT: &str = "hectare";

/// Form state. Serializes to the backend's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldInput {
    /// Optional crop label, never sent.
    #[serde(skip)]
    pub plant: Option<String>,
    /// Growing region.
    #[serde(rename = "Region")]
    pub region: Region,
    /// Soil class.
    #[serde(rename = "Soil_Type")]
    pub soil_type: SoilType,
    /// Crop class.
    #[serde(rename = "Crop")]
    pub crop: YieldCrop,
    /// Seasonal rainfall, mm.
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: f64,
    /// Mean temperature, °C.
    #[serde(rename = "Temperature_Celsius")]
    pub temperature_celsius: f64,
    /// Whether fertilizer was applied.
    #[serde(rename = "Fertilizer_Used")]
    pub fertilizer_used: bool,
    /// Whether the field is irrigated.
    #[serde(rename = "Irrigation_Used")]
    pub irrigation_used: bool,
    /// Prevailing weather.
    #[serde(rename = "Weather_Condition")]
    pub weather: Weather,
    /// Days from sowing to harvest.
    #[serde(rename = "Days_to_Harvest")]
    pub days_to_harvest: u32,
}

impl Default for YieldInput {
    fn default() -> Self {
        Self {
            plant: None,
            region: Region::West,
            soil_type: SoilType::Sandy,
            crop: YieldCrop::Cotton,
            rainfall_mm: 897.07,
            temperature_celsius: 27.6,
            fertilizer_used: false,
            irrigation_used: true,
            weather: Weather::Cloudy,
            days_to_harvest: 122,
        }
    }
}

/// Mapped forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldResult {
    /// Crop label.
    pub plant: String,
    /// Raw model output, tons per hectare.
    pub tons_per_hectare: f64,
    /// Two-decimal rendering of `tons_per_hectare`.
    pub yield_text: String,
    /// Area unit the forecast is expressed per.
    pub unit: String,
    /// Summary of the conditions the forecast used.
    pub note: String,
}

/// `POST /yield`, JSON.
pub struct YieldForecast;

impl Feature for YieldForecast {
    const KIND: FeatureKind = FeatureKind::Yield;
    type Input = YieldInput;
    type Output = YieldResult;

    fn validate(input: &YieldInput) -> Result<(), FeatureError> {
        ensure_non_negative("Rainfall", input.rainfall_mm)?;
        ensure_finite("Temperature", input.temperature_celsius)?;
        if input.days_to_harvest == 0 {
            return Err(FeatureError::Validation(
                "Days to Harvest must be greater than 0.".to_string(),
            ));
        }
        Ok(())
    }

    fn payload(input: &YieldInput) -> Result<Payload, FeatureError> {
        Payload::json(input)
    }

    fn map_response(input: &YieldInput, body: &Value) -> Result<YieldResult, FeatureError> {
        let tons = required_f64(body, "/yield_tons_per_hectare", "yield_tons_per_hectare")?;

        Ok(YieldResult {
            plant: label_or(input.plant.as_deref(), DEFAULT_PLANT),
            tons_per_hectare: tons,
            yield_text: format!("{:.2}", tons),
            unit: UNIT.to_string(),
            note: format!(
                "Forecast based on {} region, {} soil, {} weather and {} days to harvest.",
                input.region, input.soil_type, input.weather, input.days_to_harvest
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_matches_backend_contract() {
        let payload = YieldForecast::payload(&YieldInput::default()).unwrap();

        assert_eq!(
            payload,
            Payload::Json(json!({
                "Region": "West",
                "Soil_Type": "Sandy",
                "Crop": "Cotton",
                "Rainfall_mm": 897.07,
                "Temperature_Celsius": 27.6,
                "Fertilizer_Used": false,
                "Irrigation_Used": true,
                "Weather_Condition": "Cloudy",
                "Days_to_Harvest": 122
            }))
        );
    }

    #[test]
    fn formats_two_decimals_and_note() {
        let input = YieldInput {
            plant: Some("Ashwagandha".into()),
            region: Region::Central,
            weather: Weather::Rainy,
            days_to_harvest: 90,
            ..Default::default()
        };

        let out =
            YieldForecast::map_response(&input, &json!({"yield_tons_per_hectare": 4.5678}))
                .unwrap();

        assert_eq!(out.plant, "Ashwagandha");
        assert_eq!(out.yield_text, "4.57");
        assert_eq!(out.unit, "hectare");
        assert_eq!(
            out.note,
            "Forecast based on Central region, Sandy soil, Rainy weather and 90 days to harvest."
        );
    }

    #[test]
    fn string_yield_is_malformed() {
        let err = YieldForecast::map_response(
            &YieldInput::default(),
            &json!({"yield_tons_per_hectare": "4.5"}),
        )
        .unwrap_err();

        assert_eq!(err, FeatureError::missing("yield_tons_per_hectare"));
    }

    #[test]
    fn zero_days_is_rejected() {
        let input = YieldInput {
            days_to_harvest: 0,
            ..Default::default()
        };
        assert!(YieldForecast::validate(&input).is_err());

        let input = YieldInput {
            rainfall_mm: -3.0,
            ..Default::default()
        };
        assert!(YieldForecast::validate(&input).is_err());
    }
}
