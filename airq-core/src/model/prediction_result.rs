use super::{pollution_index, AirQualityCategory, MeasurementInput};
use serde::{Deserialize, Serialize};

/// outcome of one prediction request. derived from the model output and the
/// user's readings, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_pm25: f64,
    pub category: AirQualityCategory,
    pub color: String,
    pub pollution_index: f64,
}

impl PredictionResult {
    pub fn new(predicted_pm25: f64, input: &MeasurementInput) -> Self {
        let category = AirQualityCategory::classify(predicted_pm25);
        Self {
            predicted_pm25,
            category,
            color: category.color().to_string(),
            pollution_index: pollution_index(predicted_pm25, input.pm10(), input.no2()),
        }
    }
}
