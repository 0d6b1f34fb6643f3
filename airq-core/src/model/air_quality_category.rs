use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// health categories for a PM2.5 concentration, ordered from cleanest to
/// most polluted air.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
}

/// inclusive upper bound (μg/m³) of each category below [`AirQualityCategory::Unhealthy`],
/// in increasing order. a value equal to a bound belongs to the cleaner category.
const CATEGORY_UPPER_BOUNDS: [(f64, AirQualityCategory); 3] = [
    (12.0, AirQualityCategory::Good),
    (35.0, AirQualityCategory::Moderate),
    (55.0, AirQualityCategory::UnhealthySensitive),
];

impl AirQualityCategory {
    /// classifies a PM2.5 value. total over f64: negative values are Good,
    /// and anything above the last bound (including NaN) is Unhealthy.
    pub fn classify(predicted_pm25: f64) -> AirQualityCategory {
        CATEGORY_UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| predicted_pm25 <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(AirQualityCategory::Unhealthy)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => "Good",
            AirQualityCategory::Moderate => "Moderate",
            AirQualityCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AirQualityCategory::Unhealthy => "Unhealthy",
        }
    }

    /// display color name
    pub fn color(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => "green",
            AirQualityCategory::Moderate => "orange",
            AirQualityCategory::UnhealthySensitive => "red",
            AirQualityCategory::Unhealthy => "darkred",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => "😊",
            AirQualityCategory::Moderate => "🙂",
            AirQualityCategory::UnhealthySensitive => "😐",
            AirQualityCategory::Unhealthy => "😷",
        }
    }
}

impl Display for AirQualityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
