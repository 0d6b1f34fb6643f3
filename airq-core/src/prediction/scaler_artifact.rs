use super::NormalizedVector;
use crate::model::{AirqError, FeatureVector, FEATURE_COLUMNS, N_FEATURES};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// a fitted normalization transform exported from the training pipeline.
///
/// # Example
///
/// ```json
/// {
///   "type": "standard",
///   "feature_names": ["PM10 (μg/m3)", "NO2 (μg/m3)", "Measurement Year",
///                     "WHO Region", "WHO Country Name", "City or Locality"],
///   "mean": [61.2, 24.9, 2016.4, 2.7, 4981.0, 5003.2],
///   "scale": [48.1, 15.3, 3.2, 1.6, 2890.5, 2887.9]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ScalerArtifact {
    /// standardization: `(x - mean) / scale`. a zero scale leaves the
    /// centered value unscaled, matching how constant features are fitted.
    Standard {
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// min-max scaling: `x * scale + min`
    MinMax {
        feature_names: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl ScalerArtifact {
    pub fn feature_names(&self) -> &[String] {
        match self {
            ScalerArtifact::Standard { feature_names, .. } => feature_names,
            ScalerArtifact::MinMax { feature_names, .. } => feature_names,
        }
    }

    /// confirms the scaler was fitted on the same columns, in the same order,
    /// as [`FEATURE_COLUMNS`], and that its parameters are usable.
    pub fn validate(&self) -> Result<(), AirqError> {
        let names = self.feature_names();
        if names.len() != N_FEATURES || names.iter().zip(FEATURE_COLUMNS).any(|(a, b)| a != b) {
            return Err(AirqError::ModelUnavailableError(format!(
                "scaler schema mismatch: fitted on [{}], expected [{}]",
                names.iter().join(", "),
                FEATURE_COLUMNS.iter().join(", ")
            )));
        }
        let (offsets, scales) = match self {
            ScalerArtifact::Standard { mean, scale, .. } => (("mean", mean), scale),
            ScalerArtifact::MinMax { min, scale, .. } => (("min", min), scale),
        };
        for (param, values) in [offsets, ("scale", scales)] {
            if values.len() != N_FEATURES {
                return Err(AirqError::ModelUnavailableError(format!(
                    "scaler '{param}' has {} values, expected {N_FEATURES}",
                    values.len()
                )));
            }
            if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
                return Err(AirqError::ModelUnavailableError(format!(
                    "scaler '{param}' value for '{}' is not finite",
                    FEATURE_COLUMNS[idx]
                )));
            }
        }
        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> NormalizedVector {
        let row = features.to_row();
        let mut out = [0.0; N_FEATURES];
        match self {
            ScalerArtifact::Standard { mean, scale, .. } => {
                for j in 0..N_FEATURES {
                    let centered = row[j] - mean[j];
                    out[j] = if scale[j] == 0.0 {
                        centered
                    } else {
                        centered / scale[j]
                    };
                }
            }
            ScalerArtifact::MinMax { min, scale, .. } => {
                for j in 0..N_FEATURES {
                    out[j] = row[j] * scale[j] + min[j];
                }
            }
        }
        NormalizedVector(out)
    }
}
