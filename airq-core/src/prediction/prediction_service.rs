use crate::model::{AirqError, FeatureVector, N_FEATURES};
use serde::{Deserialize, Serialize};

/// feature values after normalization by the fitted scaler, in the same
/// positional order as [`FeatureVector::to_row`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NormalizedVector(pub [f64; N_FEATURES]);

/// the two-stage inference capability backed by externally-trained
/// artifacts. implementations are built once at startup and only read
/// afterward.
pub trait PredictionService {
    /// normalizes a feature vector into the model's training distribution
    fn scale(&self, features: &FeatureVector) -> Result<NormalizedVector, AirqError>;

    /// runs model inference on one normalized row, returning predicted PM2.5
    fn predict(&self, normalized: &NormalizedVector) -> Result<f64, AirqError>;
}
