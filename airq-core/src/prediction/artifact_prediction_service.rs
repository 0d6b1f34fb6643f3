use super::{artifact_ops, ModelArtifact, NormalizedVector, PredictionService, ScalerArtifact};
use crate::model::{AirqError, FeatureVector};
use std::path::Path;

/// [`PredictionService`] backed by a scaler artifact and a model artifact,
/// both validated against the feature schema when constructed.
#[derive(Debug, Clone)]
pub struct ArtifactPredictionService {
    scaler: ScalerArtifact,
    model: ModelArtifact,
}

impl ArtifactPredictionService {
    pub fn new(scaler: ScalerArtifact, model: ModelArtifact) -> Result<Self, AirqError> {
        scaler.validate()?;
        model.validate()?;
        Ok(Self { scaler, model })
    }

    /// loads and validates both artifacts.
    ///
    /// # Arguments
    /// * `scaler_file` - .json or .toml serialized [`ScalerArtifact`]
    /// * `model_file`  - .json or .toml serialized [`ModelArtifact`]
    ///
    /// # Result
    /// the service, or [`AirqError::ModelUnavailableError`] if either artifact
    /// is missing, corrupt, or fitted on a different schema
    pub fn from_files(scaler_file: &Path, model_file: &Path) -> Result<Self, AirqError> {
        log::info!("reading scaler artifact from {}", scaler_file.display());
        let scaler: ScalerArtifact = artifact_ops::read_artifact(scaler_file)?;
        log::info!("reading model artifact from {}", model_file.display());
        let model: ModelArtifact = artifact_ops::read_artifact(model_file)?;
        Self::new(scaler, model)
    }
}

impl PredictionService for ArtifactPredictionService {
    fn scale(&self, features: &FeatureVector) -> Result<NormalizedVector, AirqError> {
        Ok(self.scaler.transform(features))
    }

    fn predict(&self, normalized: &NormalizedVector) -> Result<f64, AirqError> {
        Ok(self.model.predict(normalized))
    }
}
