use super::PredictionService;
use crate::model::{AirqError, CategoricalEncoder, FeatureVector, MeasurementInput, PredictionResult};

/// runs one prediction request end to end: encode and validate the
/// measurement, scale it, predict PM2.5, then classify and compute the
/// pollution index.
///
/// # Arguments
/// * `input`   - user measurement
/// * `encoder` - categorical encoder for the free-text location fields
/// * `service` - the scaler/model capability
///
/// # Result
/// the prediction, or the first error raised by any stage
pub fn predict_measurement(
    input: &MeasurementInput,
    encoder: &CategoricalEncoder,
    service: &dyn PredictionService,
) -> Result<PredictionResult, AirqError> {
    let features = FeatureVector::build(input, encoder)?;
    log::debug!("encoded features: {:?}", features.to_row());
    let normalized = service.scale(&features)?;
    log::debug!("normalized features: {:?}", normalized.0);
    let predicted_pm25 = service.predict(&normalized)?;
    if !predicted_pm25.is_finite() {
        return Err(AirqError::ModelUnavailableError(format!(
            "model produced a non-finite prediction ({predicted_pm25})"
        )));
    }
    Ok(PredictionResult::new(predicted_pm25, input))
}
