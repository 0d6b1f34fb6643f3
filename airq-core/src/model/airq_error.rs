use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AirqError {
    #[error("unrecognized WHO region '{label}', expected one of: {expected}")]
    InvalidRegionError { label: String, expected: String },
    #[error("{field} value {value} is outside of the allowed range [{min}, {max}]")]
    OutOfRangeError {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("prediction model unavailable: {0}")]
    ModelUnavailableError(String),
}

impl AirqError {
    /// stable identifier for this kind of failure, used when reporting
    /// errors next to the control that triggered them.
    pub fn code(&self) -> &'static str {
        match self {
            AirqError::InvalidRegionError { .. } => "invalid_region",
            AirqError::OutOfRangeError { .. } => "out_of_range",
            AirqError::ModelUnavailableError(_) => "model_unavailable",
        }
    }
}
