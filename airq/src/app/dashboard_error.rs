use airq_core::model::AirqError;

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Prediction(#[from] AirqError),
    #[error("failed reading upload '{filepath}': {message}")]
    UploadParseError { filepath: String, message: String },
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failed rendering chart '{0}': {1}")]
    ChartRenderError(String, String),
    #[error("invalid input: {0}")]
    InputError(String),
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl DashboardError {
    /// stable identifier for the kind of failure, shown next to the message
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::Prediction(e) => e.code(),
            DashboardError::UploadParseError { .. } => "upload_parse_error",
            DashboardError::ConfigReadError { .. } => "config_read_error",
            DashboardError::ChartRenderError(..) => "chart_render_error",
            DashboardError::InputError(_) => "input_error",
            DashboardError::StdIoError { .. } => "io_error",
            DashboardError::SerdeJsonError { .. } => "json_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_errors_keep_their_code() {
        let err = DashboardError::from(AirqError::ModelUnavailableError(String::from(
            "missing scaler.json",
        )));
        assert_eq!(err.code(), "model_unavailable");
        assert!(err.to_string().contains("missing scaler.json"));
    }
}
