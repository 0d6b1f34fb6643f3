use crate::model::AirqError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// reads a serialized artifact, decoding by file extension (.json or .toml).
/// any failure is reported as [`AirqError::ModelUnavailableError`].
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, AirqError> {
    let f = path.display();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension {
        "json" | "toml" => {
            let s = std::fs::read_to_string(path).map_err(|e| {
                AirqError::ModelUnavailableError(format!("failure reading {f}: {e}"))
            })?;
            if extension == "json" {
                serde_json::from_str(&s).map_err(|e| {
                    AirqError::ModelUnavailableError(format!("failure decoding {f}: {e}"))
                })
            } else {
                toml::from_str(&s).map_err(|e| {
                    AirqError::ModelUnavailableError(format!("failure decoding {f}: {e}"))
                })
            }
        }
        _ => Err(AirqError::ModelUnavailableError(format!(
            "unsupported artifact file type: {f}"
        ))),
    }
}
