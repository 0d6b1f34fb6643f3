use crate::app::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// settings for one dashboard process. every section is optional in the
/// configuration file and falls back to its defaults.
///
/// # Example
///
/// ```toml
/// [artifacts]
/// model_file = "best_model.json"
/// scaler_file = "scaler.json"
///
/// [encoding]
/// country_table = "country_codes.csv"
///
/// [form]
/// country = "France"
/// city = "Paris"
///
/// [output]
/// chart_directory = "charts"
/// preview_rows = 10
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub artifacts: ArtifactConfig,
    pub encoding: EncodingConfig,
    pub form: FormDefaults,
    pub output: OutputConfig,
}

/// locations of the pre-trained artifacts, relative to the working directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    pub model_file: PathBuf,
    pub scaler_file: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_file: PathBuf::from("best_model.json"),
            scaler_file: PathBuf::from("scaler.json"),
        }
    }
}

/// optional `value,code` tables replacing the hashed country and city codes
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EncodingConfig {
    pub country_table: Option<PathBuf>,
    pub city_table: Option<PathBuf>,
}

/// values used for any prediction field the user leaves out
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    pub country: String,
    pub city: String,
    pub pm10: f64,
    pub no2: f64,
    pub year: i32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            country: String::from("India"),
            city: String::from("Delhi"),
            pm10: 50.0,
            no2: 30.0,
            year: 2022,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// directory for SVG charts. charts are not drawn when unset.
    pub chart_directory: Option<PathBuf>,
    /// number of rows shown in a dataset preview
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart_directory: None,
            preview_rows: 5,
        }
    }
}

impl TryFrom<&Path> for DashboardConfig {
    type Error = DashboardError;

    /// reads a configuration file. the format (TOML, JSON, ...) is taken
    /// from the file extension.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let filepath = path.display().to_string();
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| DashboardError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        config
            .try_deserialize::<DashboardConfig>()
            .map_err(|e| DashboardError::ConfigReadError {
                msg: format!("failed decoding dashboard configuration '{filepath}'"),
                source: e,
            })
    }
}

impl DashboardConfig {
    /// configuration from an optional file, or the defaults when none is given
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        match path {
            Some(p) => {
                log::info!("reading dashboard configuration {}", p.display());
                DashboardConfig::try_from(p)
            }
            None => Ok(DashboardConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("airq-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let conf = DashboardConfig::load(None).unwrap();
        assert_eq!(conf.artifacts.model_file, PathBuf::from("best_model.json"));
        assert_eq!(conf.artifacts.scaler_file, PathBuf::from("scaler.json"));
        assert_eq!(conf.form.country, "India");
        assert_eq!(conf.form.city, "Delhi");
        assert_eq!(conf.form.pm10, 50.0);
        assert_eq!(conf.form.no2, 30.0);
        assert_eq!(conf.form.year, 2022);
        assert_eq!(conf.output.preview_rows, 5);
        assert!(conf.output.chart_directory.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let path = write_temp(
            "partial.toml",
            "[form]\ncountry = \"France\"\ncity = \"Paris\"\n\n[output]\npreview_rows = 3\n",
        );
        let conf = DashboardConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(conf.form.country, "France");
        assert_eq!(conf.form.city, "Paris");
        assert_eq!(conf.form.year, 2022);
        assert_eq!(conf.output.preview_rows, 3);
        assert_eq!(conf.artifacts, ArtifactConfig::default());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let path = std::env::temp_dir().join("airq-no-such-config.toml");
        let err = DashboardConfig::load(Some(path.as_path())).unwrap_err();
        assert_eq!(err.code(), "config_read_error");
    }
}
