use super::{DashboardError, PredictionForm, PredictionReport, UploadReport};
use crate::chart::{input_charts, ChartRenderer, ChartSpec};
use crate::config::{DashboardConfig, FormDefaults};
use crate::dataset::{read_dataset, summarize};
use airq_core::model::{CategoricalEncoder, LocationField, LocationLookup};
use airq_core::prediction::{predict_measurement, ArtifactPredictionService, PredictionService};
use std::path::{Path, PathBuf};

/// everything loaded once at startup and shared, read-only, by every
/// interaction: the prediction capability, the categorical encoder and the
/// output settings.
pub struct DashboardContext {
    service: Box<dyn PredictionService>,
    encoder: CategoricalEncoder,
    form_defaults: FormDefaults,
    renderer: ChartRenderer,
    preview_rows: usize,
}

impl DashboardContext {
    pub fn new(
        service: Box<dyn PredictionService>,
        encoder: CategoricalEncoder,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            service,
            encoder,
            form_defaults: config.form.clone(),
            renderer: ChartRenderer::new(config.output.chart_directory.clone()),
            preview_rows: config.output.preview_rows,
        }
    }

    /// runs one prediction request and draws the input charts.
    ///
    /// # Arguments
    ///
    /// * `form` - the submitted prediction form
    ///
    /// # Result
    ///
    /// the prediction report, or the error to show next to the form
    pub fn predict(&self, form: &PredictionForm) -> Result<PredictionReport, DashboardError> {
        let input = form.to_input(&self.form_defaults)?;
        let result = predict_measurement(&input, &self.encoder, self.service.as_ref())?;
        log::info!(
            "predicted PM2.5 {:.2} ({}) for {}, {}",
            result.predicted_pm25,
            result.category,
            input.city(),
            input.country()
        );
        let charts = input_charts(input.pm10(), input.no2(), Some(result.predicted_pm25));
        let chart_files = self.render_charts(&charts);
        Ok(PredictionReport {
            input,
            result,
            charts,
            chart_files,
        })
    }

    /// input charts for a form whose prediction did not succeed. the
    /// predicted bar is drawn as 0.
    pub fn unpredicted_input_charts(&self, form: &PredictionForm) -> Vec<ChartSpec> {
        let pm10 = form.pm10.unwrap_or(self.form_defaults.pm10);
        let no2 = form.no2.unwrap_or(self.form_defaults.no2);
        input_charts(pm10, no2, None)
    }

    /// reads and summarizes an uploaded dataset, drawing its charts
    pub fn analyze(&self, path: &Path) -> Result<UploadReport, DashboardError> {
        let dataset = read_dataset(path)?;
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let summary = summarize(&filename, &dataset, self.preview_rows);
        let chart_files = self.render_charts(&summary.charts);
        Ok(UploadReport {
            summary,
            chart_files,
        })
    }

    /// draws charts when an output directory is configured. a chart that
    /// fails to draw is logged and skipped.
    pub fn render_charts(&self, charts: &[ChartSpec]) -> Vec<PathBuf> {
        charts
            .iter()
            .filter_map(|chart| match self.renderer.render(chart) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            })
            .collect()
    }
}

impl TryFrom<&DashboardConfig> for DashboardContext {
    type Error = DashboardError;

    /// loads the scaler and model artifacts and any lookup tables. fails
    /// with a model-unavailable error when an artifact is missing or does
    /// not match the expected feature schema.
    fn try_from(config: &DashboardConfig) -> Result<Self, Self::Error> {
        let service = ArtifactPredictionService::from_files(
            &config.artifacts.scaler_file,
            &config.artifacts.model_file,
        )?;
        let mut encoder = CategoricalEncoder::hashed();
        let tables = [
            (LocationField::Country, &config.encoding.country_table),
            (LocationField::City, &config.encoding.city_table),
        ];
        for (field, table) in tables {
            if let Some(path) = table {
                let lookup = LocationLookup::try_from(path.as_path())?;
                log::info!(
                    "loaded {} {field} codes from {}",
                    lookup.len(),
                    path.display()
                );
                encoder = encoder.with_lookup(field, lookup);
            }
        }
        Ok(DashboardContext::new(Box::new(service), encoder, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airq_core::model::{AirQualityCategory, AirqError, FeatureVector};
    use airq_core::prediction::NormalizedVector;

    struct FixedService(f64);

    impl PredictionService for FixedService {
        fn scale(&self, features: &FeatureVector) -> Result<NormalizedVector, AirqError> {
            Ok(NormalizedVector(features.to_row()))
        }

        fn predict(&self, _normalized: &NormalizedVector) -> Result<f64, AirqError> {
            if self.0.is_finite() {
                Ok(self.0)
            } else {
                Err(AirqError::ModelUnavailableError(String::from("model file corrupt")))
            }
        }
    }

    fn context(prediction: f64, config: &DashboardConfig) -> DashboardContext {
        DashboardContext::new(
            Box::new(FixedService(prediction)),
            CategoricalEncoder::hashed(),
            config,
        )
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("airq-{}-{name}", std::process::id()))
    }

    fn paris_form() -> PredictionForm {
        PredictionForm {
            region: Some(String::from("European Region")),
            country: Some(String::from("France")),
            city: Some(String::from("Paris")),
            pm10: Some(40.0),
            no2: Some(25.0),
            year: Some(2023),
        }
    }

    #[test]
    fn test_predict_end_to_end() {
        let ctx = context(30.0, &DashboardConfig::default());
        let report = ctx.predict(&paris_form()).unwrap();
        assert_eq!(report.result.category, AirQualityCategory::Moderate);
        assert_eq!(report.result.color, "orange");
        assert!((report.result.pollution_index - 95.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.charts.len(), 2);
        assert!(report.chart_files.is_empty());
        let text = report.to_string();
        assert!(text.contains("Predicted PM2.5 (μg/m³): 30.00"));
        assert!(text.contains("Pollution Index: 31.67"));
        assert!(text.contains("Air Quality Category: Moderate 🙂 (orange)"));
    }

    #[test]
    fn test_failures_do_not_end_the_session() {
        let ctx = context(12.0, &DashboardConfig::default());
        let mut form = paris_form();
        form.pm10 = Some(900.0);
        let err = ctx.predict(&form).unwrap_err();
        assert_eq!(err.code(), "out_of_range");
        match &ctx.unpredicted_input_charts(&form)[1] {
            ChartSpec::Bar { bars, .. } => assert_eq!(bars[0].value, 0.0),
            other => panic!("expected bar chart, found {other:?}"),
        }
        let err = ctx.analyze(Path::new("readings.parquet")).unwrap_err();
        assert_eq!(err.code(), "upload_parse_error");
        let report = ctx.predict(&paris_form()).unwrap();
        assert_eq!(report.result.category, AirQualityCategory::Good);
    }

    #[test]
    fn test_unavailable_model_is_reported() {
        let ctx = context(f64::NAN, &DashboardConfig::default());
        let err = ctx.predict(&paris_form()).unwrap_err();
        assert_eq!(err.code(), "model_unavailable");
    }

    #[test]
    fn test_analyze_without_recognized_columns() {
        let path = temp_path("stations.csv");
        std::fs::write(&path, "station,temp\nA,20.5\nB,\n").unwrap();
        let ctx = context(30.0, &DashboardConfig::default());
        let report = ctx.analyze(&path).unwrap();
        assert_eq!(report.summary.preview.len(), 2);
        assert_eq!(report.summary.missing[1], (String::from("temp"), 1));
        assert!(report.summary.charts.is_empty());
        assert!(report.chart_files.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_analyze_with_extreme_outlier() {
        let path = temp_path("outlier.csv");
        let mut src = String::from("PM2.5 (μg/m3)\n");
        for i in 0..100 {
            src.push_str(&format!("{}\n", i as f64 * 0.01));
        }
        src.push_str("1e18\n");
        std::fs::write(&path, src).unwrap();
        let ctx = context(30.0, &DashboardConfig::default());
        let report = ctx.analyze(&path).unwrap();
        assert_eq!(report.summary.n_rows, 101);
        match &report.summary.charts[..] {
            [ChartSpec::Histogram { bins, .. }] => {
                assert!(bins.len() <= crate::dataset::MAX_HISTOGRAM_BINS);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
            }
            other => panic!("expected a single histogram, found {other:?}"),
        }
        let report = ctx.predict(&paris_form()).unwrap();
        assert_eq!(report.result.category, AirQualityCategory::Moderate);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_charts_are_written_to_the_output_directory() {
        let directory = temp_path("charts");
        let mut config = DashboardConfig::default();
        config.output.chart_directory = Some(directory.clone());
        let ctx = context(30.0, &config);
        let report = ctx.predict(&paris_form()).unwrap();
        assert_eq!(
            report.chart_files,
            vec![
                directory.join("pm10_vs_no2.svg"),
                directory.join("pollution_index_components.svg")
            ]
        );
        assert!(report.chart_files.iter().all(|f| f.exists()));
        let _ = std::fs::remove_dir_all(directory);
    }

    #[test]
    fn test_missing_artifacts_fail_fast() {
        let mut config = DashboardConfig::default();
        config.artifacts.scaler_file = temp_path("missing-scaler.json");
        config.artifacts.model_file = temp_path("missing-model.json");
        match DashboardContext::try_from(&config) {
            Err(e) => assert_eq!(e.code(), "model_unavailable"),
            Ok(_) => panic!("expected missing artifacts to fail"),
        }
    }
}
