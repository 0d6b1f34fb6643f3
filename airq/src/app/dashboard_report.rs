use crate::chart::ChartSpec;
use crate::dataset::DatasetSummary;
use airq_core::model::{MeasurementInput, PredictionResult};
use serde::Serialize;
use std::{fmt::Display, path::PathBuf};

/// output of a successful prediction request
#[derive(Serialize, Debug, Clone)]
pub struct PredictionReport {
    pub input: MeasurementInput,
    pub result: PredictionResult,
    pub charts: Vec<ChartSpec>,
    /// chart files written, empty when charts are not drawn
    pub chart_files: Vec<PathBuf>,
}

/// output of a dataset upload
#[derive(Serialize, Debug, Clone)]
pub struct UploadReport {
    pub summary: DatasetSummary,
    pub chart_files: Vec<PathBuf>,
}

fn write_chart_files(f: &mut std::fmt::Formatter<'_>, files: &[PathBuf]) -> std::fmt::Result {
    for file in files {
        writeln!(f, "chart: {}", file.display())?;
    }
    Ok(())
}

impl Display for PredictionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = self.result.category;
        writeln!(f, "Prediction Results")?;
        writeln!(
            f,
            "Predicted PM2.5 (μg/m³): {:.2}",
            self.result.predicted_pm25
        )?;
        writeln!(f, "Pollution Index: {:.2}", self.result.pollution_index)?;
        writeln!(
            f,
            "Air Quality Category: {} {} ({})",
            category.label(),
            category.emoji(),
            self.result.color
        )?;
        writeln!(f, "Prediction Successful!")?;
        write_chart_files(f, &self.chart_files)
    }
}

impl Display for UploadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary)?;
        write_chart_files(f, &self.chart_files)
    }
}
