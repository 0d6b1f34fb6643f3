use crate::dataset::{BoxSummary, HistogramBin};
use serde::Serialize;

/// named colors used by the dashboard charts
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartColor {
    Blue,
    Purple,
    Red,
    Green,
    Orange,
    DarkRed,
    /// default series color of the dataset charts
    SeriesBlue,
}

impl ChartColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ChartColor::Blue => (0, 0, 255),
            ChartColor::Purple => (128, 0, 128),
            ChartColor::Red => (255, 0, 0),
            ChartColor::Green => (0, 128, 0),
            ChartColor::Orange => (255, 165, 0),
            ChartColor::DarkRed => (139, 0, 0),
            ChartColor::SeriesBlue => (31, 119, 180),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: ChartColor,
}

/// everything needed to draw one chart
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ChartSpec {
    Bar {
        title: String,
        bars: Vec<Bar>,
    },
    /// counts per bin with a density curve in count units
    Histogram {
        title: String,
        column: String,
        bins: Vec<HistogramBin>,
        density: Vec<(f64, f64)>,
    },
    BoxPlot {
        title: String,
        column: String,
        summary: BoxSummary,
    },
    /// square correlation matrix, `None` where a correlation is undefined
    Heatmap {
        title: String,
        labels: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar { title, .. } => title,
            ChartSpec::Histogram { title, .. } => title,
            ChartSpec::BoxPlot { title, .. } => title,
            ChartSpec::Heatmap { title, .. } => title,
        }
    }

    /// file-system friendly name derived from the title
    pub fn file_stem(&self) -> String {
        let mut stem = String::new();
        for c in self.title().chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.ends_with('_') && !stem.is_empty() {
                stem.push('_');
            }
        }
        stem.trim_end_matches('_').to_string()
    }
}
