use super::{Cell, Dataset};
use crate::chart::{dataset_charts, ChartSpec};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Display;

/// what the dashboard shows for an uploaded dataset
#[derive(Serialize, Debug, Clone)]
pub struct DatasetSummary {
    pub filename: String,
    pub n_rows: usize,
    pub headers: Vec<String>,
    pub preview: Vec<Vec<Cell>>,
    /// missing cell count per column, in column order
    pub missing: Vec<(String, usize)>,
    pub charts: Vec<ChartSpec>,
}

/// summarizes a dataset: the first `preview_rows` rows, missing counts per
/// column, and whichever dataset charts its columns support.
pub fn summarize(filename: &str, dataset: &Dataset, preview_rows: usize) -> DatasetSummary {
    let charts = dataset_charts(dataset);
    log::info!(
        "summarized '{filename}': {} rows, {} columns, {} charts",
        dataset.n_rows(),
        dataset.n_columns(),
        charts.len()
    );
    DatasetSummary {
        filename: filename.to_string(),
        n_rows: dataset.n_rows(),
        headers: dataset.headers().to_vec(),
        preview: dataset.head(preview_rows).to_vec(),
        missing: dataset.missing_counts(),
        charts,
    }
}

/// writes rows as left-aligned columns
fn write_table(
    f: &mut std::fmt::Formatter<'_>,
    headers: &[String],
    rows: &[Vec<String>],
) -> std::fmt::Result {
    let widths = headers
        .iter()
        .enumerate()
        .map(|(j, h)| {
            rows.iter()
                .map(|r| r[j].chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect_vec();
    let pad = |s: &str, w: usize| format!("{s}{}", " ".repeat(w - s.chars().count()));
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(c, *w))
            .join("  ")
    };
    writeln!(f, "{}", line(headers).trim_end())?;
    for row in rows {
        writeln!(f, "{}", line(row).trim_end())?;
    }
    Ok(())
}

impl Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset Preview ({}, {} rows)", self.filename, self.n_rows)?;
        let preview = self
            .preview
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect_vec())
            .collect_vec();
        write_table(f, &self.headers, &preview)?;
        writeln!(f)?;
        writeln!(f, "Missing Values Summary")?;
        let missing = self
            .missing
            .iter()
            .map(|(name, count)| vec![name.clone(), count.to_string()])
            .collect_vec();
        write_table(f, &[String::from("column"), String::from("missing")], &missing)?;
        if self.charts.is_empty() {
            writeln!(f)?;
            writeln!(f, "no recognized pollutant columns, no charts to show")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_csv;

    #[test]
    fn test_summary_without_recognized_columns() {
        let src = "station,temp,humidity\nA,21.5,40\nB,,NA\nC,19.0,55\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        let summary = summarize("stations.csv", &ds, 5);
        assert_eq!(summary.preview.len(), 3);
        assert_eq!(
            summary.missing,
            vec![
                (String::from("station"), 0),
                (String::from("temp"), 1),
                (String::from("humidity"), 1)
            ]
        );
        assert!(summary.charts.is_empty());
        let text = summary.to_string();
        assert!(text.contains("Dataset Preview"));
        assert!(text.contains("Missing Values Summary"));
        assert!(text.contains("humidity  1"));
    }

    #[test]
    fn test_preview_is_limited() {
        let src = "PM10 (μg/m3)\n1\n2\n3\n4\n5\n6\n7\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        let summary = summarize("pm10.csv", &ds, 5);
        assert_eq!(summary.n_rows, 7);
        assert_eq!(summary.preview.len(), 5);
        assert_eq!(summary.charts.len(), 1);
    }
}
