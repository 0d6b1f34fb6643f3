use super::ChartSpec;
use crate::dataset::{self, Dataset};

pub const PM25_COLUMN: &str = "PM2.5 (μg/m3)";
pub const PM10_COLUMN: &str = "PM10 (μg/m3)";
pub const NO2_COLUMN: &str = "NO2 (μg/m3)";

/// pollutant columns whose presence enables the dataset charts
pub const RECOGNIZED_COLUMNS: [&str; 3] = [PM25_COLUMN, PM10_COLUMN, NO2_COLUMN];

/// descriptive charts for an uploaded dataset:
///   - PM2.5 distribution (histogram with density curve) if the PM2.5 column is present
///   - PM10 box plot if the PM10 column is present
///   - correlation heatmap if any recognized pollutant column is present and
///     the dataset has at least two numeric columns
///
/// a dataset without any recognized column yields no charts.
pub fn dataset_charts(ds: &Dataset) -> Vec<ChartSpec> {
    let mut charts = vec![];
    if let Some(values) = ds.numeric_values(PM25_COLUMN) {
        let bins = dataset::histogram(&values);
        let bin_width = bins.first().map(|b| b.upper - b.lower).unwrap_or(1.0);
        charts.push(ChartSpec::Histogram {
            title: String::from("PM2.5 Distribution"),
            column: String::from(PM25_COLUMN),
            density: dataset::kde_curve(&values, bin_width),
            bins,
        });
    } else if ds.has_column(PM25_COLUMN) {
        log::warn!("column '{PM25_COLUMN}' is not numeric, skipping distribution chart");
    }
    match ds.numeric_values(PM10_COLUMN).and_then(|v| dataset::box_summary(&v)) {
        Some(summary) => charts.push(ChartSpec::BoxPlot {
            title: String::from("PM10 Distribution"),
            column: String::from(PM10_COLUMN),
            summary,
        }),
        None if ds.has_column(PM10_COLUMN) => {
            log::warn!("column '{PM10_COLUMN}' has no numeric values, skipping box plot");
        }
        None => {}
    }
    let has_recognized = RECOGNIZED_COLUMNS.iter().any(|c| ds.has_column(c));
    let numeric = ds.numeric_columns();
    if ds.n_columns() > 1 && has_recognized && numeric.len() > 1 {
        charts.push(ChartSpec::Heatmap {
            title: String::from("Correlation Heatmap"),
            labels: numeric.iter().map(|(name, _)| name.clone()).collect(),
            values: dataset::correlation_matrix(&numeric),
        });
    }
    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_csv;

    #[test]
    fn test_all_charts_for_pollutant_dataset() {
        let src = "City or Locality,PM2.5 (μg/m3),PM10 (μg/m3),NO2 (μg/m3)\n\
                   Delhi,110,210,60\n\
                   Paris,14,22,25\n\
                   Lima,30,,18\n\
                   Oslo,6,12,\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        let charts = dataset_charts(&ds);
        let titles: Vec<&str> = charts.iter().map(|c| c.title()).collect();
        assert_eq!(
            titles,
            vec!["PM2.5 Distribution", "PM10 Distribution", "Correlation Heatmap"]
        );
        match &charts[2] {
            ChartSpec::Heatmap { labels, values, .. } => {
                assert_eq!(labels.len(), 3);
                assert_eq!(values.len(), 3);
            }
            other => panic!("expected heatmap, found {other:?}"),
        }
    }

    #[test]
    fn test_no_charts_without_recognized_columns() {
        let src = "station,reading_a,reading_b\nx,1,2\ny,3,5\nz,4,4\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        assert!(dataset_charts(&ds).is_empty());
    }

    #[test]
    fn test_heatmap_needs_two_numeric_columns() {
        let src = "city,PM10 (μg/m3)\nDelhi,210\nParis,22\n";
        let ds = read_csv(src.as_bytes()).unwrap();
        let charts = dataset_charts(&ds);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].title(), "PM10 Distribution");
    }
}
