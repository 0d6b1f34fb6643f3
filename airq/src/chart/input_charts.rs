use super::{Bar, ChartColor, ChartSpec};

pub const READINGS_CHART_TITLE: &str = "PM10 vs NO2";
pub const INDEX_COMPONENTS_CHART_TITLE: &str = "Pollution Index Components";

/// the two bar charts drawn from the user's inputs on every prediction
/// request. the predicted PM2.5 bar shows 0 when no prediction succeeded.
pub fn input_charts(pm10: f64, no2: f64, predicted_pm25: Option<f64>) -> Vec<ChartSpec> {
    let bar = |label: &str, value: f64, color: ChartColor| Bar {
        label: label.to_string(),
        value,
        color,
    };
    vec![
        ChartSpec::Bar {
            title: String::from(READINGS_CHART_TITLE),
            bars: vec![
                bar("PM10", pm10, ChartColor::Blue),
                bar("NO2", no2, ChartColor::Purple),
            ],
        },
        ChartSpec::Bar {
            title: String::from(INDEX_COMPONENTS_CHART_TITLE),
            bars: vec![
                bar(
                    "PM2.5 (Predicted)",
                    predicted_pm25.unwrap_or_default(),
                    ChartColor::Red,
                ),
                bar("PM10", pm10, ChartColor::Green),
                bar("NO2", no2, ChartColor::Orange),
            ],
        },
    ]
}
