mod chart_spec;
mod dataset_charts;
mod input_charts;
mod svg_renderer;

pub use chart_spec::{Bar, ChartColor, ChartSpec};
pub use dataset_charts::{dataset_charts, NO2_COLUMN, PM10_COLUMN, PM25_COLUMN, RECOGNIZED_COLUMNS};
pub use input_charts::{input_charts, INDEX_COMPONENTS_CHART_TITLE, READINGS_CHART_TITLE};
pub use svg_renderer::{coolwarm, ChartRenderer, CHART_SIZE};
