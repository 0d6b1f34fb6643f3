use super::{Bar, ChartColor, ChartSpec};
use crate::app::DashboardError;
use crate::dataset::{BoxSummary, HistogramBin};
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

pub const CHART_SIZE: (u32, u32) = (800, 600);

const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);

/// writes charts as SVG files into an output directory. without a
/// directory, charts are described but not drawn.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    directory: Option<PathBuf>,
}

impl ChartRenderer {
    pub fn new(directory: Option<PathBuf>) -> ChartRenderer {
        ChartRenderer { directory }
    }

    /// draws the chart to `<directory>/<file_stem>.svg`.
    ///
    /// # Arguments
    ///
    /// * `chart` - chart to draw
    ///
    /// # Result
    ///
    /// the path written, or None when no output directory is configured
    pub fn render(&self, chart: &ChartSpec) -> Result<Option<PathBuf>, DashboardError> {
        let directory = match &self.directory {
            Some(d) => d,
            None => return Ok(None),
        };
        std::fs::create_dir_all(directory)?;
        let path = directory.join(format!("{}.svg", chart.file_stem()));
        let result = match chart {
            ChartSpec::Bar { title, bars } => draw_bar_chart(&path, title, bars),
            ChartSpec::Histogram {
                title,
                column,
                bins,
                density,
            } => draw_histogram(&path, title, column, bins, density),
            ChartSpec::BoxPlot {
                title,
                column,
                summary,
            } => draw_box_plot(&path, title, column, summary),
            ChartSpec::Heatmap {
                title,
                labels,
                values,
            } => draw_heatmap(&path, title, labels, values),
        };
        result.map_err(|e| {
            DashboardError::ChartRenderError(chart.title().to_string(), e.to_string())
        })?;
        log::info!("wrote chart '{}' to {}", chart.title(), path.display());
        Ok(Some(path))
    }
}

fn rgb(color: ChartColor) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

/// upper end of a value axis with some headroom for labels
fn axis_max(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.15
    } else {
        1.0
    }
}

fn draw_bar_chart(path: &Path, title: &str, bars: &[Bar]) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = bars.len().max(1) as f64;
    let y_max = axis_max(bars.iter().map(|b| b.value).fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..n, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc("μg/m³")
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new([(x + 0.15, 0.0), (x + 0.85, bar.value)], rgb(bar.color).filled())
    }))?;

    // label each bar with its name and value
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        EmptyElement::at((i as f64 + 0.15, bar.value))
            + Text::new(
                format!("{}: {:.1}", bar.label, bar.value),
                (0, -20),
                ("sans-serif", 15).into_font(),
            )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_histogram(
    path: &Path,
    title: &str,
    column: &str,
    bins: &[HistogramBin],
    density: &[(f64, f64)],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => (0.0, 1.0),
    };
    if !(x_max - x_min).is_finite() {
        return Err(format!("value range of '{column}' is too wide to draw").into());
    }
    let max_count = bins.iter().map(|b| b.count as f64).fold(0.0, f64::max);
    let max_density = density.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let y_max = axis_max(max_count.max(max_density));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("Count")
        .draw()?;

    let series_color = rgb(ChartColor::SeriesBlue);
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new(
            [(b.lower, 0.0), (b.upper, b.count as f64)],
            series_color.mix(0.6).filled(),
        )
    }))?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], series_color)
    }))?;
    chart.draw_series(LineSeries::new(
        density.iter().copied(),
        series_color.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

fn draw_box_plot(
    path: &Path,
    title: &str,
    column: &str,
    summary: &BoxSummary,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let low = summary
        .outliers
        .iter()
        .copied()
        .fold(summary.lower_whisker, f64::min);
    let high = summary
        .outliers
        .iter()
        .copied()
        .fold(summary.upper_whisker, f64::max);
    if !(high - low).is_finite() {
        return Err(format!("value range of '{column}' is too wide to draw").into());
    }
    let pad = if high > low { (high - low) * 0.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..2f64, (low - pad)..(high + pad))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc(column)
        .draw()?;

    let color = rgb(ChartColor::SeriesBlue);
    let (left, center, right) = (0.6, 1.0, 1.4);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, summary.q1), (right, summary.q3)],
        color.mix(0.6).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, summary.q1), (right, summary.q3)],
        BLACK,
    )))?;
    let segments = [
        vec![(left, summary.median), (right, summary.median)],
        vec![(center, summary.q3), (center, summary.upper_whisker)],
        vec![(center, summary.q1), (center, summary.lower_whisker)],
        vec![(0.8, summary.upper_whisker), (1.2, summary.upper_whisker)],
        vec![(0.8, summary.lower_whisker), (1.2, summary.lower_whisker)],
    ];
    chart.draw_series(
        segments
            .into_iter()
            .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
    )?;
    chart.draw_series(
        summary
            .outliers
            .iter()
            .map(|v| Circle::new((center, *v), 4, BLACK)),
    )?;

    root.present()?;
    Ok(())
}

/// linear blend of two colors, `t` in [0, 1]
fn blend(a: (f64, f64, f64), b: (f64, f64, f64), t: f64) -> RGBColor {
    let mix = |x: f64, y: f64| (x + (y - x) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// diverging cool-warm color for a correlation in [-1, 1]
pub fn coolwarm(value: f64) -> RGBColor {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        blend(NEUTRAL, COOL, -v)
    } else {
        blend(NEUTRAL, WARM, v)
    }
}

fn draw_heatmap(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[Vec<Option<f64>>],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = labels.len().max(1) as i32;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .top_x_label_area_size(40)
        .y_label_area_size(120)
        .build_cartesian_2d(0i32..n, n..0i32)?;

    let (width, height) = chart.plotting_area().dim_in_pixel();
    let cell_width = width as i32 / n;
    let cell_height = height as i32 / n;
    let label_of = |i: &i32| labels.get(*i as usize).cloned().unwrap_or_default();

    chart
        .configure_mesh()
        .x_labels(n as usize)
        .y_labels(n as usize)
        .x_label_offset(cell_width / 2)
        .y_label_offset(cell_height / 2)
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_formatter(&label_of)
        .y_label_formatter(&label_of)
        .label_style(("sans-serif", 12))
        .draw()?;

    let cells = values
        .iter()
        .zip(0..)
        .flat_map(|(row, y)| row.iter().zip(0..).map(move |(v, x)| (x, y, *v)))
        .collect::<Vec<_>>();

    chart.draw_series(cells.iter().map(|(x, y, v)| {
        let fill = v.map(coolwarm).unwrap_or(LIGHT_GRAY);
        Rectangle::new([(*x, *y), (*x + 1, *y + 1)], fill.filled())
    }))?;
    chart.draw_series(cells.iter().filter_map(|(x, y, v)| {
        v.map(|v| {
            EmptyElement::at((*x, *y))
                + Text::new(
                    format!("{v:.2}"),
                    (cell_width / 2 - 14, cell_height / 2 - 7),
                    ("sans-serif", 14).into_font(),
                )
        })
    }))?;

    root.present()?;
    Ok(())
}
