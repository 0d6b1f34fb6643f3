//! descriptive statistics behind the dataset charts: histogram bins with a
//! kernel density curve, box plot summaries and pairwise correlations.

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// number of evaluation points along a density curve
pub const KDE_GRID_SIZE: usize = 200;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// lowest observation within 1.5 IQR below q1
    pub lower_whisker: f64,
    /// highest observation within 1.5 IQR above q3
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// quantile of sorted values with linear interpolation between closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .sorted_by(|a, b| a.total_cmp(b))
        .collect()
}

/// box plot summary of a column, or `None` when it has no finite values
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let sorted = sorted_finite(values);
    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();
    Some(BoxSummary {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// upper limit on the number of histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

/// equal-width histogram using the "auto" bin rule: the smaller of the
/// Sturges and Freedman-Diaconis bin widths, or Sturges alone when the
/// interquartile range is zero. falls back to the Sturges bin count when
/// the rule asks for more than [`MAX_HISTOGRAM_BINS`] bins, and to a single
/// bin when the data range overflows.
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    let sorted = sorted_finite(values);
    let (lo, hi) = match sorted.iter().minmax() {
        MinMaxResult::NoElements => return vec![],
        MinMaxResult::OneElement(v) => (*v, *v),
        MinMaxResult::MinMax(lo, hi) => (*lo, *hi),
    };
    let n = sorted.len() as f64;
    let data_range = hi - lo;
    let sturges_bins = (n.log2() + 1.0).ceil();
    let sturges = data_range / (n.log2() + 1.0);
    let iqr = quantile(&sorted, 0.75).unwrap_or_default()
        - quantile(&sorted, 0.25).unwrap_or_default();
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    let n_bins = if !data_range.is_finite() {
        1
    } else if width > 0.0 {
        let auto_bins = (data_range / width).ceil();
        if auto_bins > MAX_HISTOGRAM_BINS as f64 {
            log::warn!(
                "auto rule asks for {auto_bins} histogram bins, using {sturges_bins} Sturges bins"
            );
            (sturges_bins as usize).clamp(1, MAX_HISTOGRAM_BINS)
        } else {
            (auto_bins as usize).max(1)
        }
    } else {
        1
    };
    // a single distinct value gets a unit-wide bin centered on it
    let (first, last) = if data_range > 0.0 {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    };
    let bin_width = (last - first) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for v in sorted.iter() {
        let idx = (((v - first) / bin_width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: if i == 0 {
                first
            } else {
                first + bin_width * i as f64
            },
            upper: if i + 1 == n_bins {
                last
            } else {
                first + bin_width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// gaussian kernel density estimate over the data range with Scott's
/// bandwidth, scaled to histogram counts (`density * n * bin_width`).
/// empty when fewer than two values are present or they have no spread.
pub fn kde_curve(values: &[f64], bin_width: f64) -> Vec<(f64, f64)> {
    let sorted = sorted_finite(values);
    let n = sorted.len();
    if n < 2 {
        return vec![];
    }
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if !(std > 0.0 && std.is_finite()) {
        return vec![];
    }
    let bandwidth = std * (n as f64).powf(-0.2);
    let (lo, hi) = (sorted[0], sorted[n - 1]);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * bin_width;
    (0..KDE_GRID_SIZE)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (KDE_GRID_SIZE - 1) as f64;
            let density = norm
                * sorted
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum::<f64>();
            (x, density * scale)
        })
        .collect()
}

/// Pearson correlation over rows where both values are present. `None` when
/// fewer than two such rows exist or either side has no variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect_vec();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs.iter() {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// pairwise correlation matrix of the given columns, in column order
pub fn correlation_matrix(columns: &[(String, Vec<Option<f64>>)]) -> Vec<Vec<Option<f64>>> {
    columns
        .iter()
        .map(|(_, a)| columns.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect()
}
