mod cell;
mod column_stats;
mod reader;
mod summary;
mod table;

pub use cell::{Cell, NA_VALUES};
pub use column_stats::{
    box_summary, correlation_matrix, histogram, kde_curve, pearson, quantile, BoxSummary,
    HistogramBin, KDE_GRID_SIZE, MAX_HISTOGRAM_BINS,
};
pub use reader::{read_csv, read_dataset, DatasetFormat};
pub use summary::{summarize, DatasetSummary};
pub use table::Dataset;
