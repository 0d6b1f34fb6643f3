mod airq_cli;
mod dashboard_context;
mod dashboard_error;
mod dashboard_report;
mod prediction_form;
mod session;

pub use airq_cli::{AirqCliArguments, AirqOperation};
pub use dashboard_context::DashboardContext;
pub use dashboard_error::DashboardError;
pub use dashboard_report::{PredictionReport, UploadReport};
pub use prediction_form::PredictionForm;
pub use session::{run_session, write_regions};
