pub mod artifact_ops;
mod artifact_prediction_service;
mod model_artifact;
mod prediction_ops;
mod prediction_service;
mod regression_tree;
mod scaler_artifact;

pub use artifact_prediction_service::ArtifactPredictionService;
pub use model_artifact::ModelArtifact;
pub use prediction_ops::predict_measurement;
pub use prediction_service::{NormalizedVector, PredictionService};
pub use regression_tree::{RegressionTree, TREE_LEAF};
pub use scaler_artifact::ScalerArtifact;
