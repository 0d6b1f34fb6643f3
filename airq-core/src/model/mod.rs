mod air_quality_category;
mod airq_error;
mod feature_vector;
mod location_encoder;
pub mod measurement_input;
mod pollution_index;
mod prediction_result;
mod region;

pub use air_quality_category::AirQualityCategory;
pub use airq_error::AirqError;
pub use feature_vector::{build_features, FeatureVector, FEATURE_COLUMNS, N_FEATURES};
pub use location_encoder::{
    encode_free_text, CategoricalEncoder, LocationField, LocationLookup, FREE_TEXT_MODULUS,
};
pub use measurement_input::MeasurementInput;
pub use pollution_index::pollution_index;
pub use prediction_result::PredictionResult;
pub use region::{encode_region, Region};
