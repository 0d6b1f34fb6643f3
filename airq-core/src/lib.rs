pub mod model;
pub mod prediction;
