mod dashboard_config;

pub use dashboard_config::{
    ArtifactConfig, DashboardConfig, EncodingConfig, FormDefaults, OutputConfig,
};
