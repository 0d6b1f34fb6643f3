pub mod app;
pub mod chart;
pub mod config;
pub mod dataset;
