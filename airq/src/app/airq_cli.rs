use super::{run_session, write_regions, DashboardContext, DashboardError, PredictionForm};
use crate::config::DashboardConfig;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::Path};

/// command line air quality dashboard: predicts PM2.5 from pollutant
/// readings and summarizes air quality datasets
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AirqCliArguments {
    /// dashboard configuration file (.toml or .json). defaults are used
    /// when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// write prediction and dataset reports as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// select the dashboard operation to run
    #[command(subcommand)]
    pub op: AirqOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum AirqOperation {
    /// predicts PM2.5 for one set of measurements
    Predict {
        /// WHO region label, such as "European Region"
        #[arg(short, long)]
        region: String,
        /// country name
        #[arg(long)]
        country: Option<String>,
        /// city or locality name
        #[arg(long)]
        city: Option<String>,
        /// PM10 reading in μg/m³, within [0, 600]
        #[arg(long)]
        pm10: Option<f64>,
        /// NO2 reading in μg/m³, within [0, 200]
        #[arg(long)]
        no2: Option<f64>,
        /// measurement year, within [2000, 2035]
        #[arg(long)]
        year: Option<i32>,
    },
    /// summarizes a .csv or spreadsheet dataset
    Analyze {
        /// dataset file path
        file: String,
    },
    /// lists the WHO region labels and their encoded values
    Regions,
    /// interactive session reading commands from stdin
    Session,
}

impl AirqOperation {
    /// runs the operation.
    ///
    /// # Arguments
    ///
    /// * `config_file` - optional dashboard configuration file
    /// * `json`        - print reports as JSON instead of text
    pub fn run(&self, config_file: Option<&Path>, json: bool) -> Result<(), DashboardError> {
        match self {
            AirqOperation::Predict {
                region,
                country,
                city,
                pm10,
                no2,
                year,
            } => {
                let form = PredictionForm {
                    region: Some(region.clone()),
                    country: country.clone(),
                    city: city.clone(),
                    pm10: *pm10,
                    no2: *no2,
                    year: *year,
                };
                let ctx = load_context(config_file)?;
                let report = ctx.predict(&form)?;
                print_report(&report, json)
            }
            AirqOperation::Analyze { file } => {
                let ctx = load_context(config_file)?;
                let report = ctx.analyze(Path::new(file))?;
                print_report(&report, json)
            }
            AirqOperation::Regions => {
                write_regions(&mut std::io::stdout())?;
                Ok(())
            }
            AirqOperation::Session => {
                let ctx = load_context(config_file)?;
                let stdin = std::io::stdin();
                run_session(&ctx, stdin.lock(), std::io::stdout())
            }
        }
    }
}

fn print_report<T: Serialize + Display>(report: &T, json: bool) -> Result<(), DashboardError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// reads the configuration and loads the artifacts once for this process
fn load_context(config_file: Option<&Path>) -> Result<DashboardContext, DashboardError> {
    let config = DashboardConfig::load(config_file)?;
    let ctx = DashboardContext::try_from(&config)?;
    log::info!("dashboard context ready");
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict_arguments() {
        let args = AirqCliArguments::parse_from([
            "airq",
            "--config",
            "airq.toml",
            "predict",
            "--region",
            "European Region",
            "--city",
            "Paris",
            "--pm10",
            "40",
        ]);
        assert_eq!(args.config.as_deref(), Some("airq.toml"));
        assert!(!args.json);
        match args.op {
            AirqOperation::Predict {
                region, city, pm10, no2, ..
            } => {
                assert_eq!(region, "European Region");
                assert_eq!(city.as_deref(), Some("Paris"));
                assert_eq!(pm10, Some(40.0));
                assert_eq!(no2, None);
            }
            other => panic!("expected predict, found {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = AirqCliArguments::parse_from(["airq", "analyze", "who.xlsx", "--json"]);
        assert!(args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_region_is_required() {
        let result = AirqCliArguments::try_parse_from(["airq", "predict", "--pm10", "40"]);
        assert!(result.is_err());
    }
}
