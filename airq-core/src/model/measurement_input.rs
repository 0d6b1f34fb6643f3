use super::Region;
use serde::{Deserialize, Serialize};

/// inclusive bounds on PM10 readings, in μg/m³
pub const PM10_BOUNDS: (f64, f64) = (0.0, 600.0);
/// inclusive bounds on NO2 readings, in μg/m³
pub const NO2_BOUNDS: (f64, f64) = (0.0, 200.0);
/// inclusive bounds on the measurement year
pub const YEAR_BOUNDS: (i32, i32) = (2000, 2035);

/// one set of user-entered measurements. built fresh for every prediction
/// request and never modified afterward.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeasurementInput {
    pm10: f64,
    no2: f64,
    year: i32,
    region: Region,
    country: String,
    city: String,
}

impl MeasurementInput {
    pub fn new(
        region: Region,
        country: &str,
        city: &str,
        pm10: f64,
        no2: f64,
        year: i32,
    ) -> Self {
        Self {
            pm10,
            no2,
            year,
            region,
            country: country.to_string(),
            city: city.to_string(),
        }
    }

    pub fn pm10(&self) -> f64 {
        self.pm10
    }

    pub fn no2(&self) -> f64 {
        self.no2
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}
