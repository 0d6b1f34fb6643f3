use super::{
    measurement_input::{NO2_BOUNDS, PM10_BOUNDS, YEAR_BOUNDS},
    AirqError, CategoricalEncoder, LocationField, MeasurementInput,
};
use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 6;

/// column names of the model's training data, in the positional order the
/// scaler and model were fitted on. [`FeatureVector::to_row`] emits values in
/// exactly this order.
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
    "PM10 (μg/m3)",
    "NO2 (μg/m3)",
    "Measurement Year",
    "WHO Region",
    "WHO Country Name",
    "City or Locality",
];

/// the six model inputs for one measurement. the scaler and model operate
/// positionally, so reordering these fields would silently corrupt
/// predictions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub pm10: f64,
    pub no2: f64,
    pub year: i32,
    pub region_code: u8,
    pub country_code: u32,
    pub city_code: u32,
}

impl FeatureVector {
    /// validates the numeric readings of a measurement against their declared
    /// bounds and encodes its categorical fields.
    ///
    /// # Arguments
    /// * `input`   - user measurement
    /// * `encoder` - encoder for the free-text location fields
    ///
    /// # Result
    /// the feature vector, or an [`AirqError::OutOfRangeError`] naming the
    /// first reading outside of its bounds
    pub fn build(
        input: &MeasurementInput,
        encoder: &CategoricalEncoder,
    ) -> Result<FeatureVector, AirqError> {
        check_bounds("pm10", input.pm10(), PM10_BOUNDS)?;
        check_bounds("no2", input.no2(), NO2_BOUNDS)?;
        check_bounds(
            "year",
            input.year() as f64,
            (YEAR_BOUNDS.0 as f64, YEAR_BOUNDS.1 as f64),
        )?;
        Ok(FeatureVector {
            pm10: input.pm10(),
            no2: input.no2(),
            year: input.year(),
            region_code: input.region().code(),
            country_code: encoder.encode(LocationField::Country, input.country()),
            city_code: encoder.encode(LocationField::City, input.city()),
        })
    }

    pub fn to_row(&self) -> [f64; N_FEATURES] {
        [
            self.pm10,
            self.no2,
            self.year as f64,
            self.region_code as f64,
            self.country_code as f64,
            self.city_code as f64,
        ]
    }
}

/// builds the model feature vector for a measurement, hashing the free-text
/// location fields.
pub fn build_features(input: &MeasurementInput) -> Result<FeatureVector, AirqError> {
    FeatureVector::build(input, &CategoricalEncoder::hashed())
}

fn check_bounds(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), AirqError> {
    // written so that NaN fails the check
    if min <= value && value <= max {
        Ok(())
    } else {
        Err(AirqError::OutOfRangeError {
            field,
            value,
            min,
            max,
        })
    }
}
