use super::DashboardError;
use crate::config::FormDefaults;
use airq_core::model::{MeasurementInput, Region};
use serde::{Deserialize, Serialize};

/// the prediction form as the user submitted it. fields left empty take
/// their configured defaults, except the region which is required.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PredictionForm {
    pub region: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub year: Option<i32>,
}

impl PredictionForm {
    /// parses `key=value` pairs separated by `;`, such as
    /// `region=European Region; city=Paris; pm10=40`.
    pub fn parse_fields(text: &str) -> Result<PredictionForm, DashboardError> {
        let mut form = PredictionForm::default();
        for field in text.split(';').map(str::trim).filter(|f| !f.is_empty()) {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                DashboardError::InputError(format!("expected key=value, found '{field}'"))
            })?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "region" => form.region = Some(value.to_string()),
                "country" => form.country = Some(value.to_string()),
                "city" => form.city = Some(value.to_string()),
                "pm10" => form.pm10 = Some(parse_number(key, value)?),
                "no2" => form.no2 = Some(parse_number(key, value)?),
                "year" => form.year = Some(parse_number(key, value)?),
                other => {
                    return Err(DashboardError::InputError(format!(
                        "unknown field '{other}', expected one of: region, country, city, pm10, no2, year"
                    )))
                }
            }
        }
        Ok(form)
    }

    /// builds the measurement for this submission.
    ///
    /// # Arguments
    ///
    /// * `defaults` - values for fields not present on the form
    ///
    /// # Result
    ///
    /// the measurement, or an error when the region is missing or not one
    /// of the canonical WHO region labels. numeric ranges are checked later
    /// when the feature vector is built.
    pub fn to_input(&self, defaults: &FormDefaults) -> Result<MeasurementInput, DashboardError> {
        let label = self
            .region
            .as_deref()
            .ok_or_else(|| DashboardError::InputError(String::from("region is required")))?;
        let region = Region::try_from(label)?;
        Ok(MeasurementInput::new(
            region,
            self.country.as_deref().unwrap_or(&defaults.country),
            self.city.as_deref().unwrap_or(&defaults.city),
            self.pm10.unwrap_or(defaults.pm10),
            self.no2.unwrap_or(defaults.no2),
            self.year.unwrap_or(defaults.year),
        ))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DashboardError> {
    value
        .parse::<T>()
        .map_err(|_| DashboardError::InputError(format!("{key} value '{value}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let text = "region=European Region; country=France;city=Paris; pm10=40; no2 = 25; year=2023";
        let form = PredictionForm::parse_fields(text).unwrap();
        assert_eq!(form.region.as_deref(), Some("European Region"));
        assert_eq!(form.country.as_deref(), Some("France"));
        assert_eq!(form.city.as_deref(), Some("Paris"));
        assert_eq!(form.pm10, Some(40.0));
        assert_eq!(form.no2, Some(25.0));
        assert_eq!(form.year, Some(2023));
    }

    #[test]
    fn test_parse_fields_errors() {
        let err = PredictionForm::parse_fields("pm10=lots").unwrap_err();
        assert_eq!(err.code(), "input_error");
        let err = PredictionForm::parse_fields("altitude=12").unwrap_err();
        assert_eq!(err.code(), "input_error");
        let err = PredictionForm::parse_fields("region").unwrap_err();
        assert_eq!(err.code(), "input_error");
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let form = PredictionForm {
            region: Some(String::from("South East Asia Region")),
            ..Default::default()
        };
        let input = form.to_input(&FormDefaults::default()).unwrap();
        assert_eq!(input.region(), Region::SouthEastAsia);
        assert_eq!(input.country(), "India");
        assert_eq!(input.city(), "Delhi");
        assert_eq!(input.pm10(), 50.0);
        assert_eq!(input.no2(), 30.0);
        assert_eq!(input.year(), 2022);
    }

    #[test]
    fn test_region_is_required_and_checked() {
        let err = PredictionForm::default()
            .to_input(&FormDefaults::default())
            .unwrap_err();
        assert_eq!(err.code(), "input_error");
        let form = PredictionForm {
            region: Some(String::from("Europe")),
            ..Default::default()
        };
        let err = form.to_input(&FormDefaults::default()).unwrap_err();
        assert_eq!(err.code(), "invalid_region");
    }
}
