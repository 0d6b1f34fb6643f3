use super::AirqError;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

/// free-text codes are reduced into [0, FREE_TEXT_MODULUS)
pub const FREE_TEXT_MODULUS: u32 = 10_000;

/// encodes a free-text location (country or city name) as a bounded integer.
///
/// the hash is pinned to CRC-32 (IEEE polynomial) over the UTF-8 bytes of the
/// value, so codes are stable across runs, platforms and builds. distinct
/// strings may share a code; collisions are accepted.
pub fn encode_free_text(value: &str) -> u32 {
    crc32fast::hash(value.as_bytes()) % FREE_TEXT_MODULUS
}

/// which free-text field of a measurement is being encoded
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationField {
    Country,
    City,
}

impl std::fmt::Display for LocationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationField::Country => write!(f, "country"),
            LocationField::City => write!(f, "city"),
        }
    }
}

#[derive(Deserialize)]
struct LookupRow {
    value: String,
    code: u32,
}

/// persisted string -> code table for one location field, read from a CSV
/// file with `value,code` headers.
#[derive(Debug, Clone, Default)]
pub struct LocationLookup {
    codes: HashMap<String, u32>,
}

impl LocationLookup {
    pub fn new(codes: HashMap<String, u32>) -> Self {
        Self { codes }
    }

    pub fn get(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, String> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut codes = HashMap::new();
        for (idx, row) in csv_reader.deserialize::<LookupRow>().enumerate() {
            let row = row.map_err(|e| format!("row {idx}: {e}"))?;
            if let Some(prev) = codes.insert(row.value.clone(), row.code) {
                if prev != row.code {
                    return Err(format!(
                        "row {idx}: value '{}' mapped to both {prev} and {}",
                        row.value, row.code
                    ));
                }
            }
        }
        Ok(Self { codes })
    }
}

impl TryFrom<&Path> for LocationLookup {
    type Error = AirqError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let file = std::fs::File::open(path).map_err(|e| {
            AirqError::ModelUnavailableError(format!(
                "failure reading lookup table {}: {e}",
                path.display()
            ))
        })?;
        LocationLookup::from_csv_reader(file).map_err(|e| {
            AirqError::ModelUnavailableError(format!(
                "failure decoding lookup table {}: {e}",
                path.display()
            ))
        })
    }
}

/// encodes categorical measurement fields into the model's numeric space.
/// regions always use their canonical index. country and city use their
/// lookup table when one is configured, and the pinned free-text hash
/// for values the table does not contain.
#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoder {
    country_lookup: Option<LocationLookup>,
    city_lookup: Option<LocationLookup>,
}

impl CategoricalEncoder {
    /// an encoder that hashes every free-text value
    pub fn hashed() -> Self {
        Self::default()
    }

    pub fn with_lookup(mut self, field: LocationField, lookup: LocationLookup) -> Self {
        match field {
            LocationField::Country => self.country_lookup = Some(lookup),
            LocationField::City => self.city_lookup = Some(lookup),
        }
        self
    }

    pub fn encode(&self, field: LocationField, value: &str) -> u32 {
        let lookup = match field {
            LocationField::Country => self.country_lookup.as_ref(),
            LocationField::City => self.city_lookup.as_ref(),
        };
        match lookup.and_then(|l| l.get(value)) {
            Some(code) => code,
            None => {
                let code = encode_free_text(value);
                if lookup.is_some() {
                    log::debug!("{field} '{value}' not in lookup table, using hashed code {code}");
                }
                code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_free_text_is_deterministic_and_bounded() {
        for value in ["India", "Delhi", "France", "Paris", "", "São Paulo", "東京"] {
            let first = encode_free_text(value);
            let second = encode_free_text(value);
            assert_eq!(first, second);
            assert!(first < FREE_TEXT_MODULUS);
        }
    }

    #[test]
    fn test_encode_free_text_is_pinned_to_crc32() {
        // CRC-32 of "123456789" is the standard check value 0xCBF43926
        assert_eq!(encode_free_text("123456789"), 0xCBF4_3926 % FREE_TEXT_MODULUS);
        assert_eq!(encode_free_text(""), 0);
    }

    #[test]
    fn test_lookup_overrides_hash() {
        let table = "value,code\nIndia,7\nFrance,12\n";
        let lookup = LocationLookup::from_csv_reader(table.as_bytes()).unwrap();
        assert_eq!(lookup.len(), 2);
        let encoder = CategoricalEncoder::hashed().with_lookup(LocationField::Country, lookup);
        assert_eq!(encoder.encode(LocationField::Country, "India"), 7);
        assert_eq!(encoder.encode(LocationField::Country, "France"), 12);
        assert_eq!(
            encoder.encode(LocationField::Country, "Chile"),
            encode_free_text("Chile")
        );
        // the city field has no table and keeps hashing
        assert_eq!(
            encoder.encode(LocationField::City, "India"),
            encode_free_text("India")
        );
    }

    #[test]
    fn test_lookup_rejects_conflicting_codes() {
        let table = "value,code\nDelhi,1\nDelhi,2\n";
        let result = LocationLookup::from_csv_reader(table.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_lookup_file_is_model_unavailable() {
        let path = std::env::temp_dir().join("airq-missing-lookup-table.csv");
        let _ = std::fs::remove_file(&path);
        match LocationLookup::try_from(path.as_path()) {
            Err(e) => assert_eq!(e.code(), "model_unavailable"),
            Ok(_) => panic!("expected failure reading missing lookup table"),
        }
    }
}
