use super::AirqError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// the six World Health Organization regions, in the canonical order used
/// when the prediction model was trained. the position of a region in
/// [`Region::ALL`] is its encoded value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    #[serde(rename = "African Region")]
    African,
    #[serde(rename = "Eastern Mediterranean Region")]
    EasternMediterranean,
    #[serde(rename = "European Region")]
    European,
    #[serde(rename = "Region of the Americas")]
    Americas,
    #[serde(rename = "South East Asia Region")]
    SouthEastAsia,
    #[serde(rename = "Western Pacific Region")]
    WesternPacific,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::African,
        Region::EasternMediterranean,
        Region::European,
        Region::Americas,
        Region::SouthEastAsia,
        Region::WesternPacific,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::African => "African Region",
            Region::EasternMediterranean => "Eastern Mediterranean Region",
            Region::European => "European Region",
            Region::Americas => "Region of the Americas",
            Region::SouthEastAsia => "South East Asia Region",
            Region::WesternPacific => "Western Pacific Region",
        }
    }

    /// zero-based position of this region in the canonical ordering
    pub fn code(&self) -> u8 {
        match self {
            Region::African => 0,
            Region::EasternMediterranean => 1,
            Region::European => 2,
            Region::Americas => 3,
            Region::SouthEastAsia => 4,
            Region::WesternPacific => 5,
        }
    }

    /// comma-delimited list of every canonical label, for error messages
    pub fn expected_labels() -> String {
        Region::ALL.iter().map(|r| r.label()).join(", ")
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<&str> for Region {
    type Error = AirqError;

    /// only exact canonical labels are accepted. no attempt is made to
    /// guess a region from a partial or differently-cased label.
    fn try_from(label: &str) -> Result<Self, Self::Error> {
        Region::ALL
            .iter()
            .find(|r| r.label() == label)
            .copied()
            .ok_or_else(|| AirqError::InvalidRegionError {
                label: label.to_string(),
                expected: Region::expected_labels(),
            })
    }
}

impl FromStr for Region {
    type Err = AirqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::try_from(s)
    }
}

/// encodes a WHO region label as its canonical zero-based index.
///
/// # Arguments
/// * `label` - one of the six canonical region labels
///
/// # Result
/// the region code in [0, 6), or an [`AirqError::InvalidRegionError`] for
/// any label outside of the enumeration.
pub fn encode_region(label: &str) -> Result<u8, AirqError> {
    Region::try_from(label).map(|r| r.code())
}
