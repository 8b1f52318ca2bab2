use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::StressError;

/// Category of agronomic stress scored by the prediction service.
///
/// The wire names are the labels shown on the dashboard, including the
/// service's `Nightime Heat` spelling.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum StressType {
    #[serde(rename = "Diurnal Heat")]
    DiurnalHeat,
    #[serde(rename = "Frost")]
    Frost,
    #[serde(rename = "Nightime Heat", alias = "Nighttime Heat")]
    NightimeHeat,
    #[serde(rename = "Drought")]
    Drought,
}

/// Temperature stress types in the order their labels are reported.
pub const LABEL_ORDER: [StressType; 3] = [
    StressType::DiurnalHeat,
    StressType::Frost,
    StressType::NightimeHeat,
];

/// Every stress type, drought last, as listed on the alert panel.
pub const ALL_STRESS_TYPES: [StressType; 4] = [
    StressType::DiurnalHeat,
    StressType::Frost,
    StressType::NightimeHeat,
    StressType::Drought,
];

impl StressType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DiurnalHeat => "Diurnal Heat",
            Self::Frost => "Frost",
            Self::NightimeHeat => "Nightime Heat",
            Self::Drought => "Drought",
        }
    }
}

impl fmt::Display for StressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StressType {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Diurnal Heat" => Ok(Self::DiurnalHeat),
            "Frost" => Ok(Self::Frost),
            "Nightime Heat" | "Nighttime Heat" => Ok(Self::NightimeHeat),
            "Drought" => Ok(Self::Drought),
            other => Err(StressError::malformed(format!(
                "unknown stress type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_through_from_str() {
        for stress_type in ALL_STRESS_TYPES {
            assert_eq!(stress_type.label().parse::<StressType>().unwrap(), stress_type);
        }
    }

    #[test]
    fn test_nighttime_alias() {
        let parsed: StressType = serde_json::from_str("\"Nighttime Heat\"").unwrap();
        assert_eq!(parsed, StressType::NightimeHeat);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Nightime Heat\"");
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!("Hail".parse::<StressType>().is_err());
        assert!(serde_json::from_str::<StressType>("\"Hail\"").is_err());
    }
}
