use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::StressError;

/// Crops the prediction service has temperature stress models for.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    #[default]
    Soybean,
    Corn,
    Cotton,
    Rice,
    Wheat,
}

impl Crop {
    pub const ALL: [Crop; 5] = [
        Crop::Soybean,
        Crop::Corn,
        Crop::Cotton,
        Crop::Rice,
        Crop::Wheat,
    ];

    /// Path segment used in `/api/predict/temp_stress/{crop}`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soybean => "soybean",
            Self::Corn => "corn",
            Self::Cotton => "cotton",
            Self::Rice => "rice",
            Self::Wheat => "wheat",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Soybean => "Soybean",
            Self::Corn => "Corn",
            Self::Cotton => "Cotton",
            Self::Rice => "Rice",
            Self::Wheat => "Wheat",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Crop::ALL
            .into_iter()
            .find(|crop| crop.as_str() == lowered)
            .ok_or_else(|| StressError::UnknownCrop(s.to_string()))
    }
}
