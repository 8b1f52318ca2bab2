pub mod aggregate;
#[cfg(feature = "api")]
pub mod client;
pub mod crop;
pub mod error;
pub mod mock;
pub mod payload;
pub mod report;
pub mod stress_type;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use crop::Crop;
pub use error::{Result, StressError};
pub use report::{RiskReport, RiskSource};
pub use stress_type::StressType;

/// Highest score the prediction service emits for any stress type.
pub const MAX_RISK: u32 = 9;

/// Number of weeks in the forecast horizon shown on the dashboard.
pub const FORECAST_WEEKS: usize = 12;

/// Opaque identifier of a single forecast week, as emitted by the service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekKey(pub String);

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WeekKey {
    fn from(value: &str) -> Self {
        WeekKey(value.to_string())
    }
}

/// The aggregated risk for one week.
///
/// `value` is the highest score among all stress types (drought included);
/// `labels` names every stress type reaching it, drought first. A week with
/// zero risk carries no labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRisk {
    pub value: u32,
    pub labels: Vec<StressType>,
}

impl WeeklyRisk {
    /// Returns true if `stress_type` is one of the labels reaching the maximum.
    pub fn has_label(&self, stress_type: StressType) -> bool {
        self.labels.contains(&stress_type)
    }
}
