use log::warn;
use rand::Rng;
use serde::Serialize;

use crate::{error::StressError, mock::MockRiskGenerator, Crop, WeeklyRisk};

/// Where a report's weekly series came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RiskSource {
    Live,
    Fallback { reason: String },
}

/// The weekly risk series for one crop, as handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskReport {
    pub crop: Crop,
    pub source: RiskSource,
    pub weeks: Vec<WeeklyRisk>,
}

impl RiskReport {
    pub fn live(crop: Crop, weeks: Vec<WeeklyRisk>) -> Self {
        RiskReport {
            crop,
            source: RiskSource::Live,
            weeks,
        }
    }

    pub fn fallback<R: Rng>(crop: Crop, reason: String, rng: R) -> Self {
        RiskReport {
            crop,
            source: RiskSource::Fallback { reason },
            weeks: MockRiskGenerator::new(rng).generate(),
        }
    }

    /// Keep a successful aggregation, otherwise substitute the mock series.
    ///
    /// Transport failures and malformed payloads are treated alike: the
    /// error is logged and never surfaced to the caller.
    pub fn from_result<R: Rng>(
        crop: Crop,
        result: Result<Vec<WeeklyRisk>, StressError>,
        rng: R,
    ) -> Self {
        match result {
            Ok(weeks) => RiskReport::live(crop, weeks),
            Err(e) => {
                warn!("Using mock risk data for {}: {}", crop, e);
                RiskReport::fallback(crop, e.to_string(), rng)
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RiskSource::Fallback { .. })
    }
}
