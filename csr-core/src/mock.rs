use rand::Rng;

use crate::{stress_type::ALL_STRESS_TYPES, WeeklyRisk, FORECAST_WEEKS, MAX_RISK};

/// Random stand-in for the weekly risk series, used when the prediction
/// service cannot be reached or its data cannot be aggregated.
///
/// Every week gets a uniform score in `0..=9` and the full label set.
pub struct MockRiskGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> MockRiskGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> Vec<WeeklyRisk> {
        (0..FORECAST_WEEKS)
            .map(|_| WeeklyRisk {
                value: self.rng.gen_range(0..=MAX_RISK),
                labels: ALL_STRESS_TYPES.to_vec(),
            })
            .collect()
    }
}

impl MockRiskGenerator<rand::rngs::ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}
