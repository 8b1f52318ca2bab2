//! Commands that work without the prediction service.

use csr_core::{
    aggregate::{aggregate_default, aggregate_in_order},
    mock::MockRiskGenerator,
    payload::{DroughtPayload, TempStressPayload},
    stress_type::LABEL_ORDER,
    WeekKey,
};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;

use crate::{output::render_weeks, DisplayArgs};

/// Aggregate saved payloads. Malformed input is an error here; there is no
/// mock fallback for offline data.
pub fn run_aggregate(
    temp_stress_path: &Path,
    drought_path: &Path,
    weeks: &[String],
    display: &DisplayArgs,
) -> anyhow::Result<String> {
    let temp_stress = TempStressPayload::from_path(temp_stress_path)?;
    let drought = DroughtPayload::from_path(drought_path)?;
    info!(
        "Loaded {} temperature stress weeks and {} drought weeks",
        temp_stress.len(),
        drought.len()
    );

    let risk = if weeks.is_empty() {
        aggregate_default(&temp_stress, &drought)?
    } else {
        let order: Vec<WeekKey> = weeks.iter().map(|week| WeekKey::from(week.as_str())).collect();
        aggregate_in_order(&order, &temp_stress, &drought, &LABEL_ORDER)?
    };
    render_weeks(&risk, &display.start_date(), display.format)
}

/// Print a mock series, reproducible when `seed` is given.
pub fn run_mock(seed: Option<u64>, display: &DisplayArgs) -> anyhow::Result<String> {
    let weeks = match seed {
        Some(seed) => MockRiskGenerator::new(StdRng::seed_from_u64(seed)).generate(),
        None => MockRiskGenerator::from_thread_rng().generate(),
    };
    render_weeks(&weeks, &display.start_date(), display.format)
}
