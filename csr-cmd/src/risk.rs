//! Live request cycle: fetch, aggregate, fall back to mock data on failure.

use csr_core::{Crop, RiskReport};
use log::info;

use crate::{
    output::{render_alerts, render_report},
    DisplayArgs, ServiceArgs,
};

async fn load_report(crop: Crop, service: &ServiceArgs) -> anyhow::Result<RiskReport> {
    let client = service.client()?;
    info!("Requesting {} stress data from {}", crop, client.base_url());
    let report = client
        .load_report(crop, service.fetch_mode(), rand::thread_rng())
        .await;
    info!(
        "Loaded {} weeks for {} ({})",
        report.weeks.len(),
        crop,
        if report.is_fallback() { "mock" } else { "live" }
    );
    Ok(report)
}

/// Fetch weekly risk for `crop` and render its gauges.
pub async fn run_risk(
    crop: Crop,
    service: &ServiceArgs,
    display: &DisplayArgs,
) -> anyhow::Result<String> {
    let report = load_report(crop, service).await?;
    render_report(&report, &display.start_date(), display.format)
}

/// Fetch weekly risk for `crop` and render its alert panel.
pub async fn run_alerts(
    crop: Crop,
    service: &ServiceArgs,
    display: &DisplayArgs,
) -> anyhow::Result<String> {
    let report = load_report(crop, service).await?;
    render_alerts(&report, &display.start_date(), display.format)
}
