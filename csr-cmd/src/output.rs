//! Rendering of weekly risk and alert views for the terminal.

use chrono::NaiveDate;
use clap::ValueEnum;
use csr_core::{RiskReport, RiskSource, WeeklyRisk};
use csr_data::{
    alerts::{alert_groups, AlertGroup},
    gauges::{gauge_readings, gauge_rows, GaugeReading},
};
use csr_utils::dates::format_date;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One CSV row per forecast week.
#[derive(Debug, Serialize)]
struct GaugeRecord<'a> {
    week: usize,
    first_day: NaiveDate,
    last_day: NaiveDate,
    risk: u32,
    severity: &'a str,
    labels: String,
}

#[derive(Serialize)]
struct ReportView<'a> {
    crop: csr_core::Crop,
    source: &'a RiskSource,
    gauges: Vec<GaugeReading>,
}

#[derive(Serialize)]
struct AlertsView<'a> {
    crop: csr_core::Crop,
    source: &'a RiskSource,
    groups: Vec<AlertGroup>,
}

fn join_labels(reading: &GaugeReading, separator: &str) -> String {
    reading
        .labels
        .iter()
        .map(|label| label.label())
        .collect::<Vec<&str>>()
        .join(separator)
}

fn source_line(report: &RiskReport) -> String {
    match &report.source {
        RiskSource::Live => format!("{} stress risk (live)", report.crop.label()),
        RiskSource::Fallback { reason } => format!(
            "{} stress risk (mock data, service unavailable: {})",
            report.crop.label(),
            reason
        ),
    }
}

fn gauges_table(readings: &[GaugeReading]) -> String {
    let mut out = String::new();
    for (row_index, row) in gauge_rows(readings).into_iter().enumerate() {
        if row_index > 0 {
            out.push('\n');
        }
        for reading in row {
            let caption = reading.severity.caption().unwrap_or("");
            let _ = writeln!(
                out,
                "{:>2}  {:<15} {:>5}  {:<16} {}",
                reading.week_index + 1,
                reading.span.to_string(),
                reading.dial_text(),
                caption,
                join_labels(reading, ", ")
            );
        }
    }
    out
}

fn gauges_csv(readings: &[GaugeReading]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for reading in readings {
        writer.serialize(GaugeRecord {
            week: reading.week_index,
            first_day: reading.span.first,
            last_day: reading.span.last,
            risk: reading.risk,
            severity: reading.severity.as_str(),
            labels: join_labels(reading, ";"),
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render a bare weekly series, week 0 starting on `start`.
pub fn render_weeks(
    weeks: &[WeeklyRisk],
    start: &NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let readings = gauge_readings(weeks, start)?;
    match format {
        OutputFormat::Table => Ok(gauges_table(&readings)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&readings)?),
        OutputFormat::Csv => gauges_csv(&readings),
    }
}

/// Render a crop report with its data source.
pub fn render_report(
    report: &RiskReport,
    start: &NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(format!(
            "{}\n\n{}",
            source_line(report),
            render_weeks(&report.weeks, start, format)?
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ReportView {
            crop: report.crop,
            source: &report.source,
            gauges: gauge_readings(&report.weeks, start)?,
        })?),
        OutputFormat::Csv => render_weeks(&report.weeks, start, format),
    }
}

/// Render the alert panel for a crop report.
pub fn render_alerts(
    report: &RiskReport,
    start: &NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let groups = alert_groups(&report.weeks, start)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&AlertsView {
            crop: report.crop,
            source: &report.source,
            groups,
        })?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["tier", "stress_type", "first_day", "last_day"])?;
            for group in &groups {
                for entry in &group.entries {
                    for span in &entry.spans {
                        let first_day = format_date(&span.first);
                        let last_day = format_date(&span.last);
                        writer.write_record([
                            group.tier.title(),
                            entry.stress_type.label(),
                            first_day.as_str(),
                            last_day.as_str(),
                        ])?;
                    }
                }
            }
            let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
            Ok(String::from_utf8(bytes)?)
        }
        OutputFormat::Table => {
            let mut out = source_line(report);
            out.push('\n');
            for group in &groups {
                let _ = write!(out, "\n{}\n", group.tier.title());
                if !group.is_expanded() {
                    out.push_str("  none\n");
                }
                for entry in &group.entries {
                    let spans = entry
                        .spans
                        .iter()
                        .map(|span| span.to_string())
                        .collect::<Vec<String>>()
                        .join(", ");
                    let _ = writeln!(out, "  {}: {}", entry.stress_type.label(), spans);
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::{Crop, StressType};

    fn sample_weeks() -> Vec<WeeklyRisk> {
        vec![
            WeeklyRisk {
                value: 5,
                labels: vec![StressType::DiurnalHeat, StressType::NightimeHeat],
            },
            WeeklyRisk {
                value: 0,
                labels: vec![],
            },
            WeeklyRisk {
                value: 8,
                labels: vec![StressType::Drought],
            },
        ]
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn test_table_output() {
        let out = render_weeks(&sample_weeks(), &start(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("1/2 - 7/2"));
        assert!(lines[0].contains("5 / 9"));
        assert!(lines[0].contains("Stress warning!"));
        assert!(lines[0].ends_with("Diurnal Heat, Nightime Heat"));
        assert!(lines[2].contains("Stress alert!"));
    }

    #[test]
    fn test_csv_output() {
        let out = render_weeks(&sample_weeks(), &start(), OutputFormat::Csv).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "week,first_day,last_day,risk,severity,labels"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0,2025-02-01,2025-02-07,5,warning,Diurnal Heat;Nightime Heat"
        );
    }

    #[test]
    fn test_report_json_output() {
        let report = RiskReport::live(Crop::Cotton, sample_weeks());
        let out = render_report(&report, &start(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["crop"], "cotton");
        assert_eq!(value["source"]["kind"], "live");
        assert_eq!(value["gauges"][2]["severity"], "alert");
        assert_eq!(value["gauges"][0]["labels"][1], "Nightime Heat");
    }

    #[test]
    fn test_alerts_table_output() {
        let report = RiskReport::live(Crop::Soybean, sample_weeks());
        let out = render_alerts(&report, &start(), OutputFormat::Table).unwrap();
        assert!(out.contains("Stress Alerts\n  Drought: 15/2 - 21/2"));
        assert!(out.contains("Stress Warnings\n  Diurnal Heat: 1/2 - 7/2\n  Nightime Heat: 1/2 - 7/2"));
    }

    #[test]
    fn test_alerts_csv_output() {
        let report = RiskReport::live(Crop::Soybean, sample_weeks());
        let out = render_alerts(&report, &start(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "tier,stress_type,first_day,last_day");
        assert_eq!(lines[1], "Stress Alerts,Drought,2025-02-15,2025-02-21");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_start_past_calendar_end_is_an_error() {
        let start = NaiveDate::MAX - chrono::Days::new(3);
        let report = RiskReport::live(Crop::Rice, sample_weeks());
        assert!(render_weeks(&report.weeks, &start, OutputFormat::Table).is_err());
        assert!(render_report(&report, &start, OutputFormat::Json).is_err());
        assert!(render_alerts(&report, &start, OutputFormat::Csv).is_err());
    }
}
