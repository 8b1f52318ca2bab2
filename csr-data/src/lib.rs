//! Dashboard views over the weekly risk series.
//!
//! This crate turns aggregated `WeeklyRisk` values into what the dashboard
//! shows: gauge readings with severity bands, and alert lists grouping the
//! affected weeks by stress type.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// The seven days covered by one forecast week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl WeekSpan {
    /// Span of forecast week `index` when week 0 starts on `start`.
    pub fn for_week(start: &NaiveDate, index: usize) -> anyhow::Result<Self> {
        let (first, last) = csr_utils::dates::week_bounds(start, index)?;
        Ok(WeekSpan { first, last })
    }
}

impl fmt::Display for WeekSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use csr_utils::dates::format_day_month;
        write!(
            f,
            "{} - {}",
            format_day_month(&self.first),
            format_day_month(&self.last)
        )
    }
}

/// Severity bands for a 0-9 risk score.
pub mod severity {
    use csr_core::MAX_RISK;
    use serde::Serialize;

    /// Upper bound (inclusive) of the normal band.
    pub const NORMAL_MAX: u32 = 3;
    /// Upper bound (inclusive) of the warning band.
    pub const WARNING_MAX: u32 = 6;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Severity {
        Normal,
        Warning,
        Alert,
    }

    impl Severity {
        pub fn from_risk(risk: u32) -> Self {
            if risk > WARNING_MAX {
                Severity::Alert
            } else if risk > NORMAL_MAX {
                Severity::Warning
            } else {
                Severity::Normal
            }
        }

        /// Banner shown above a gauge, if any.
        pub const fn caption(self) -> Option<&'static str> {
            match self {
                Severity::Normal => None,
                Severity::Warning => Some("Stress warning!"),
                Severity::Alert => Some("Stress alert!"),
            }
        }

        pub const fn as_str(self) -> &'static str {
            match self {
                Severity::Normal => "normal",
                Severity::Warning => "warning",
                Severity::Alert => "alert",
            }
        }
    }

    /// Fill of a gauge dial, 0 to 100.
    pub fn gauge_percent(risk: u32) -> f64 {
        f64::from(risk) / f64::from(MAX_RISK) * 100.0
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_severity_bands() {
            let bands: Vec<Severity> = (0..=9).map(Severity::from_risk).collect();
            assert_eq!(&bands[..4], &[Severity::Normal; 4]);
            assert_eq!(&bands[4..7], &[Severity::Warning; 3]);
            assert_eq!(&bands[7..], &[Severity::Alert; 3]);
        }

        #[test]
        fn test_gauge_percent() {
            assert_eq!(gauge_percent(0), 0.0);
            assert_eq!(gauge_percent(9), 100.0);
            assert!((gauge_percent(3) - 33.333).abs() < 0.01);
        }
    }
}

/// One dial per forecast week.
pub mod gauges {
    use super::{severity::Severity, WeekSpan};
    use chrono::NaiveDate;
    use csr_core::{StressType, WeeklyRisk};
    use serde::Serialize;

    /// Gauges per dashboard row; twelve weeks fill three rows.
    pub const GAUGES_PER_ROW: usize = 4;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct GaugeReading {
        pub week_index: usize,
        pub span: WeekSpan,
        pub risk: u32,
        pub percent: f64,
        pub severity: Severity,
        pub labels: Vec<StressType>,
    }

    impl GaugeReading {
        /// Dial text, e.g. "5 / 9".
        pub fn dial_text(&self) -> String {
            format!("{} / {}", self.risk, csr_core::MAX_RISK)
        }
    }

    pub fn gauge_readings(
        weeks: &[WeeklyRisk],
        start: &NaiveDate,
    ) -> anyhow::Result<Vec<GaugeReading>> {
        weeks
            .iter()
            .enumerate()
            .map(|(week_index, week)| {
                Ok(GaugeReading {
                    week_index,
                    span: WeekSpan::for_week(start, week_index)?,
                    risk: week.value,
                    percent: super::severity::gauge_percent(week.value),
                    severity: Severity::from_risk(week.value),
                    labels: week.labels.clone(),
                })
            })
            .collect()
    }

    pub fn gauge_rows(readings: &[GaugeReading]) -> Vec<&[GaugeReading]> {
        readings.chunks(GAUGES_PER_ROW).collect()
    }

}

/// Alert lists: which stress types put which weeks into a severity tier.
pub mod alerts {
    use super::WeekSpan;
    use chrono::NaiveDate;
    use csr_core::{stress_type::ALL_STRESS_TYPES, StressType, WeeklyRisk};
    use log::debug;
    use serde::Serialize;
    use std::ops::Range;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum AlertTier {
        Alert,
        Warning,
    }

    impl AlertTier {
        /// Tiers in the order the alert panel lists them.
        pub const ALL: [AlertTier; 2] = [AlertTier::Alert, AlertTier::Warning];

        /// Scores that fall into this tier.
        pub fn range(self) -> Range<u32> {
            match self {
                AlertTier::Alert => 6..10,
                AlertTier::Warning => 3..6,
            }
        }

        pub const fn title(self) -> &'static str {
            match self {
                AlertTier::Alert => "Stress Alerts",
                AlertTier::Warning => "Stress Warnings",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct AlertEntry {
        pub stress_type: StressType,
        pub spans: Vec<WeekSpan>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct AlertGroup {
        pub tier: AlertTier,
        pub entries: Vec<AlertEntry>,
    }

    impl AlertGroup {
        /// A group with entries is shown expanded.
        pub fn is_expanded(&self) -> bool {
            !self.entries.is_empty()
        }
    }

    pub fn alert_group(
        tier: AlertTier,
        weeks: &[WeeklyRisk],
        start: &NaiveDate,
    ) -> anyhow::Result<AlertGroup> {
        let range = tier.range();
        let mut entries = Vec::new();
        for stress_type in ALL_STRESS_TYPES {
            let spans = weeks
                .iter()
                .enumerate()
                .filter(|(_, week)| week.has_label(stress_type) && range.contains(&week.value))
                .map(|(index, _)| WeekSpan::for_week(start, index))
                .collect::<anyhow::Result<Vec<WeekSpan>>>()?;
            if !spans.is_empty() {
                entries.push(AlertEntry { stress_type, spans });
            }
        }
        debug!("{}: {} stress types affected", tier.title(), entries.len());
        Ok(AlertGroup { tier, entries })
    }

    pub fn alert_groups(
        weeks: &[WeeklyRisk],
        start: &NaiveDate,
    ) -> anyhow::Result<Vec<AlertGroup>> {
        AlertTier::ALL
            .iter()
            .map(|tier| alert_group(*tier, weeks, start))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use csr_core::StressType::{DiurnalHeat, Drought, Frost, NightimeHeat};

        fn risk(value: u32, labels: Vec<StressType>) -> WeeklyRisk {
            WeeklyRisk { value, labels }
        }

        #[test]
        fn test_alert_groups() {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let weeks = vec![
                risk(7, vec![Drought, Frost]),
                risk(3, vec![Frost]),
                risk(2, vec![DiurnalHeat]),
                risk(9, vec![Frost]),
                risk(6, vec![NightimeHeat]),
            ];
            let groups = alert_groups(&weeks, &start).unwrap();
            assert_eq!(groups.len(), 2);

            let alert = &groups[0];
            assert_eq!(alert.tier, AlertTier::Alert);
            let types: Vec<StressType> = alert.entries.iter().map(|e| e.stress_type).collect();
            assert_eq!(types, vec![Frost, NightimeHeat, Drought]);
            assert_eq!(alert.entries[0].spans.len(), 2);
            assert_eq!(alert.entries[0].spans[1].to_string(), "22/1 - 28/1");

            let warning = &groups[1];
            assert_eq!(warning.entries.len(), 1);
            assert_eq!(warning.entries[0].stress_type, Frost);
            assert_eq!(warning.entries[0].spans[0].to_string(), "8/1 - 14/1");
        }

        #[test]
        fn test_quiet_weeks_collapse_groups() {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let weeks = vec![risk(0, vec![]), risk(2, vec![Frost])];
            let groups = alert_groups(&weeks, &start).unwrap();
            assert!(groups.iter().all(|group| !group.is_expanded()));
        }
    }
}
