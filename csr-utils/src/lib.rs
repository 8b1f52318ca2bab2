//! Shared utility functions for crop stress risk crates.

/// Date utility functions
pub mod dates {
    use anyhow::anyhow;
    use chrono::{Datelike, Days, Local, NaiveDate};

    /// Days covered by one forecast week.
    pub const DAYS_PER_WEEK: u64 = 7;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Format a NaiveDate as "D/M", the way the dashboard labels weeks.
    pub fn format_day_month(date: &NaiveDate) -> String {
        format!("{}/{}", date.day(), date.month())
    }

    /// Today's date in the local timezone.
    pub fn today() -> NaiveDate {
        Local::now().naive_local().date()
    }

    /// First and last day of forecast week `index`, counting from `start`.
    ///
    /// Week 0 starts on `start`; each week spans seven days inclusive. Fails
    /// when the week runs past the last representable date.
    pub fn week_bounds(start: &NaiveDate, index: usize) -> anyhow::Result<(NaiveDate, NaiveDate)> {
        let out_of_range = || anyhow!("week {} from {} is out of the calendar range", index, start);
        let offset = (index as u64)
            .checked_mul(DAYS_PER_WEEK)
            .ok_or_else(out_of_range)?;
        let first = start
            .checked_add_days(Days::new(offset))
            .ok_or_else(out_of_range)?;
        let last = first
            .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
            .ok_or_else(out_of_range)?;
        Ok((first, last))
    }

}
