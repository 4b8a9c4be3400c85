use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};

/// Date layout used in reports, e.g. `14.06.2024`.
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Time layout used in reports, e.g. `08:30`.
pub const REPORT_TIME_FORMAT: &str = "%H:%M";

/// Date layout accepted on the command line, e.g. `2024-06-14`.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date for a report
pub fn format_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

/// Format a time of day for a report
pub fn format_time(time: NaiveTime) -> String {
    time.format(REPORT_TIME_FORMAT).to_string()
}

/// Parse dates like "2024-06-14"
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, INPUT_DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}
