//! Display of stored run dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Render a stored run date as `DD/MM/YYYY`.
///
/// Accepts RFC 3339 timestamps (the date is taken in the timestamp's own
/// offset), zone-less `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD`.
/// Anything else comes back unchanged.
pub fn format_run_date(text: &str) -> String {
    let trimmed = text.trim();

    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format(DISPLAY_FORMAT).to_string(),
        Err(_) => text.to_string(),
    }
}
