//! Cleanup of duration and distance text typed into the run form.

use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::OnceLock;

use super::numeric::format_distance;
use super::time::{decode, format_minutes_human, seconds_to_minutes};
use super::{parse_leading_float, parse_leading_int};

/// Mask raw keystrokes into `SS`, `MM:SS` or `HH:MM:SS`.
///
/// Only digits are kept; the last two are seconds, the two before that
/// minutes and anything further left is hours. Past six digits only the
/// last eight characters of the result survive.
pub fn mask_duration_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len();

    let masked = if len <= 2 {
        format!("{:0>2}", digits)
    } else if len <= 4 {
        format!("{:0>2}:{}", &digits[..len - 2], &digits[len - 2..])
    } else {
        format!(
            "{:0>2}:{}:{}",
            &digits[..len - 4],
            &digits[len - 4..len - 2],
            &digits[len - 2..]
        )
    };

    if len > 6 {
        masked[masked.len() - 8..].to_string()
    } else {
        masked
    }
}

/// A masked duration together with the values derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DurationEntry {
    /// Masked text, e.g. `"01:30:00"`
    pub text: String,
    /// Total seconds parsed from `text`
    pub seconds: i64,
    /// Whole minutes, as stored
    pub minutes: i64,
    /// Human form of `minutes`, e.g. `"1h 30min"`
    pub readable: String,
}

impl DurationEntry {
    pub fn from_input(raw: &str) -> Self {
        let text = mask_duration_digits(raw);
        let seconds = decode(&text);
        let minutes = seconds_to_minutes(seconds as f64);
        let readable = format_minutes_human(minutes.max(0) as u64);

        Self {
            text,
            seconds,
            minutes,
            readable,
        }
    }
}

/// Result of [`normalize_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NormalizedDuration {
    /// `{minutes}:{seconds:02}`
    pub text: String,
    pub total_seconds: i64,
}

/// Normalize a finished `M:SS` entry.
///
/// Seconds of 60 or more carry into the minutes and a bare number is
/// taken as minutes. Blank input gives `None`.
pub fn normalize_duration(value: &str) -> Option<NormalizedDuration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (mut minutes, mut seconds) = if value.contains(':') {
        let mut fields = value.split(':');
        let minutes = fields.next().and_then(parse_leading_int).unwrap_or(0);
        let seconds = fields.next().and_then(parse_leading_int).unwrap_or(0);
        (minutes, seconds)
    } else {
        (parse_leading_int(value).unwrap_or(0), 0)
    };

    if seconds >= 60 {
        minutes = minutes.saturating_add(seconds / 60);
        seconds %= 60;
    }

    Some(NormalizedDuration {
        text: format!("{}:{:02}", minutes, seconds),
        total_seconds: minutes.saturating_mul(60).saturating_add(seconds),
    })
}

fn duration_draft_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+(:[0-9]{0,2})?$").expect("valid draft pattern"))
}

/// Whether `value` is an acceptable partially typed `M:SS` duration.
pub fn is_duration_draft(value: &str) -> bool {
    value.is_empty() || duration_draft_pattern().is_match(value)
}

fn distance_draft_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]*\.?[0-9]{0,2}$").expect("valid distance pattern"))
}

/// Whether `value` is an acceptable partially typed distance: digits with
/// at most one point and two decimals.
pub fn is_distance_draft(value: &str) -> bool {
    value.is_empty() || distance_draft_pattern().is_match(value)
}

/// Normalize a typed distance to two decimals ("5.5km" gives `"5.50"`).
pub fn normalize_distance(value: &str) -> Option<String> {
    parse_leading_float(value.trim()).map(format_distance)
}
