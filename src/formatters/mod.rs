//! Duration, pace and distance formatting.
//!
//! Everything in here is a pure function of its arguments. Degenerate
//! input (zero, negative, NaN, malformed text) maps to a defined
//! placeholder instead of an error; the `try_*` variants are the only
//! exceptions and exist for callers that want to reject bad values.

pub mod date;
pub mod entry;
pub mod numeric;
pub mod pace;
pub mod time;

use regex::Regex;
use std::sync::OnceLock;

pub use date::format_run_date;
pub use entry::{
    is_distance_draft, is_duration_draft, mask_duration_digits, normalize_distance,
    normalize_duration, DurationEntry, NormalizedDuration,
};
pub use numeric::{format_distance, round_to, to_fixed, try_format_distance};
pub use pace::{compute_pace, compute_pace_with, PaceOptions, PaceSentinel, SecondsRounding};
pub use time::{decode, encode, format_minutes_human, seconds_to_minutes, try_encode};

fn leading_int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid integer pattern"))
}

fn leading_float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("valid decimal pattern")
    })
}

/// Parse the integer prefix of `text`, ignoring whatever follows it.
///
/// Returns `None` when there are no leading digits. Values too large for
/// an `i64` saturate.
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let digits = leading_int_pattern().captures(text)?.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Parse the decimal prefix of `text` ("5.5km" gives 5.5).
pub(crate) fn parse_leading_float(text: &str) -> Option<f64> {
    let number = leading_float_pattern().captures(text)?.get(1)?.as_str();
    number.parse::<f64>().ok()
}
