//! Conversions between elapsed seconds and clock-style text.

use super::parse_leading_int;
use crate::error::{Error, Result};

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Format total seconds as `HH:MM:SS`, or `MM:SS` when under an hour.
///
/// Each field is floored separately, so fractional input never rounds up
/// (59.9 gives `"00:59"`). The hours field is padded to two digits but
/// never truncated: 442_509 seconds is `"122:55:09"`. Hours are printed
/// from the float itself, so values past `u64::MAX` hours stay exact.
///
/// Negative and non-finite input is treated as zero. Use [`try_encode`]
/// to reject it instead.
pub fn encode(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds
    } else {
        0.0
    };

    let hours = (total / SECONDS_PER_HOUR).floor();
    let minutes = ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor() as u64;
    let seconds = (total % SECONDS_PER_MINUTE).floor() as u64;

    if hours > 0.0 {
        format!("{:02.0}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Like [`encode`], but fails on negative or non-finite input.
pub fn try_encode(total_seconds: f64) -> Result<String> {
    Error::check_non_negative("total_seconds", total_seconds).map(encode)
}

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into total seconds.
///
/// Each field is read like a lenient integer parse: leading digits count,
/// anything else in the field is ignored and a field without digits is 0.
/// Empty input and anything with more than three fields give 0.
pub fn decode(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    let fields: Vec<i64> = text
        .split(':')
        .map(|field| parse_leading_int(field).unwrap_or(0))
        .collect();

    match fields.as_slice() {
        [hours, minutes, seconds] => hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(*seconds),
        [minutes, seconds] => minutes.saturating_mul(60).saturating_add(*seconds),
        [seconds] => *seconds,
        _ => 0,
    }
}

/// Convert seconds to whole minutes for storage, rounding halves up.
pub fn seconds_to_minutes(seconds: f64) -> i64 {
    round_half_up(seconds / SECONDS_PER_MINUTE) as i64
}

/// Format a minute count as `"2h 5min"` or `"45min"`. No zero padding.
pub fn format_minutes_human(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}

// Ties go toward positive infinity (-1.5 becomes -1). NaN stays NaN.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        // Under an hour drops the hours field entirely
        assert_eq!(encode(65.0), "01:05");
        assert_eq!(encode(0.0), "00:00");
        assert_eq!(encode(3599.0), "59:59");

        // Hours present
        assert_eq!(encode(3600.0), "01:00:00");
        assert_eq!(encode(3665.0), "01:01:05");

        // Hours are not limited to two digits
        assert_eq!(encode(123.0 * 3600.0 + 5.0 * 60.0 + 9.0), "123:05:09");
    }

    #[test]
    fn test_encode_floors_fractions() {
        assert_eq!(encode(59.9), "00:59");
        assert_eq!(encode(3599.999), "59:59");
        assert_eq!(encode(90.5), "01:30");
    }

    #[test]
    fn test_encode_degenerate_input() {
        assert_eq!(encode(-5.0), "00:00");
        assert_eq!(encode(f64::NAN), "00:00");
        assert_eq!(encode(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_encode_huge_hours() {
        // Hours beyond u64 range are not clamped
        let text = encode(1e300);
        let hours = format!("{:.0}", (1e300_f64 / 3600.0).floor());
        assert!(text.starts_with(&format!("{}:", hours)));
        assert!(!text.starts_with("18446744073709551615"));
        assert_eq!(text.matches(':').count(), 2);

        // Just past the u64 limit
        let text = encode(2e19 * 3600.0);
        assert!(text.starts_with("20000000000000000000:"));
    }

    #[test]
    fn test_try_encode() {
        assert_eq!(try_encode(3665.0), Ok("01:01:05".to_string()));
        assert_eq!(
            try_encode(-1.0),
            Err(Error::InvalidArgument {
                name: "total_seconds",
                value: -1.0
            })
        );
        assert!(try_encode(f64::NAN).is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("90"), 90);
        assert_eq!(decode("1:30"), 90);
        assert_eq!(decode("1:01:30"), 3690);
        assert_eq!(decode("01:05"), 65);
        assert_eq!(decode("123:05:09"), 443_109);
    }

    #[test]
    fn test_decode_permissive() {
        // Empty and non-numeric fields
        assert_eq!(decode(""), 0);
        assert_eq!(decode("a:b"), 0);
        assert_eq!(decode("2:xx"), 120);
        assert_eq!(decode(":30"), 30);
        assert_eq!(decode("5:"), 300);

        // Trailing junk inside a field is ignored
        assert_eq!(decode("10min:15s"), 615);

        // Too many fields
        assert_eq!(decode("1:2:3:4"), 0);
    }

    #[test]
    fn test_round_trip_under_one_hour() {
        for s in 0..3600_i64 {
            let text = encode(s as f64);
            assert_eq!(text.len(), 5, "expected MM:SS for {}", s);
            assert_eq!(decode(&text), s);
        }
    }

    #[test]
    fn test_round_trip_with_hours() {
        let samples = (3600..500_000_i64)
            .step_by(997)
            .chain([3600, 86_399, 86_400, 359_999, 360_000, 442_509]);

        for s in samples {
            let text = encode(s as f64);
            assert_eq!(text.matches(':').count(), 2, "expected HH:MM:SS for {}", s);
            assert_eq!(decode(&text), s);
        }
    }

    #[test]
    fn test_seconds_to_minutes() {
        assert_eq!(seconds_to_minutes(90.0), 2);
        assert_eq!(seconds_to_minutes(89.0), 1);
        assert_eq!(seconds_to_minutes(29.0), 0);
        assert_eq!(seconds_to_minutes(30.0), 1);
        assert_eq!(seconds_to_minutes(3600.0), 60);

        // Halves round toward positive infinity
        assert_eq!(seconds_to_minutes(-90.0), -1);

        assert_eq!(seconds_to_minutes(f64::NAN), 0);
    }

    #[test]
    fn test_format_minutes_human() {
        assert_eq!(format_minutes_human(125), "2h 5min");
        assert_eq!(format_minutes_human(45), "45min");
        assert_eq!(format_minutes_human(0), "0min");
        assert_eq!(format_minutes_human(60), "1h 0min");
        assert_eq!(format_minutes_human(600), "10h 0min");
    }
}
