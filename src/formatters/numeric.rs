//! Fixed-precision number display.

use crate::error::{Error, Result};

/// Precision used by [`round_to`] when the caller has no preference.
pub const DEFAULT_ROUND_PRECISION: i32 = 1;

/// Render `value` with exactly `digits` decimals.
///
/// Rounding works on the exact binary value of the double, and only a
/// value sitting exactly halfway (0.125 at two digits) rounds away from
/// zero. So 0.125 gives `"0.13"` while 5.005, stored as
/// 5.00499999..., gives `"5.00"`.
///
/// Non-finite input renders as `"NaN"`, `"Infinity"` or `"-Infinity"`.
/// Magnitudes of 1e21 and above are still written out in full digits
/// (`"1000000000000000000000.00"`), never in exponent form.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Drop the sign of negative zero
    let value = if value == 0.0 { 0.0 } else { value };

    if digits <= 22 {
        let factor = 10f64.powi(digits as i32);
        let scaled = value * factor;
        // A tie is only real when the product was computed without rounding
        let exact = value.mul_add(factor, -scaled) == 0.0;
        if exact && (scaled - scaled.trunc()).abs() == 0.5 {
            return format!("{:.*}", digits, scaled.round() / factor);
        }
    }

    format!("{:.*}", digits, value)
}

/// Format a distance in kilometers with two decimal places.
///
/// There is no validation: negative values keep their sign and NaN
/// renders as `"NaN"`. Use [`try_format_distance`] to reject those.
pub fn format_distance(km: f64) -> String {
    to_fixed(km, 2)
}

/// Like [`format_distance`], but fails on negative or non-finite input.
pub fn try_format_distance(km: f64) -> Result<String> {
    Error::check_non_negative("distance_km", km).map(format_distance)
}

/// Round to `precision` decimal places, halves away from zero.
///
/// The half is judged on `value * 10^precision` after that product has
/// been rounded to a double, unlike [`to_fixed`] which looks at the exact
/// input. So `round_to(Some(2.675), 2)` is 2.68 while
/// `format_distance(2.675)` is `"2.67"`. A missing value rounds to 0.
pub fn round_to(value: Option<f64>, precision: i32) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };

    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        // 5 km
        assert_eq!(format_distance(5.0), "5.00");

        // 10.5 km
        assert_eq!(format_distance(10.5), "10.50");

        // Less than 1 km
        assert_eq!(format_distance(0.75), "0.75");

        // Zero
        assert_eq!(format_distance(0.0), "0.00");
        assert_eq!(format_distance(-0.0), "0.00");

        // Marathon
        assert_eq!(format_distance(42.195), "42.20");
    }

    #[test]
    fn test_format_distance_boundaries() {
        // 5.005 is stored slightly below the midpoint
        assert_eq!(format_distance(5.005), "5.00");
        assert_eq!(format_distance(1.005), "1.00");
        assert_eq!(format_distance(2.675), "2.67");

        // Exactly representable midpoints round away from zero
        assert_eq!(format_distance(0.125), "0.13");
        assert_eq!(format_distance(0.375), "0.38");
        assert_eq!(format_distance(10.625), "10.63");
        assert_eq!(format_distance(-0.125), "-0.13");
    }

    #[test]
    fn test_format_distance_unvalidated() {
        assert_eq!(format_distance(-3.0), "-3.00");
        assert_eq!(format_distance(f64::NAN), "NaN");
        assert_eq!(format_distance(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_try_format_distance() {
        assert_eq!(try_format_distance(5.0), Ok("5.00".to_string()));
        assert_eq!(
            try_format_distance(-3.0),
            Err(Error::InvalidArgument {
                name: "distance_km",
                value: -3.0
            })
        );
        assert!(try_format_distance(f64::NAN).is_err());
    }

    #[test]
    fn test_to_fixed_other_precisions() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(3.14159, 3), "3.142");
    }

    #[test]
    fn test_to_fixed_large_values() {
        assert_eq!(to_fixed(1e21, 2), "1000000000000000000000.00");
        assert_eq!(to_fixed(-1e21, 0), "-1000000000000000000000");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(Some(3.14159), 2), 3.14);
        assert_eq!(round_to(Some(3.14159), DEFAULT_ROUND_PRECISION), 3.1);
        assert_eq!(round_to(Some(2.5), 0), 3.0);
        assert_eq!(round_to(Some(-2.5), 0), -3.0);

        // Missing input
        assert_eq!(round_to(None, 2), 0.0);
    }

    #[test]
    fn test_round_to_boundaries() {
        // 1.005 * 100 lands just below 100.5
        assert_eq!(round_to(Some(1.005), 2), 1.0);

        // Exact midpoint
        assert_eq!(round_to(Some(0.125), 2), 0.13);

        // The products land exactly on .5 and round up
        assert_eq!(round_to(Some(2.675), 2), 2.68);
        assert_eq!(round_to(Some(5.005), 2), 5.01);

        // Fixed formatting looks at the stored value instead
        assert_eq!(format_distance(2.675), "2.67");
        assert_eq!(format_distance(5.005), "5.00");

        // Default precision
        assert_eq!(round_to(Some(8.35), DEFAULT_ROUND_PRECISION), 8.4);
    }
}
