//! Pace (minutes per kilometer) derived from distance and time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a pace cannot be computed.
///
/// The web dashboard shows `"0:00"` and the mobile workout form shows
/// `"--:--"`. Callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaceSentinel {
    /// `"0:00"`
    #[default]
    Zero,
    /// `"--:--"`
    Dashes,
}

impl PaceSentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0:00",
            Self::Dashes => "--:--",
        }
    }

    /// Look up a sentinel by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "zero" => Some(Self::Zero),
            "dashes" => Some(Self::Dashes),
            _ => None,
        }
    }
}

/// How the seconds part of a pace is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SecondsRounding {
    /// Floor the seconds per kilometer.
    #[default]
    Truncate,
    /// Round the fractional minute to the nearest second, carrying 60 into
    /// the next minute.
    Nearest,
}

impl SecondsRounding {
    /// Look up a rounding mode by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "truncate" => Some(Self::Truncate),
            "nearest" => Some(Self::Nearest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaceOptions {
    pub sentinel: PaceSentinel,
    pub seconds: SecondsRounding,
}

/// Pace for `distance_km` covered in `duration_minutes`, as `M:SS`.
///
/// Zero, negative or NaN input on either side yields the sentinel.
pub fn compute_pace(distance_km: f64, duration_minutes: f64, sentinel: PaceSentinel) -> String {
    compute_pace_with(
        distance_km,
        duration_minutes,
        PaceOptions {
            sentinel,
            seconds: SecondsRounding::Truncate,
        },
    )
}

/// [`compute_pace`] with an explicit seconds rounding mode.
pub fn compute_pace_with(distance_km: f64, duration_minutes: f64, options: PaceOptions) -> String {
    if !is_positive(distance_km) || !is_positive(duration_minutes) {
        return options.sentinel.as_str().to_string();
    }

    let (minutes, seconds) = match options.seconds {
        SecondsRounding::Truncate => {
            let pace_seconds = (duration_minutes * 60.0) / distance_km;
            if !pace_seconds.is_finite() {
                return options.sentinel.as_str().to_string();
            }
            (
                (pace_seconds / 60.0).floor() as u64,
                (pace_seconds % 60.0).floor() as u64,
            )
        }
        SecondsRounding::Nearest => {
            let pace_minutes = duration_minutes / distance_km;
            if !pace_minutes.is_finite() {
                return options.sentinel.as_str().to_string();
            }
            let whole = pace_minutes.floor();
            let seconds = ((pace_minutes - whole) * 60.0).round() as u64;
            if seconds >= 60 {
                (whole as u64 + 1, 0)
            } else {
                (whole as u64, seconds)
            }
        }
    };

    format!("{}:{:02}", minutes, seconds)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
