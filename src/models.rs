use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formatters::numeric::DEFAULT_ROUND_PRECISION;
use crate::formatters::{
    compute_pace_with, decode, encode, format_distance, format_minutes_human, format_run_date,
    round_to, seconds_to_minutes, PaceOptions, PaceSentinel, SecondsRounding,
};

/// A run as entered in the workout form
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunEntry {
    pub distance_km: f64,
    /// Elapsed time as typed: `SS`, `MM:SS` or `HH:MM:SS`
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Display and storage values derived from a [`RunEntry`]
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RunSummary {
    pub distance: String,
    pub distance_rounded: f64,
    pub duration: String,
    pub duration_seconds: i64,
    pub duration_minutes: i64,
    pub duration_readable: String,
    pub pace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RunEntry {
    /// Derive everything shown for this run
    pub fn summarize(&self, config: &FormatterConfig) -> RunSummary {
        let seconds = decode(&self.duration);
        let minutes = seconds_to_minutes(seconds as f64);

        RunSummary {
            distance: format_distance(self.distance_km),
            distance_rounded: round_to(Some(self.distance_km), config.round_precision),
            duration: encode(seconds as f64),
            duration_seconds: seconds,
            duration_minutes: minutes,
            duration_readable: format_minutes_human(minutes.max(0) as u64),
            pace: compute_pace_with(
                self.distance_km,
                seconds as f64 / 60.0,
                config.pace_options(),
            ),
            date: self.date.as_deref().map(format_run_date),
        }
    }
}

/// Aggregate statistics over several runs
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RunTotals {
    pub runs: usize,
    /// Summed kilometers, rounded to the configured precision
    pub total_distance: f64,
    pub total_seconds: i64,
    pub total_minutes: i64,
    pub total_readable: String,
    /// Pace over the whole distance and time
    pub average_pace: String,
}

impl RunTotals {
    /// Sum distance and time over `runs`; unusable distances count as 0
    pub fn from_runs(runs: &[RunEntry], config: &FormatterConfig) -> Self {
        let total_distance: f64 = runs
            .iter()
            .map(|run| run.distance_km)
            .filter(|km| km.is_finite())
            .sum();
        let total_seconds = runs
            .iter()
            .map(|run| decode(&run.duration))
            .fold(0_i64, i64::saturating_add);
        let total_minutes = seconds_to_minutes(total_seconds as f64);

        Self {
            runs: runs.len(),
            total_distance: round_to(Some(total_distance), config.round_precision),
            total_seconds,
            total_minutes,
            total_readable: format_minutes_human(total_minutes.max(0) as u64),
            average_pace: compute_pace_with(
                total_distance,
                total_seconds as f64 / 60.0,
                config.pace_options(),
            ),
        }
    }
}

/// Formatter settings from environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterConfig {
    pub pace_sentinel: PaceSentinel,
    pub pace_seconds: SecondsRounding,
    pub round_precision: i32,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            pace_sentinel: PaceSentinel::default(),
            pace_seconds: SecondsRounding::default(),
            round_precision: DEFAULT_ROUND_PRECISION,
        }
    }
}

impl FormatterConfig {
    /// Load formatter config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load formatter config through `lookup`; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("PACE_SENTINEL") {
            config.pace_sentinel =
                PaceSentinel::from_name(&value).ok_or_else(|| Error::InvalidConfig {
                    key: "PACE_SENTINEL",
                    value: value.clone(),
                    expected: "zero, dashes",
                })?;
        }

        if let Some(value) = lookup("PACE_SECONDS") {
            config.pace_seconds =
                SecondsRounding::from_name(&value).ok_or_else(|| Error::InvalidConfig {
                    key: "PACE_SECONDS",
                    value: value.clone(),
                    expected: "truncate, nearest",
                })?;
        }

        if let Some(value) = lookup("ROUND_PRECISION") {
            config.round_precision = value
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|precision| (0..=15).contains(precision))
                .ok_or_else(|| Error::InvalidConfig {
                    key: "ROUND_PRECISION",
                    value: value.clone(),
                    expected: "an integer from 0 to 15",
                })?;
        }

        Ok(config)
    }

    pub fn pace_options(&self) -> PaceOptions {
        PaceOptions {
            sentinel: self.pace_sentinel,
            seconds: self.pace_seconds,
        }
    }
}
