//! # pace-mcp
//!
//! Formatting for run tracking: elapsed time as `HH:MM:SS` / `MM:SS`,
//! pace per kilometer, distances with two decimals, plus cleanup of what
//! users type into a run form. The `pace-mcp` binary serves the same
//! functions as MCP tools over stdio.

pub mod error;
pub mod formatters;
pub mod logging;
pub mod models;

pub use error::{Error, Result};
pub use models::{FormatterConfig, RunEntry, RunSummary, RunTotals};
