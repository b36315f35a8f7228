//! Logging setup for the pace-mcp server.
//!
//! Stdout carries the MCP transport, so every log line goes to stderr.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
}

impl Verbosity {
    #[must_use]
    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
        }
    }

    /// Read `PACE_MCP_LOG` (`quiet`, `normal`, `verbose`); anything else is normal.
    pub fn from_env() -> Self {
        match std::env::var("PACE_MCP_LOG").as_deref() {
            Ok("quiet") => Self::Quiet,
            Ok("verbose") => Self::Verbose,
            _ => Self::Normal,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("pace_mcp={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true),
    );

    // Already installed is fine
    let _ = subscriber.try_init();
}
