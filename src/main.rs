use anyhow::{Context, Result};
use pace_mcp::formatters::{
    self, is_duration_draft, normalize_duration, DurationEntry, PaceOptions, PaceSentinel,
    SecondsRounding,
};
use pace_mcp::logging::{init_logging, Verbosity};
use pace_mcp::{FormatterConfig, RunEntry, RunTotals};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::{debug, error, info};

#[derive(Clone)]
struct PaceMcpServer {
    config: FormatterConfig,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PaceMcpServer {
    fn new(config: FormatterConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Format total seconds as HH:MM:SS (or MM:SS under an hour)")]
    async fn encode_time(
        &self,
        params: Parameters<EncodeTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        debug!(seconds = params.seconds, "encode_time");

        let text = if params.strict.unwrap_or(false) {
            formatters::try_encode(params.seconds).map_err(McpError::invalid_params_no_data)?
        } else {
            formatters::encode(params.seconds)
        };

        Ok(text_result(text))
    }

    #[tool(description = "Parse SS, MM:SS or HH:MM:SS into total seconds and stored minutes")]
    async fn decode_time(
        &self,
        params: Parameters<DecodeTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        // Bound the input (prevent excessive parsing)
        if params.text.len() > MAX_TEXT_LEN {
            return Err(McpError::invalid_params_no_data(format!(
                "text cannot exceed {} characters (got {})",
                MAX_TEXT_LEN,
                params.text.len()
            )));
        }

        debug!(text = %params.text, "decode_time");
        Ok(text_result(render_decoded(&params.text)))
    }

    #[tool(description = "Compute pace in min/km from distance (km) and duration (minutes)")]
    async fn compute_pace(
        &self,
        params: Parameters<ComputePaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let options = PaceOptions {
            sentinel: params.sentinel.unwrap_or(self.config.pace_sentinel),
            seconds: params.seconds.unwrap_or(self.config.pace_seconds),
        };

        let pace =
            formatters::compute_pace_with(params.distance_km, params.duration_minutes, options);
        debug!(
            distance_km = params.distance_km,
            duration_minutes = params.duration_minutes,
            %pace,
            "compute_pace"
        );

        Ok(text_result(format!("{}/km", pace)))
    }

    #[tool(description = "Format a distance in km with exactly two decimals")]
    async fn format_distance(
        &self,
        params: Parameters<FormatDistanceParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let text = if params.strict.unwrap_or(false) {
            formatters::try_format_distance(params.value).map_err(McpError::invalid_params_no_data)?
        } else {
            formatters::format_distance(params.value)
        };

        Ok(text_result(format!("{} km", text)))
    }

    #[tool(description = "Round a number to the given number of decimals (default from config)")]
    async fn round_number(
        &self,
        params: Parameters<RoundNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let precision = params.precision.unwrap_or(self.config.round_precision);

        if !(0..=MAX_PRECISION).contains(&precision) {
            return Err(McpError::invalid_params_no_data(format!(
                "precision must be between 0 and {} (requested: {})",
                MAX_PRECISION, precision
            )));
        }

        let rounded = formatters::round_to(params.value, precision);
        Ok(text_result(rounded.to_string()))
    }

    #[tool(description = "Format a minute count as '2h 5min' or '45min'")]
    async fn format_minutes(
        &self,
        params: Parameters<FormatMinutesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        Ok(text_result(formatters::format_minutes_human(params.minutes)))
    }

    #[tool(description = "Clean up a duration typed into the run form")]
    async fn normalize_duration(
        &self,
        params: Parameters<NormalizeDurationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        if params.text.len() > MAX_TEXT_LEN {
            return Err(McpError::invalid_params_no_data(format!(
                "text cannot exceed {} characters (got {})",
                MAX_TEXT_LEN,
                params.text.len()
            )));
        }

        Ok(text_result(render_duration_entry(&params.text)))
    }

    #[tool(description = "Summarize a run: distance, duration, stored minutes, pace and date")]
    async fn summarize_run(
        &self,
        params: Parameters<RunEntry>,
    ) -> Result<CallToolResult, McpError> {
        let run = params.0;
        info!(distance_km = run.distance_km, duration = %run.duration, "summarize_run");
        Ok(text_result(render_summary(&run, &self.config)))
    }

    #[tool(description = "Totals over several runs: distance, time and average pace")]
    async fn summarize_runs(
        &self,
        params: Parameters<SummarizeRunsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        // Bound the batch size (prevent DoS)
        if params.runs.len() > MAX_RUNS {
            return Err(McpError::invalid_params_no_data(format!(
                "runs cannot exceed {} (got {})",
                MAX_RUNS,
                params.runs.len()
            )));
        }

        info!(runs = params.runs.len(), "summarize_runs");
        Ok(text_result(render_totals(&params.runs, &self.config)))
    }
}

#[tool_handler]
impl ServerHandler for PaceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Formatting tools for run tracking: elapsed time, pace per kilometer, distances and run summaries.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

const MAX_TEXT_LEN: usize = 64;
const MAX_PRECISION: i32 = 15;
const MAX_RUNS: usize = 500;

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn render_decoded(text: &str) -> String {
    let seconds = formatters::decode(text);
    let minutes = formatters::seconds_to_minutes(seconds as f64);

    let mut output = String::new();
    output.push_str(&format!("- **Seconds:** {}\n", seconds));
    output.push_str(&format!("- **Stored minutes:** {}\n", minutes));
    output.push_str(&format!(
        "- **Readable:** {}\n",
        formatters::format_minutes_human(minutes.max(0) as u64)
    ));
    output
}

fn render_duration_entry(text: &str) -> String {
    let entry = DurationEntry::from_input(text);

    let mut output = String::new();
    output.push_str(&format!("- **Masked:** {}\n", entry.text));
    output.push_str(&format!("- **Seconds:** {}\n", entry.seconds));
    output.push_str(&format!("- **Stored minutes:** {}\n", entry.minutes));
    output.push_str(&format!("- **Readable:** {}\n", entry.readable));

    match normalize_duration(text) {
        Some(normalized) => output.push_str(&format!(
            "- **As M:SS:** {} ({} s)\n",
            normalized.text, normalized.total_seconds
        )),
        None => output.push_str("- **As M:SS:** (empty)\n"),
    }

    if !is_duration_draft(text.trim()) {
        output.push_str("- **Warning:** not a valid M:SS entry\n");
    }

    output
}

fn render_summary(run: &RunEntry, config: &FormatterConfig) -> String {
    let summary = run.summarize(config);

    let mut output = String::from("# Run Summary\n\n");
    if let Some(date) = &summary.date {
        output.push_str(&format!("- **Date:** {}\n", date));
    }
    output.push_str(&format!("- **Distance:** {} km\n", summary.distance));
    output.push_str(&format!(
        "- **Duration:** {} ({})\n",
        summary.duration, summary.duration_readable
    ));
    output.push_str(&format!("- **Stored minutes:** {}\n", summary.duration_minutes));
    output.push_str(&format!("- **Pace:** {}/km\n", summary.pace));
    output
}

fn render_totals(runs: &[RunEntry], config: &FormatterConfig) -> String {
    let totals = RunTotals::from_runs(runs, config);

    let mut output = String::from("# Run Totals\n\n");
    output.push_str(&format!("- **Runs:** {}\n", totals.runs));
    output.push_str(&format!("- **Total Distance:** {} km\n", totals.total_distance));
    output.push_str(&format!(
        "- **Total Time:** {} min ({})\n",
        totals.total_minutes, totals.total_readable
    ));
    output.push_str(&format!("- **Average Pace:** {}/km\n", totals.average_pace));
    output
}

// Tool parameter structs
#[derive(Debug, Deserialize, JsonSchema)]
struct EncodeTimeParams {
    #[schemars(description = "Total elapsed seconds")]
    seconds: f64,
    #[schemars(description = "Reject negative or non-numeric input (default: false)")]
    strict: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DecodeTimeParams {
    #[schemars(description = "Time as SS, MM:SS or HH:MM:SS")]
    text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ComputePaceParams {
    #[schemars(description = "Distance in kilometers")]
    distance_km: f64,
    #[schemars(description = "Duration in minutes")]
    duration_minutes: f64,
    #[schemars(
        description = "Placeholder when pace is undefined: 'zero' (0:00) or 'dashes' (--:--)"
    )]
    sentinel: Option<PaceSentinel>,
    #[schemars(description = "Seconds rounding: 'truncate' or 'nearest'")]
    seconds: Option<SecondsRounding>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatDistanceParams {
    #[schemars(description = "Distance in kilometers")]
    value: f64,
    #[schemars(description = "Reject negative or non-numeric input (default: false)")]
    strict: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RoundNumberParams {
    #[schemars(description = "Value to round; missing rounds to 0")]
    value: Option<f64>,
    #[schemars(description = "Decimal places (default: ROUND_PRECISION, 1)")]
    precision: Option<i32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatMinutesParams {
    #[schemars(description = "Total minutes")]
    minutes: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SummarizeRunsParams {
    #[schemars(description = "Runs to total")]
    runs: Vec<RunEntry>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NormalizeDurationParams {
    #[schemars(description = "Duration text as typed by the user")]
    text: String,
}

// Helper methods for McpError
trait McpErrorExt {
    fn invalid_params_no_data<S: ToString>(message: S) -> Self;
}

impl McpErrorExt for McpError {
    fn invalid_params_no_data<S: ToString>(message: S) -> Self {
        McpError::invalid_params(message.to_string(), None)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_logging(Verbosity::from_env());

    let config = FormatterConfig::from_env()
        .context("Failed to load formatter configuration. Check PACE_SENTINEL, PACE_SECONDS and ROUND_PRECISION.")?;
    info!(?config, "Loaded formatter configuration");

    // Create MCP server
    let server = PaceMcpServer::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    info!("Starting pace MCP server...");
    let service = server.serve(transport).await.map_err(|e| {
        error!("Error starting server: {}", e);
        e
    })?;

    service.waiting().await?;

    Ok(())
}
