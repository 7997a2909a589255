//! Plan command implementation
//!
//! This module implements the `plan` command, which generates the extraction
//! plan and prints a summary, the task list as JSON, or writes a manifest file.

use crate::config::{load_config_or_default, LogsliceConfig};
use crate::core::plan::{ExtractionPlan, ExtractionPlanGenerator, ExtractionTask, PlanSummary};
use crate::domain::Mode;
use crate::log_config_error;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

/// Arguments for the plan command
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Generate the assessment task set (query logs, resource usage, utility logs)
    #[arg(long)]
    pub assessment: bool,

    /// Trailing days to export when no start is given
    #[arg(long)]
    pub query_log_days: Option<u32>,

    /// Explicit window start (RFC 3339)
    #[arg(long)]
    pub query_log_start: Option<DateTime<Utc>>,

    /// Explicit window end, exclusive (RFC 3339)
    #[arg(long)]
    pub query_log_end: Option<DateTime<Utc>>,

    /// Slice width: hourly, daily, or <n>m / <n>h / <n>d
    #[arg(long)]
    pub rotation: Option<String>,

    /// Earliest query start time, passed verbatim into the filter
    #[arg(long)]
    pub query_log_earliest_timestamp: Option<String>,

    /// Alternate query log tables as LOG_TABLE,DETAIL_TABLE
    #[arg(long, value_delimiter = ',')]
    pub query_log_alternates: Option<Vec<String>>,

    /// Connector property definition, e.g. teradata-logs.max-sql-length=10000
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Write a JSON manifest of the plan to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print every task as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// JSON manifest handed to the execution engine
#[derive(Debug, Serialize)]
pub struct PlanManifest<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: PlanSummary,
    pub tasks: &'a [ExtractionTask],
}

impl<'a> PlanManifest<'a> {
    pub fn new(plan: &'a ExtractionPlan, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            summary: plan.summary(),
            tasks: plan.tasks(),
        }
    }
}

impl PlanArgs {
    /// Applies command-line overrides on top of the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed or unknown `-D` definition.
    pub fn apply_overrides(&self, config: &mut LogsliceConfig) -> Result<(), String> {
        if self.assessment {
            tracing::info!("Enabling assessment mode from CLI");
            config.export.mode = Mode::Assessment;
        }
        if let Some(days) = self.query_log_days {
            config.export.query_log_days = days;
        }
        if let Some(start) = self.query_log_start {
            config.export.query_log_start = Some(start);
        }
        if let Some(end) = self.query_log_end {
            config.export.query_log_end = Some(end);
        }
        if let Some(rotation) = &self.rotation {
            config.export.rotation = rotation.clone();
        }
        if let Some(earliest) = &self.query_log_earliest_timestamp {
            config.export.query_log_earliest_timestamp = Some(earliest.clone());
        }
        if let Some(alternates) = &self.query_log_alternates {
            tracing::info!(alternates = ?alternates, "Overriding query log tables from CLI");
            config.export.query_log_alternates = Some(alternates.clone());
        }
        if let Some(output) = &self.output {
            config.export.output = Some(output.clone());
        }
        for define in &self.defines {
            let (key, value) = define
                .split_once('=')
                .ok_or_else(|| format!("Invalid definition '{define}'. Expected KEY=VALUE"))?;
            config.properties.define(key.trim(), value)?;
        }
        config.validate()
    }

    /// Execute the plan command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting plan command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                log_config_error!(&e, "plan");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            log_config_error!(&e, "plan");
            eprintln!("❌ Configuration error: {e}");
            return Ok(2);
        }

        let plan_config = match config.to_plan_config() {
            Ok(plan_config) => plan_config,
            Err(e) => {
                log_config_error!(&e, "plan");
                eprintln!("❌ Configuration error: {e}");
                return Ok(2);
            }
        };

        let generated_at = Utc::now();
        let plan = match ExtractionPlanGenerator::new(plan_config).generate_at(generated_at) {
            Ok(plan) => plan,
            Err(e) if e.is_configuration() => {
                log_config_error!(&e, "plan");
                eprintln!("❌ {e}");
                return Ok(2);
            }
            Err(e) => return Err(e.into()),
        };

        let summary = plan.summary();
        if self.json {
            println!("{}", serde_json::to_string_pretty(plan.tasks())?);
        } else {
            print_summary(&summary);
        }

        if let Some(path) = &config.export.output {
            let manifest = PlanManifest::new(&plan, generated_at);
            let bytes = serde_json::to_vec_pretty(&manifest)?;
            tokio::fs::write(path, bytes).await?;
            tracing::info!(path = %path, tasks = plan.len(), "Plan manifest written");
            eprintln!("✅ Plan manifest written to {path}");
        }

        Ok(0)
    }
}

/// Prints a human-readable plan summary
pub fn print_summary(summary: &PlanSummary) {
    println!("📋 Extraction plan ({} mode)", summary.mode);
    println!("  Requested range: {}", summary.requested_range);
    println!("  Planned range:   {}", summary.planned_range);
    if summary.was_expanded() {
        println!("  ⚠️  Range widened to slice boundaries; edge slices may be partly empty");
    }
    println!("  Rotation:        {}", summary.rotation);
    println!("  Intervals:       {}", summary.intervals);
    println!("  Tasks:           {}", summary.total_tasks);
    println!("    query logs:    {}", summary.query_log_tasks);
    println!("    time series:   {}", summary.time_series_tasks);
    println!("    utility logs:  {}", summary.utility_log_tasks);
    if let (Some(first), Some(last)) = (&summary.first_output, &summary.last_output) {
        println!("  First output:    {first}");
        println!("  Last output:     {last}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_sets_mode_and_properties() {
        let args = PlanArgs {
            assessment: true,
            rotation: Some("hourly".to_string()),
            defines: vec!["teradata-logs.max-sql-length=12000".to_string()],
            ..PlanArgs::default()
        };
        let mut config = LogsliceConfig::default();
        args.apply_overrides(&mut config).unwrap();
        assert_eq!(config.export.mode, Mode::Assessment);
        assert_eq!(config.export.rotation, "hourly");
        assert_eq!(config.properties.max_sql_length.as_deref(), Some("12000"));
    }

    #[test]
    fn test_apply_overrides_rejects_malformed_define() {
        let args = PlanArgs {
            defines: vec!["teradata-logs.max-sql-length".to_string()],
            ..PlanArgs::default()
        };
        let mut config = LogsliceConfig::default();
        let err = args.apply_overrides(&mut config).unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn test_apply_overrides_rejects_bad_rotation() {
        let args = PlanArgs {
            rotation: Some("weekly".to_string()),
            ..PlanArgs::default()
        };
        let mut config = LogsliceConfig::default();
        assert!(args.apply_overrides(&mut config).is_err());
    }
}
