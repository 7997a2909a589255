//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "logslice.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Logslice configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: logslice --config {} validate-config", self.output);
                println!("  3. Generate the plan: logslice --config {} plan --output plan.json", self.output);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Sample configuration with every setting at its default
    pub fn sample_config() -> &'static str {
        r#"# Logslice Configuration File
# Time-sliced Teradata query log extraction planner

[application]
log_level = "info"

[export]
mode = "standard"  # standard | assessment

# Trailing window, used when query_log_start is not set
query_log_days = 7
# query_log_start = "2024-01-01T00:00:00Z"
# query_log_end = "2024-01-08T00:00:00Z"

# hourly | daily | <n>m | <n>h | <n>d
rotation = "daily"

# Passed verbatim into "L.StartTime >= ..."
# query_log_earliest_timestamp = "TIMESTAMP '2024-01-03 00:00:00'"

# Replacement [log table, detail table]
# query_log_alternates = ["dbc.DBQLogTbl", "dbc.DBQLSqlTbl"]

# output = "plan.json"

[properties]
utility_logs_table = "dbc.DBQLUtilityTbl"
res_usage_scpu_table = "dbc.ResUsageScpu"
res_usage_spma_table = "dbc.ResUsageSpma"
# log_date_column = "LogDate"
# Allowed range: [5000..31000]
# max_sql_length = 10000

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
    }
}
