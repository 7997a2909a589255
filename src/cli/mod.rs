//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Logslice using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Logslice - time-sliced query log extraction planner
#[derive(Parser, Debug)]
#[command(name = "logslice")]
#[command(version, about, long_about = None)]
#[command(author = "Logslice Contributors")]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "LOGSLICE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGSLICE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the extraction plan and print or write it
    Plan(commands::plan::PlanArgs),

    /// Validate configuration file and plan settings
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_plan_defaults() {
        let cli = Cli::parse_from(["logslice", "plan"]);
        assert!(cli.config.is_none());
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        assert!(!args.assessment);
        assert!(args.query_log_alternates.is_none());
    }

    #[test]
    fn test_cli_parse_plan_overrides() {
        let cli = Cli::parse_from([
            "logslice",
            "--config",
            "custom.toml",
            "plan",
            "--assessment",
            "--query-log-days",
            "3",
            "--query-log-alternates",
            "alt.log,alt.detail",
            "-D",
            "teradata-logs.max-sql-length=10000",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        assert!(args.assessment);
        assert_eq!(args.query_log_days, Some(3));
        assert_eq!(
            args.query_log_alternates,
            Some(vec!["alt.log".to_string(), "alt.detail".to_string()])
        );
        assert_eq!(args.defines, vec!["teradata-logs.max-sql-length=10000"]);
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["logslice", "--log-level", "debug", "plan"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["logslice", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["logslice", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
