//! Configuration management for Logslice.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Logslice uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `LOGSLICE_<SECTION>_<KEY>` environment overrides
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use logslice::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("logslice.toml")?;
//!
//! println!("Mode: {}", config.export.mode);
//! println!("Rotation: {}", config.export.rotation);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Export window, mode, rotation, table overrides
//! - [`PropertiesConfig`] - `teradata-logs.*` connector properties
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! mode = "assessment"
//! query_log_days = 7
//! rotation = "daily"
//! query_log_alternates = ["${LOGSLICE_LOG_TABLE}", "dbc.DBQLSqlTbl"]
//!
//! [properties]
//! max_sql_length = 10000
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, LogsliceConfig, PropertiesConfig};
