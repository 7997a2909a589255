//! Configuration schema types
//!
//! This module defines the configuration structure for Logslice.

use crate::core::plan::properties::{
    LOG_DATE_COLUMN, MAX_SQL_LENGTH, RES_USAGE_SCPU_TABLE, RES_USAGE_SPMA_TABLE,
    UTILITY_LOGS_TABLE,
};
use crate::core::plan::{PlanConfig, ResourceMetric};
use crate::core::plan::generator::DEF_UTILITY_LOGS_TABLE;
use crate::domain::errors::PlanError;
use crate::domain::mode::Mode;
use crate::domain::time::{ExportWindow, RotationDuration, DEFAULT_QUERY_LOG_DAYS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Main Logslice configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsliceConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export window, mode, and query log settings
    #[serde(default)]
    pub export: ExportConfig,

    /// `teradata-logs.*` connector properties
    #[serde(default)]
    pub properties: PropertiesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LogsliceConfig {
    /// Validates the configuration
    ///
    /// Table overrides and numeric properties are checked later, when the plan
    /// is generated.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the plan generator input
    ///
    /// # Errors
    ///
    /// Fails if the rotation frequency cannot be parsed.
    pub fn to_plan_config(&self) -> Result<PlanConfig, PlanError> {
        let export = &self.export;
        let props = &self.properties;
        Ok(PlanConfig {
            mode: export.mode,
            window: ExportWindow {
                days: export.query_log_days,
                start: export.query_log_start,
                end: export.query_log_end,
            },
            rotation: RotationDuration::from_str(&export.rotation)?,
            query_log_alternates: export.query_log_alternates.clone(),
            earliest_timestamp: export.query_log_earliest_timestamp.clone(),
            utility_logs_table: props
                .utility_logs_table
                .clone()
                .unwrap_or_else(|| DEF_UTILITY_LOGS_TABLE.to_string()),
            resource_metrics: vec![
                ResourceMetric::scpu(props.res_usage_scpu_table.as_deref()),
                ResourceMetric::spma(props.res_usage_spma_table.as_deref()),
            ],
            log_date_column: props.log_date_column.clone(),
            max_sql_length: props.max_sql_length.clone(),
        })
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Operating mode (standard or assessment)
    #[serde(default)]
    pub mode: Mode,

    /// Trailing days exported when no explicit start is set
    #[serde(default = "default_query_log_days")]
    pub query_log_days: u32,

    /// Explicit window start (RFC 3339)
    #[serde(default)]
    pub query_log_start: Option<DateTime<Utc>>,

    /// Explicit window end, exclusive (RFC 3339); defaults to now
    #[serde(default)]
    pub query_log_end: Option<DateTime<Utc>>,

    /// Slice width: hourly, daily, or <n>m / <n>h / <n>d
    #[serde(default = "default_rotation")]
    pub rotation: String,

    /// Server-side expression compared against the query start time, passed through verbatim
    #[serde(default)]
    pub query_log_earliest_timestamp: Option<String>,

    /// Replacement `[log table, detail table]` pair
    #[serde(default)]
    pub query_log_alternates: Option<Vec<String>>,

    /// Path of the JSON plan manifest written by `plan`
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            query_log_days: default_query_log_days(),
            query_log_start: None,
            query_log_end: None,
            rotation: default_rotation(),
            query_log_earliest_timestamp: None,
            query_log_alternates: None,
            output: None,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.query_log_start.is_none() && self.query_log_days == 0 {
            return Err("export.query_log_days must be >= 1".to_string());
        }
        RotationDuration::from_str(&self.rotation)
            .map_err(|e| format!("export.rotation: {e}"))?;
        if let (Some(start), Some(end)) = (self.query_log_start, self.query_log_end) {
            if start >= end {
                return Err(format!(
                    "export.query_log_start ({start}) must be before export.query_log_end ({end})"
                ));
            }
        }
        Ok(())
    }
}

/// Connector properties
///
/// Keys mirror the `teradata-logs.*` property names accepted by `-D` on the
/// command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertiesConfig {
    /// Table to dump utility logs from
    #[serde(default)]
    pub utility_logs_table: Option<String>,

    /// Table to dump CPU resource usage from
    #[serde(default)]
    pub res_usage_scpu_table: Option<String>,

    /// Table to dump memory resource usage from
    #[serde(default)]
    pub res_usage_spma_table: Option<String>,

    /// DATE column included in the WHERE clause of both query log tables
    #[serde(default)]
    pub log_date_column: Option<String>,

    /// Max length of `DBQLSqlTbl.SqlTextInfo`; longer text is split into rows
    #[serde(default, deserialize_with = "deserialize_raw_property")]
    pub max_sql_length: Option<String>,
}

impl PropertiesConfig {
    /// Applies a `teradata-logs.<name>=<value>` definition
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown property name.
    pub fn define(&mut self, name: &str, value: impl Into<String>) -> Result<(), String> {
        let value = Some(value.into());
        match name {
            UTILITY_LOGS_TABLE => self.utility_logs_table = value,
            RES_USAGE_SCPU_TABLE => self.res_usage_scpu_table = value,
            RES_USAGE_SPMA_TABLE => self.res_usage_spma_table = value,
            LOG_DATE_COLUMN => self.log_date_column = value,
            MAX_SQL_LENGTH => self.max_sql_length = value,
            other => {
                return Err(format!(
                    "Unknown property '{other}'. Must be one of: {}",
                    [
                        UTILITY_LOGS_TABLE,
                        RES_USAGE_SCPU_TABLE,
                        RES_USAGE_SPMA_TABLE,
                        LOG_DATE_COLUMN,
                        MAX_SQL_LENGTH
                    ]
                    .join(", ")
                ))
            }
        }
        Ok(())
    }
}

/// Accepts either a TOML string or a number and keeps its textual form
///
/// Floats keep their decimal point so integer validation rejects them.
fn deserialize_raw_property<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Integer(i) => i.to_string(),
        Raw::Float(f) => format!("{f:?}"),
        Raw::Text(s) => s,
    }))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_query_log_days() -> u32 {
    DEFAULT_QUERY_LOG_DAYS
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plan::ExtractionPlanGenerator;
    use crate::domain::errors::LogsliceError;
    use chrono::TimeZone;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: LogsliceConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.mode, Mode::Standard);
        assert_eq!(config.export.query_log_days, 7);
        assert_eq!(config.export.rotation, "daily");
        assert!(config.properties.max_sql_length.is_none());
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_sql_length_accepts_string_or_integer() {
        let from_int: LogsliceConfig = toml::from_str("[properties]\nmax_sql_length = 10000").unwrap();
        assert_eq!(from_int.properties.max_sql_length.as_deref(), Some("10000"));

        let from_str: LogsliceConfig =
            toml::from_str("[properties]\nmax_sql_length = \"12000\"").unwrap();
        assert_eq!(from_str.properties.max_sql_length.as_deref(), Some("12000"));
    }

    #[test]
    fn test_max_sql_length_float_is_not_coerced() {
        let config: LogsliceConfig =
            toml::from_str("[properties]\nmax_sql_length = 10000.0").unwrap();
        assert_eq!(config.properties.max_sql_length.as_deref(), Some("10000.0"));

        let plan_config = config.to_plan_config().unwrap();
        let err = ExtractionPlanGenerator::new(plan_config)
            .generate()
            .unwrap_err();
        match err {
            LogsliceError::Plan(PlanError::InvalidNumber { value, .. }) => {
                assert_eq!(value, "10000.0")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_to_plan_config_maps_properties() {
        let mut config = LogsliceConfig::default();
        config.export.mode = Mode::Assessment;
        config.export.query_log_start = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        config.export.rotation = "hourly".to_string();
        config.properties.res_usage_spma_table = Some("mon.Spma".to_string());
        config.properties.utility_logs_table = Some("mon.Utility".to_string());

        let plan = config.to_plan_config().unwrap();
        assert_eq!(plan.mode, Mode::Assessment);
        assert_eq!(plan.rotation, RotationDuration::hourly());
        assert_eq!(plan.utility_logs_table, "mon.Utility");
        assert_eq!(plan.resource_metrics[0].table, "dbc.ResUsageScpu");
        assert_eq!(plan.resource_metrics[1].table, "mon.Spma");
        assert_eq!(plan.resource_metrics[1].file_prefix, "dbc.ResUsageSpma_");
        assert!(plan.window.start.is_some());
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = LogsliceConfig::default();
        config.export.rotation = "fortnightly".to_string();
        assert!(config.validate().is_err());
        assert!(matches!(
            config.to_plan_config(),
            Err(PlanError::InvalidRotation(_))
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = LogsliceConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid log_level"));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let mut config = LogsliceConfig::default();
        config.export.query_log_start = Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        config.export.query_log_end = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_define_known_and_unknown_properties() {
        let mut props = PropertiesConfig::default();
        props.define("teradata-logs.max-sql-length", "20000").unwrap();
        props.define("teradata-logs.log-date-column", "LogDate").unwrap();
        assert_eq!(props.max_sql_length.as_deref(), Some("20000"));
        assert_eq!(props.log_date_column.as_deref(), Some("LogDate"));

        let err = props.define("teradata-logs.bogus", "1").unwrap_err();
        assert!(err.contains("Unknown property"));
    }

    #[test]
    fn test_invalid_local_rotation_rejected() {
        let mut config = LogsliceConfig::default();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }
}
