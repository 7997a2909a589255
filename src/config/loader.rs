//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LogsliceConfig;
use crate::domain::errors::LogsliceError;
use crate::domain::mode::Mode;
use crate::domain::result::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LogsliceConfig
/// 4. Applies environment variable overrides (LOGSLICE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use logslice::config::loader::load_config;
///
/// let config = load_config("logslice.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LogsliceConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LogsliceError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LogsliceError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LogsliceConfig = toml::from_str(&contents)
        .map_err(|e| LogsliceError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LogsliceError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads the named file, or built-in defaults when no file is named
///
/// Environment overrides apply in both cases.
pub fn load_config_or_default(path: Option<&str>) -> Result<LogsliceConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = LogsliceConfig::default();
            apply_env_overrides(&mut config)?;
            config.validate().map_err(|e| {
                LogsliceError::Configuration(format!("Configuration validation failed: {}", e))
            })?;
            Ok(config)
        }
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LogsliceError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comment lines are copied untouched
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LogsliceError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env_timestamp(name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            LogsliceError::Configuration(format!("{name} must be an RFC 3339 timestamp: {e}"))
        })
}

/// Applies environment variable overrides using LOGSLICE_* prefix
///
/// Environment variables follow the pattern: LOGSLICE_<SECTION>_<KEY>
/// For example: LOGSLICE_EXPORT_MODE, LOGSLICE_PROPERTIES_MAX_SQL_LENGTH
fn apply_env_overrides(config: &mut LogsliceConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LOGSLICE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_MODE") {
        config.export.mode = Mode::from_str(&val).map_err(LogsliceError::Configuration)?;
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_QUERY_LOG_DAYS") {
        config.export.query_log_days = val.trim().parse().map_err(|e| {
            LogsliceError::Configuration(format!(
                "LOGSLICE_EXPORT_QUERY_LOG_DAYS must be a positive integer: '{val}' ({e})"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_QUERY_LOG_START") {
        config.export.query_log_start =
            Some(parse_env_timestamp("LOGSLICE_EXPORT_QUERY_LOG_START", &val)?);
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_QUERY_LOG_END") {
        config.export.query_log_end =
            Some(parse_env_timestamp("LOGSLICE_EXPORT_QUERY_LOG_END", &val)?);
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_ROTATION") {
        config.export.rotation = val;
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_QUERY_LOG_EARLIEST_TIMESTAMP") {
        config.export.query_log_earliest_timestamp = Some(val);
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_QUERY_LOG_ALTERNATES") {
        config.export.query_log_alternates =
            Some(val.split(',').map(|s| s.trim().to_string()).collect());
    }
    if let Ok(val) = std::env::var("LOGSLICE_EXPORT_OUTPUT") {
        config.export.output = Some(val);
    }

    // Property overrides
    if let Ok(val) = std::env::var("LOGSLICE_PROPERTIES_UTILITY_LOGS_TABLE") {
        config.properties.utility_logs_table = Some(val);
    }
    if let Ok(val) = std::env::var("LOGSLICE_PROPERTIES_RES_USAGE_SCPU_TABLE") {
        config.properties.res_usage_scpu_table = Some(val);
    }
    if let Ok(val) = std::env::var("LOGSLICE_PROPERTIES_RES_USAGE_SPMA_TABLE") {
        config.properties.res_usage_spma_table = Some(val);
    }
    if let Ok(val) = std::env::var("LOGSLICE_PROPERTIES_LOG_DATE_COLUMN") {
        config.properties.log_date_column = Some(val);
    }
    if let Ok(val) = std::env::var("LOGSLICE_PROPERTIES_MAX_SQL_LENGTH") {
        config.properties.max_sql_length = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LOGSLICE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.trim().parse().map_err(|_| {
            LogsliceError::Configuration(format!(
                "LOGSLICE_LOGGING_LOCAL_ENABLED must be 'true' or 'false': '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("LOGSLICE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("LOGSLICE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
