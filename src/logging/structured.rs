//! Tracing subscriber setup
//!
//! Human-readable events go to stderr so plan output on stdout stays clean.
//! With `local_enabled`, the same events are also written as JSON lines to a
//! rolling `logslice.log` under `local_path`.
//!
//! ```no_run
//! use logslice::config::LoggingConfig;
//! use logslice::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default()).expect("logging");
//! tracing::debug!("ready");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{LogsliceError, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "logslice.log";
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking file writer alive; drop it last to flush
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` wins over `log_level` when set.
///
/// # Errors
///
/// Fails on an unknown level or when the log directory cannot be created.
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("logslice={level}")));

    let console: BoxedLayer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter.clone())
        .boxed();
    let mut layers = vec![console];

    let file_guard = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn json_file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        LogsliceError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        parse_rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok((layer, guard))
}

fn parse_log_level(level: &str) -> Result<Level> {
    let lowered = level.trim().to_ascii_lowercase();
    if !LEVELS.contains(&lowered.as_str()) {
        return Err(LogsliceError::Configuration(format!(
            "Invalid log level: '{level}'. Must be one of: {}",
            LEVELS.join(", ")
        )));
    }
    Level::from_str(&lowered).map_err(|e| LogsliceError::Configuration(e.to_string()))
}

// Values are checked by LoggingConfig::validate
fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("DEBUG", Level::DEBUG)]
    #[test_case(" Info ", Level::INFO)]
    #[test_case("warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("verbose")]
    #[test_case("")]
    #[test_case("3")]
    fn test_parse_log_level_rejects(input: &str) {
        let err = parse_log_level(input).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("trace, debug, info, warn, error"));
    }

    #[test]
    fn test_parse_rotation() {
        assert_eq!(parse_rotation("hourly"), Rotation::HOURLY);
        assert_eq!(parse_rotation("never"), Rotation::NEVER);
        assert_eq!(parse_rotation("daily"), Rotation::DAILY);
    }

    #[test]
    fn test_json_file_layer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let config = LoggingConfig {
            local_enabled: true,
            local_path: log_dir.to_string_lossy().to_string(),
            local_rotation: "never".to_string(),
        };

        let (_layer, guard) = json_file_layer(&config, EnvFilter::new("logslice=info")).unwrap();
        assert!(log_dir.is_dir());
        drop(guard);
    }
}
