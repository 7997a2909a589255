//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use logslice::logging::init_logging;
//! use logslice::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a configuration error with the command that hit it
///
/// # Example
///
/// ```no_run
/// use logslice::log_config_error;
/// use logslice::domain::LogsliceError;
///
/// let error = LogsliceError::Configuration("Invalid config".to_string());
/// log_config_error!(&error, "plan");
/// ```
#[macro_export]
macro_rules! log_config_error {
    ($error:expr, $command:expr) => {
        tracing::error!(
            error = %$error,
            command = $command,
            "Configuration rejected"
        );
    };
}
