//! Domain error types
//!
//! This module defines the error hierarchy for Logslice. Every error the plan
//! generator can raise is detected while validating configuration, before any
//! task is constructed.

use thiserror::Error;

/// Main Logslice error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum LogsliceError {
    /// Configuration loading or schema errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Plan configuration rejected during validation
    #[error("Configuration error: {0}")]
    Plan(#[from] PlanError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl LogsliceError {
    /// Returns true for errors caused by user-supplied configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Plan(_))
    }
}

/// Plan validation errors
///
/// Raised while resolving tables, properties, and the export window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Table override list with other than two entries
    #[error("Alternate query log tables must be given as a pair; you specified: {given:?}")]
    AlternatesArity { given: Vec<String> },

    /// Property value is not an integer
    #[error("Option '{property}' accepts only integers. Actual: '{value}'")]
    InvalidNumber { property: String, value: String },

    /// Property value outside its inclusive range
    #[error("Option '{property}' accepts only integers in range [{min}..{max}]. Actual: '{value}'")]
    OutOfRange {
        property: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Export range with start at or after its end
    #[error("Export range start {start} must be before end {end}")]
    DegenerateRange { start: String, end: String },

    /// Rotation duration of zero or less
    #[error("Rotation duration must be positive, got {0}")]
    NonPositiveRotation(String),

    /// Rotation string that cannot be parsed
    #[error("Invalid rotation frequency '{0}'. Expected hourly, daily, or <n>m, <n>h, <n>d")]
    InvalidRotation(String),

    /// Export window settings that cannot be resolved
    #[error("Invalid export window: {0}")]
    InvalidWindow(String),

    /// Boundary alignment failed
    #[error("Failed to align interval boundary: {0}")]
    Rounding(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LogsliceError {
    fn from(err: std::io::Error) -> Self {
        LogsliceError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LogsliceError {
    fn from(err: serde_json::Error) -> Self {
        LogsliceError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LogsliceError {
    fn from(err: toml::de::Error) -> Self {
        LogsliceError::Configuration(format!("TOML parse error: {err}"))
    }
}
