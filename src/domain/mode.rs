//! Operating mode

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating mode, selected once per run
///
/// Determines the default log table, the filter conditions, and which task set
/// is generated for each interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Query logs only, excluding the system account
    #[default]
    Standard,
    /// Query logs, resource usage time series, and utility logs
    Assessment,
}

impl Mode {
    pub fn is_assessment(&self) -> bool {
        matches!(self, Mode::Assessment)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Standard => "standard",
            Mode::Assessment => "assessment",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Mode::Standard),
            "assessment" => Ok(Mode::Assessment),
            other => Err(format!(
                "Invalid mode '{other}'. Must be one of: standard, assessment"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str_case_insensitive() {
        assert_eq!(Mode::from_str("Assessment").unwrap(), Mode::Assessment);
        assert_eq!(Mode::from_str("STANDARD").unwrap(), Mode::Standard);
        assert!(Mode::from_str("full").is_err());
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&Mode::Assessment).unwrap();
        assert_eq!(json, "\"assessment\"");
        let mode: Mode = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(mode, Mode::Standard);
    }
}
