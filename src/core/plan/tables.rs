//! Query log table resolution

use crate::domain::errors::PlanError;
use crate::domain::mode::Mode;
use serde::{Deserialize, Serialize};

/// Default DBQL log table in standard mode
pub const DEF_LOG_TABLE: &str = "dbc.DBQLogTbl";

/// Default log view in assessment mode
pub const ASSESSMENT_DEF_LOG_TABLE: &str = "dbc.QryLogV";

/// Default SQL text table, shared by both modes
pub const DEF_QUERY_TABLE: &str = "dbc.DBQLSqlTbl";

/// Resolved pair of table names used by the primary query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBinding {
    pub log_table: String,
    pub detail_table: String,
}

impl TableBinding {
    pub fn new(log_table: impl Into<String>, detail_table: impl Into<String>) -> Self {
        Self {
            log_table: log_table.into(),
            detail_table: detail_table.into(),
        }
    }
}

/// User-supplied replacement for the mode defaults
///
/// Only constructible from exactly two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOverride {
    log_table: String,
    detail_table: String,
}

impl TableOverride {
    pub fn new(log_table: impl Into<String>, detail_table: impl Into<String>) -> Self {
        Self {
            log_table: log_table.into(),
            detail_table: detail_table.into(),
        }
    }

    /// Validates a raw alternates list
    ///
    /// `None` means no override. Any list that is not exactly `[log, detail]`
    /// is rejected, including an explicitly empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// use logslice::core::plan::tables::TableOverride;
    ///
    /// let pair = vec!["alt.log".to_string(), "alt.detail".to_string()];
    /// assert!(TableOverride::from_entries(Some(pair.as_slice())).unwrap().is_some());
    /// assert!(TableOverride::from_entries(None).unwrap().is_none());
    ///
    /// let single = vec!["alt.log".to_string()];
    /// assert!(TableOverride::from_entries(Some(single.as_slice())).is_err());
    /// ```
    pub fn from_entries(entries: Option<&[String]>) -> Result<Option<Self>, PlanError> {
        match entries {
            None => Ok(None),
            Some([log_table, detail_table]) => Ok(Some(Self::new(log_table, detail_table))),
            Some(other) => Err(PlanError::AlternatesArity {
                given: other.to_vec(),
            }),
        }
    }
}

/// Resolves the effective table binding
pub struct TableResolver;

impl TableResolver {
    /// Mode defaults, replaced entirely by `table_override` when present
    pub fn resolve(mode: Mode, table_override: Option<&TableOverride>) -> TableBinding {
        if let Some(o) = table_override {
            return TableBinding::new(&o.log_table, &o.detail_table);
        }
        let log_table = match mode {
            Mode::Standard => DEF_LOG_TABLE,
            Mode::Assessment => ASSESSMENT_DEF_LOG_TABLE,
        };
        TableBinding::new(log_table, DEF_QUERY_TABLE)
    }
}
