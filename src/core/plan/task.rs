//! Extraction task descriptors
//!
//! A task is the unit handed to the execution engine. It carries its artifact
//! name, the interval it covers, the shared state of its stream (if any), and
//! the resolved parameters the connectivity layer needs to build its query.

use super::shared_state::SharedState;
use super::tables::TableBinding;
use crate::domain::mode::Mode;
use crate::domain::time::Interval;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Whether a failed task fails the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Required,
    /// The engine may skip or tolerate a failure
    Optional,
}

/// Column set written at the top of a query log artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    Standard,
    Assessment,
}

/// Task kind, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    QueryLog,
    TimeSeries,
    UtilityLog,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::QueryLog => "query_log",
            TaskKind::TimeSeries => "time_series",
            TaskKind::UtilityLog => "utility_log",
        };
        f.write_str(s)
    }
}

/// Primary query log extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryLogQuery {
    pub variant: Mode,
    pub tables: TableBinding,
    /// Opaque SQL fragments, ANDed by the query layer
    pub conditions: Vec<String>,
    pub header: HeaderKind,
    /// DATE column filtered in both tables, if configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_date_column: Option<String>,
    /// Split SQL text longer than this into multiple rows; engine default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sql_length: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<String>,
}

/// Resource usage time series for one interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesQuery {
    pub metric: String,
    pub table: String,
    pub conditions: Vec<String>,
}

/// Utility log extraction for one interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityLogQuery {
    pub table: String,
}

/// Resolved query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskQuery {
    QueryLog(QueryLogQuery),
    TimeSeries(TimeSeriesQuery),
    UtilityLog(UtilityLogQuery),
}

/// One unit of work in an extraction plan
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionTask {
    pub output_name: String,
    pub category: TaskCategory,
    pub interval: Interval,
    #[serde(serialize_with = "serialize_stream")]
    pub stream: Option<Arc<SharedState>>,
    pub query: TaskQuery,
}

impl ExtractionTask {
    pub fn kind(&self) -> TaskKind {
        match self.query {
            TaskQuery::QueryLog(_) => TaskKind::QueryLog,
            TaskQuery::TimeSeries(_) => TaskKind::TimeSeries,
            TaskQuery::UtilityLog(_) => TaskKind::UtilityLog,
        }
    }

    /// Table binding of a query log task
    pub fn tables(&self) -> Option<&TableBinding> {
        match &self.query {
            TaskQuery::QueryLog(q) => Some(&q.tables),
            _ => None,
        }
    }

    /// True if this task and `other` share the same stream state instance
    pub fn shares_stream_with(&self, other: &ExtractionTask) -> bool {
        match (&self.stream, &other.stream) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn serialize_stream<S: Serializer>(
    stream: &Option<Arc<SharedState>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match stream {
        Some(state) => state.kind().serialize(serializer),
        None => serializer.serialize_none(),
    }
}
