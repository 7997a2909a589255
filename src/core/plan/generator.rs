//! Extraction plan generator - turns a plan configuration into ordered tasks
//!
//! Validation happens up front: table overrides, numeric properties, the export
//! window, and the rotation are all checked before a single task is built, so a
//! failing configuration never yields a partial plan.

use super::filename::{output_name, QUERY_LOGS_PREFIX, UTILITY_LOGS_PREFIX};
use super::intervals::{ExpansionPolicy, IntervalPlanner, IntervalSequence};
use super::properties::{parse_and_validate, MAX_SQL_LENGTH, MAX_SQL_LENGTH_RANGE};
use super::shared_state::{SharedState, StreamKind};
use super::summary::PlanSummary;
use super::tables::{TableBinding, TableOverride, TableResolver};
use super::task::{
    ExtractionTask, HeaderKind, QueryLogQuery, TaskCategory, TaskKind, TaskQuery,
    TimeSeriesQuery, UtilityLogQuery,
};
use crate::domain::mode::Mode;
use crate::domain::time::{ExportWindow, Interval, RotationDuration, TimeRange};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default utility log table
pub const DEF_UTILITY_LOGS_TABLE: &str = "dbc.DBQLUtilityTbl";

/// Condition excluding the system account in standard mode
pub const EXCLUDE_SYSTEM_USER_CONDITION: &str = "L.UserName <> 'DBC'";

/// Tie-break ordering for assessment query logs; keeps split SQL text rows together
pub const ASSESSMENT_ORDER_BY: [&str; 2] = ["ST.QueryID", "ST.SQLRowNo"];

/// Column filtered when dumping resource usage time series
pub const TIME_SERIES_TIMESTAMP_COLUMN: &str = "TheTimestamp";

/// A monitored resource usage table, dumped once per interval in assessment mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetric {
    pub name: String,
    pub table: String,
    pub file_prefix: String,
}

impl ResourceMetric {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            file_prefix: file_prefix.into(),
        }
    }

    /// `dbc.ResUsageScpu`, or the configured replacement table
    pub fn scpu(table: Option<&str>) -> Self {
        Self::new(
            "scpu",
            table.unwrap_or("dbc.ResUsageScpu"),
            "dbc.ResUsageScpu_",
        )
    }

    /// `dbc.ResUsageSpma`, or the configured replacement table
    pub fn spma(table: Option<&str>) -> Self {
        Self::new(
            "spma",
            table.unwrap_or("dbc.ResUsageSpma"),
            "dbc.ResUsageSpma_",
        )
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::scpu(None), Self::spma(None)]
    }
}

/// Everything the generator needs, in raw (unvalidated) form where the user
/// supplies it
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub mode: Mode,
    pub window: ExportWindow,
    pub rotation: RotationDuration,
    /// Raw alternates list; must be exactly `[log table, detail table]` when set
    pub query_log_alternates: Option<Vec<String>>,
    /// Passed through verbatim into the start time condition
    pub earliest_timestamp: Option<String>,
    pub utility_logs_table: String,
    pub resource_metrics: Vec<ResourceMetric>,
    pub log_date_column: Option<String>,
    /// Raw `teradata-logs.max-sql-length` value
    pub max_sql_length: Option<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Standard,
            window: ExportWindow::default(),
            rotation: RotationDuration::daily(),
            query_log_alternates: None,
            earliest_timestamp: None,
            utility_logs_table: DEF_UTILITY_LOGS_TABLE.to_string(),
            resource_metrics: ResourceMetric::defaults(),
            log_date_column: None,
            max_sql_length: None,
        }
    }
}

/// Validated values shared by every interval of a run
struct ResolvedSettings<'a> {
    tables: TableBinding,
    conditions: Vec<String>,
    max_sql_length: Option<i64>,
    log_date_column: Option<&'a str>,
    utility_logs_table: &'a str,
    resource_metrics: &'a [ResourceMetric],
    query_logs: Arc<SharedState>,
}

/// Per-mode task set for one interval
enum PlanRecipe {
    Standard,
    Assessment { utility_logs: Arc<SharedState> },
}

impl PlanRecipe {
    fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Standard => PlanRecipe::Standard,
            Mode::Assessment => PlanRecipe::Assessment {
                utility_logs: SharedState::shared(StreamKind::UtilityLogs),
            },
        }
    }

    fn utility_logs(&self) -> Option<&Arc<SharedState>> {
        match self {
            PlanRecipe::Standard => None,
            PlanRecipe::Assessment { utility_logs } => Some(utility_logs),
        }
    }

    /// Primary task first, then its dependents
    fn tasks_for(&self, interval: Interval, settings: &ResolvedSettings<'_>) -> Vec<ExtractionTask> {
        match self {
            PlanRecipe::Standard => vec![ExtractionTask {
                output_name: output_name(QUERY_LOGS_PREFIX, &interval),
                category: TaskCategory::Required,
                interval,
                stream: Some(Arc::clone(&settings.query_logs)),
                query: TaskQuery::QueryLog(QueryLogQuery {
                    variant: Mode::Standard,
                    tables: settings.tables.clone(),
                    conditions: settings.conditions.clone(),
                    header: HeaderKind::Standard,
                    log_date_column: None,
                    max_sql_length: None,
                    order_by: Vec::new(),
                }),
            }],
            PlanRecipe::Assessment { utility_logs } => {
                let mut tasks = Vec::with_capacity(settings.resource_metrics.len() + 2);
                tasks.push(ExtractionTask {
                    output_name: output_name(QUERY_LOGS_PREFIX, &interval),
                    category: TaskCategory::Required,
                    interval,
                    stream: Some(Arc::clone(&settings.query_logs)),
                    query: TaskQuery::QueryLog(QueryLogQuery {
                        variant: Mode::Assessment,
                        tables: settings.tables.clone(),
                        conditions: settings.conditions.clone(),
                        header: HeaderKind::Assessment,
                        log_date_column: settings.log_date_column.map(str::to_string),
                        max_sql_length: settings.max_sql_length,
                        order_by: ASSESSMENT_ORDER_BY.iter().map(|c| c.to_string()).collect(),
                    }),
                });
                tasks.extend(
                    settings
                        .resource_metrics
                        .iter()
                        .map(|metric| time_series_task(metric, interval)),
                );
                tasks.push(ExtractionTask {
                    output_name: output_name(UTILITY_LOGS_PREFIX, &interval),
                    category: TaskCategory::Required,
                    interval,
                    stream: Some(Arc::clone(utility_logs)),
                    query: TaskQuery::UtilityLog(UtilityLogQuery {
                        table: settings.utility_logs_table.to_string(),
                    }),
                });
                tasks
            }
        }
    }
}

fn time_series_task(metric: &ResourceMetric, interval: Interval) -> ExtractionTask {
    ExtractionTask {
        output_name: output_name(&metric.file_prefix, &interval),
        category: TaskCategory::Optional,
        interval,
        stream: None,
        query: TaskQuery::TimeSeries(TimeSeriesQuery {
            metric: metric.name.clone(),
            table: metric.table.clone(),
            conditions: vec![
                format!(
                    "{TIME_SERIES_TIMESTAMP_COLUMN} >= {}",
                    interval.start().timestamp()
                ),
                format!(
                    "{TIME_SERIES_TIMESTAMP_COLUMN} < {}",
                    interval.end_exclusive().timestamp()
                ),
            ],
        }),
    }
}

/// Filter conditions shared by every primary task of the run
fn base_conditions(mode: Mode, earliest_timestamp: Option<&str>) -> Vec<String> {
    let mut conditions = Vec::new();
    if let Some(earliest) = earliest_timestamp.filter(|e| !e.trim().is_empty()) {
        conditions.push(format!("L.StartTime >= {earliest}"));
    }
    if !mode.is_assessment() {
        conditions.push(EXCLUDE_SYSTEM_USER_CONDITION.to_string());
    }
    conditions
}

/// A fully materialized plan
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    mode: Mode,
    requested: TimeRange,
    intervals: IntervalSequence,
    tasks: Vec<ExtractionTask>,
    query_logs: Arc<SharedState>,
    utility_logs: Option<Arc<SharedState>>,
}

impl ExtractionPlan {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The range before boundary expansion
    pub fn requested_range(&self) -> TimeRange {
        self.requested
    }

    pub fn intervals(&self) -> &IntervalSequence {
        &self.intervals
    }

    pub fn tasks(&self) -> &[ExtractionTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn query_logs_state(&self) -> &Arc<SharedState> {
        &self.query_logs
    }

    pub fn utility_logs_state(&self) -> Option<&Arc<SharedState>> {
        self.utility_logs.as_ref()
    }

    pub fn count(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind() == kind).count()
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from_plan(self)
    }
}

/// Builds extraction plans from a [`PlanConfig`]
///
/// # Examples
///
/// ```
/// use logslice::core::plan::{ExtractionPlanGenerator, PlanConfig};
/// use logslice::domain::ExportWindow;
/// use chrono::{TimeZone, Utc};
///
/// let config = PlanConfig {
///     window: ExportWindow::between(
///         Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///         Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
///     ),
///     ..PlanConfig::default()
/// };
/// let plan = ExtractionPlanGenerator::new(config).generate().unwrap();
/// assert_eq!(plan.len(), 7);
/// ```
pub struct ExtractionPlanGenerator {
    config: PlanConfig,
}

impl ExtractionPlanGenerator {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    /// Generates the plan with the current time closing any open window end
    pub fn generate(&self) -> Result<ExtractionPlan> {
        self.generate_at(Utc::now())
    }

    /// Generates the plan with `now` closing any open window end
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the alternates list is not a pair, the
    /// max SQL length is malformed or out of range, or the window is degenerate.
    pub fn generate_at(&self, now: DateTime<Utc>) -> Result<ExtractionPlan> {
        let config = &self.config;
        let mode = config.mode;

        let table_override = TableOverride::from_entries(config.query_log_alternates.as_deref())?;
        let tables = TableResolver::resolve(mode, table_override.as_ref());
        let max_sql_length = parse_and_validate(
            MAX_SQL_LENGTH,
            config.max_sql_length.as_deref(),
            MAX_SQL_LENGTH_RANGE,
        )?;
        let requested = config.window.resolve(now)?;
        let intervals = IntervalPlanner::plan(
            requested,
            config.rotation,
            ExpansionPolicy::for_rotation(config.rotation),
        )?;

        let conditions = base_conditions(mode, config.earliest_timestamp.as_deref());
        if conditions.iter().any(|c| c.starts_with("L.StartTime")) {
            tracing::warn!(
                earliest = ?config.earliest_timestamp,
                "Earliest start time filter is set; slices before it will produce empty outputs"
            );
        }

        tracing::info!(
            mode = %mode,
            log_table = %tables.log_table,
            detail_table = %tables.detail_table,
            requested = %requested,
            intervals = %intervals,
            "Exporting query logs"
        );

        let recipe = PlanRecipe::for_mode(mode);
        let settings = ResolvedSettings {
            tables,
            conditions,
            max_sql_length,
            log_date_column: config.log_date_column.as_deref(),
            utility_logs_table: &config.utility_logs_table,
            resource_metrics: &config.resource_metrics,
            query_logs: SharedState::shared(StreamKind::QueryLogs),
        };

        let mut tasks = Vec::new();
        for interval in &intervals {
            let interval_tasks = recipe.tasks_for(interval, &settings);
            tracing::debug!(
                interval = %interval,
                tasks = interval_tasks.len(),
                "Planned interval"
            );
            tasks.extend(interval_tasks);
        }

        tracing::info!(total_tasks = tasks.len(), "Extraction plan generated");

        Ok(ExtractionPlan {
            mode,
            requested,
            intervals,
            tasks,
            utility_logs: recipe.utility_logs().cloned(),
            query_logs: settings.query_logs,
        })
    }
}
