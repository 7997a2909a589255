//! Plan summary and reporting

use super::generator::ExtractionPlan;
use super::task::TaskKind;
use crate::domain::mode::Mode;
use crate::domain::time::TimeRange;
use serde::Serialize;

/// Counts and bounds of a generated plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub mode: Mode,

    /// Range as requested, before boundary expansion
    pub requested_range: TimeRange,

    /// Range covered by the planned intervals
    pub planned_range: TimeRange,

    pub rotation: String,
    pub intervals: usize,
    pub total_tasks: usize,
    pub query_log_tasks: usize,
    pub time_series_tasks: usize,
    pub utility_log_tasks: usize,

    /// Name of the first artifact, if any
    pub first_output: Option<String>,

    /// Name of the last artifact, if any
    pub last_output: Option<String>,
}

impl PlanSummary {
    pub fn from_plan(plan: &ExtractionPlan) -> Self {
        let tasks = plan.tasks();
        Self {
            mode: plan.mode(),
            requested_range: plan.requested_range(),
            planned_range: plan.intervals().range(),
            rotation: plan.intervals().rotation().to_string(),
            intervals: plan.intervals().len(),
            total_tasks: tasks.len(),
            query_log_tasks: plan.count(TaskKind::QueryLog),
            time_series_tasks: plan.count(TaskKind::TimeSeries),
            utility_log_tasks: plan.count(TaskKind::UtilityLog),
            first_output: tasks.first().map(|t| t.output_name.clone()),
            last_output: tasks.last().map(|t| t.output_name.clone()),
        }
    }

    /// True when boundary alignment widened the requested range
    pub fn was_expanded(&self) -> bool {
        self.requested_range != self.planned_range
    }
}
