//! Extraction planning
//!
//! This module turns a configuration into an ordered list of extraction tasks:
//! - Interval slicing aligned to hour or day boundaries
//! - Property and table override validation
//! - Per-stream shared state
//! - Mode-specific task sets (standard or assessment)

pub mod filename;
pub mod generator;
pub mod intervals;
pub mod properties;
pub mod shared_state;
pub mod summary;
pub mod tables;
pub mod task;

pub use generator::{ExtractionPlan, ExtractionPlanGenerator, PlanConfig, ResourceMetric};
pub use intervals::{ExpansionPolicy, IntervalPlanner, IntervalSequence};
pub use shared_state::{SharedState, StreamKind};
pub use summary::PlanSummary;
pub use tables::{TableBinding, TableOverride, TableResolver};
pub use task::{ExtractionTask, TaskCategory, TaskKind, TaskQuery};
