//! Core business logic for Logslice.
//!
//! # Modules
//!
//! - [`plan`] - Extraction plan generation
//!
//! # Planning Workflow
//!
//! 1. **Validate**: Resolve table overrides and check numeric properties
//! 2. **Slice**: Expand the export window to slice boundaries and cut intervals
//! 3. **Share**: Create one shared state per output stream
//! 4. **Build**: Produce the mode's task set for every interval, in order
//!
//! # Example
//!
//! ```rust
//! use logslice::core::plan::{ExtractionPlanGenerator, PlanConfig, TaskKind};
//! use logslice::domain::{ExportWindow, Mode};
//! use chrono::{TimeZone, Utc};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlanConfig {
//!     mode: Mode::Assessment,
//!     window: ExportWindow::between(
//!         Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
//!     ),
//!     ..PlanConfig::default()
//! };
//!
//! let plan = ExtractionPlanGenerator::new(config).generate()?;
//! assert_eq!(plan.count(TaskKind::QueryLog), 7);
//! assert_eq!(plan.len(), 28);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod plan;
