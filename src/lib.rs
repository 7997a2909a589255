// Logslice - Time-sliced query log extraction planner
// Copyright (c) 2025 Logslice Contributors
// Licensed under the MIT License

//! # Logslice - time-sliced query log extraction
//!
//! Logslice plans the export of historical Teradata query logs, utility logs,
//! and resource usage time series over a time range, one artifact per slice.
//!
//! ## Overview
//!
//! This library provides:
//! - **Slicing** an export window into hour- or day-aligned intervals
//! - **Resolving** query log tables per mode, or from a user override pair
//! - **Validating** connector properties such as the max SQL text length
//! - **Generating** the ordered task list for an external execution engine
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Plan generation
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logslice::config::load_config;
//! use logslice::core::plan::ExtractionPlanGenerator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("logslice.toml")?;
//!     let plan = ExtractionPlanGenerator::new(config.to_plan_config()?).generate()?;
//!
//!     for task in plan.tasks() {
//!         println!("{}", task.output_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every validation failure surfaces as [`domain::LogsliceError`] before any
//! task is produced; a failing configuration never yields a partial plan.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
