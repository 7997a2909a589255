//! Domain models and types for Logslice.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Time types** ([`TimeRange`], [`Interval`], [`RotationDuration`], [`ExportWindow`])
//! - **Operating mode** ([`Mode`])
//! - **Error types** ([`LogsliceError`], [`PlanError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LogsliceError>`]:
//!
//! ```rust
//! use logslice::domain::{PlanError, Result};
//!
//! fn example() -> Result<()> {
//!     // Plan errors convert into LogsliceError via the ? operator
//!     Err(PlanError::InvalidWindow("days must be >= 1".to_string()))?
//! }
//!
//! assert!(example().unwrap_err().is_configuration());
//! ```

pub mod errors;
pub mod mode;
pub mod result;
pub mod time;

// Re-export commonly used types for convenience
pub use errors::{LogsliceError, PlanError};
pub use mode::Mode;
pub use result::Result;
pub use time::{ExportWindow, Interval, RotationDuration, TimeRange};
