//! Connector property parsing and validation

use crate::domain::errors::PlanError;
use std::ops::RangeInclusive;

/// Length of the VARCHAR column `DBQLSqlTbl.SQLTextInfo`
pub const DBQLSQLTBL_SQLTEXTINFO_LENGTH: i64 = 31_000;

/// Allowed values for [`MAX_SQL_LENGTH`]
pub const MAX_SQL_LENGTH_RANGE: RangeInclusive<i64> = 5_000..=DBQLSQLTBL_SQLTEXTINFO_LENGTH;

pub const MAX_SQL_LENGTH: &str = "teradata-logs.max-sql-length";
pub const UTILITY_LOGS_TABLE: &str = "teradata-logs.utility-logs-table";
pub const RES_USAGE_SCPU_TABLE: &str = "teradata-logs.res-usage-scpu-table";
pub const RES_USAGE_SPMA_TABLE: &str = "teradata-logs.res-usage-spma-table";
pub const LOG_DATE_COLUMN: &str = "teradata-logs.log-date-column";

/// Parses an optional integer property and checks it against `allowed`
///
/// Absent input yields `None` and leaves the default to the caller. The value is
/// never trimmed, rounded, or clamped.
///
/// # Errors
///
/// - [`PlanError::InvalidNumber`] when the value is not an integer
/// - [`PlanError::OutOfRange`] when it falls outside `allowed` (inclusive)
///
/// # Examples
///
/// ```
/// use logslice::core::plan::properties::{parse_and_validate, MAX_SQL_LENGTH, MAX_SQL_LENGTH_RANGE};
///
/// assert_eq!(parse_and_validate(MAX_SQL_LENGTH, None, MAX_SQL_LENGTH_RANGE).unwrap(), None);
/// assert_eq!(
///     parse_and_validate(MAX_SQL_LENGTH, Some("10000"), MAX_SQL_LENGTH_RANGE).unwrap(),
///     Some(10000)
/// );
/// assert!(parse_and_validate(MAX_SQL_LENGTH, Some("4000"), MAX_SQL_LENGTH_RANGE).is_err());
/// ```
pub fn parse_and_validate(
    property: &str,
    raw: Option<&str>,
    allowed: RangeInclusive<i64>,
) -> Result<Option<i64>, PlanError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: i64 = raw.parse().map_err(|_| PlanError::InvalidNumber {
        property: property.to_string(),
        value: raw.to_string(),
    })?;
    if !allowed.contains(&value) {
        return Err(PlanError::OutOfRange {
            property: property.to_string(),
            value,
            min: *allowed.start(),
            max: *allowed.end(),
        });
    }
    Ok(Some(value))
}
