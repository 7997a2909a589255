//! Output artifact naming

use crate::domain::time::Interval;
use chrono::SecondsFormat;

/// Prefix of primary query log artifacts
pub const QUERY_LOGS_PREFIX: &str = "query_history_";

/// Prefix of utility log artifacts
pub const UTILITY_LOGS_PREFIX: &str = "utility_logs_";

/// `<prefix><interval start, UTC ISO 8601>.csv`
///
/// Names sort in interval order because the timestamp is fixed-width.
///
/// # Examples
///
/// ```
/// use logslice::core::plan::filename::output_name;
/// use logslice::domain::Interval;
/// use chrono::{TimeZone, Utc};
///
/// let interval = Interval::new(
///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
/// ).unwrap();
/// assert_eq!(
///     output_name("query_history_", &interval),
///     "query_history_2024-01-01T00:00:00Z.csv"
/// );
/// ```
pub fn output_name(prefix: &str, interval: &Interval) -> String {
    format!(
        "{prefix}{}.csv",
        interval.start().to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
