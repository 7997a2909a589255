//! Time windows, intervals, and rotation durations
//!
//! All instants are UTC. Ranges and intervals are half-open: `[start, end_exclusive)`.

use super::errors::PlanError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of trailing days exported when no explicit start is given
pub const DEFAULT_QUERY_LOG_DAYS: u32 = 7;

/// The full export window, `[start, end_exclusive)`
///
/// # Examples
///
/// ```
/// use logslice::domain::time::TimeRange;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
/// let range = TimeRange::new(start, end).unwrap();
/// assert_eq!(range.duration().num_days(), 7);
///
/// assert!(TimeRange::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end_exclusive: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a range, rejecting `start >= end_exclusive`
    pub fn new(start: DateTime<Utc>, end_exclusive: DateTime<Utc>) -> Result<Self, PlanError> {
        if start >= end_exclusive {
            return Err(PlanError::DegenerateRange {
                start: start.to_rfc3339(),
                end: end_exclusive.to_rfc3339(),
            });
        }
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end_exclusive(&self) -> DateTime<Utc> {
        self.end_exclusive
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_exclusive - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end_exclusive.to_rfc3339()
        )
    }
}

/// One time slice of an export
///
/// Created by the interval planner; never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end_exclusive: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end_exclusive: DateTime<Utc>) -> Result<Self, PlanError> {
        let range = TimeRange::new(start, end_exclusive)?;
        Ok(Self {
            start: range.start,
            end_exclusive: range.end_exclusive,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end_exclusive(&self) -> DateTime<Utc> {
        self.end_exclusive
    }

    /// Returns true if `instant` falls inside the interval
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end_exclusive
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end_exclusive.to_rfc3339()
        )
    }
}

/// Target width of each interval
///
/// Always strictly positive. Parses from `hourly`, `daily`, or a count with a
/// `m`, `h`, or `d` suffix.
///
/// # Examples
///
/// ```
/// use logslice::domain::time::RotationDuration;
/// use std::str::FromStr;
///
/// let daily = RotationDuration::from_str("daily").unwrap();
/// assert_eq!(daily.as_delta().num_hours(), 24);
///
/// let six_hours = RotationDuration::from_str("6h").unwrap();
/// assert_eq!(six_hours.as_delta().num_hours(), 6);
///
/// assert!(RotationDuration::from_str("0h").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RotationDuration(TimeDelta);

impl RotationDuration {
    pub fn new(delta: TimeDelta) -> Result<Self, PlanError> {
        if delta <= TimeDelta::zero() {
            return Err(PlanError::NonPositiveRotation(format!(
                "{}s",
                delta.num_seconds()
            )));
        }
        Ok(Self(delta))
    }

    pub fn hourly() -> Self {
        Self(TimeDelta::hours(1))
    }

    pub fn daily() -> Self {
        Self(TimeDelta::days(1))
    }

    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }
}

impl Default for RotationDuration {
    fn default() -> Self {
        Self::daily()
    }
}

impl fmt::Display for RotationDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.num_seconds();
        if secs % 86_400 == 0 {
            write!(f, "{}d", secs / 86_400)
        } else if secs % 3_600 == 0 {
            write!(f, "{}h", secs / 3_600)
        } else if secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{secs}s")
        }
    }
}

impl FromStr for RotationDuration {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "hourly" => return Ok(Self::hourly()),
            "daily" => return Ok(Self::daily()),
            _ => {}
        }

        let invalid = || PlanError::InvalidRotation(s.to_string());

        // <count>[m|h|d], optionally with spaces before the unit
        let unit = normalized.chars().last().ok_or_else(invalid)?;
        let digits = normalized[..normalized.len() - unit.len_utf8()].trim_end();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: i64 = digits.parse().map_err(|_| invalid())?;
        let delta = match unit {
            'm' => TimeDelta::try_minutes(count),
            'h' => TimeDelta::try_hours(count),
            'd' => TimeDelta::try_days(count),
            _ => return Err(invalid()),
        }
        .ok_or_else(invalid)?;

        Self::new(delta)
    }
}

impl Serialize for RotationDuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// User-facing export window
///
/// Either a trailing "last N days" window ending at `end` (or now), or an
/// explicit `start` with an optional `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportWindow {
    pub days: u32,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Default for ExportWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_QUERY_LOG_DAYS,
            start: None,
            end: None,
        }
    }
}

impl ExportWindow {
    /// Trailing window of `days` ending at the reference instant
    pub fn last_days(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Explicit window
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            days: DEFAULT_QUERY_LOG_DAYS,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolves the window into a concrete range using `now` for any open end
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<TimeRange, PlanError> {
        let end = self.end.unwrap_or(now);
        let start = match self.start {
            Some(start) => start,
            None => {
                if self.days < 1 {
                    return Err(PlanError::InvalidWindow(format!(
                        "query log days must be at least 1, got {}",
                        self.days
                    )));
                }
                let span = TimeDelta::try_days(i64::from(self.days)).ok_or_else(|| {
                    PlanError::InvalidWindow(format!("query log days too large: {}", self.days))
                })?;
                end.checked_sub_signed(span).ok_or_else(|| {
                    PlanError::InvalidWindow(format!("query log days too large: {}", self.days))
                })?
            }
        };
        TimeRange::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_time_range_rejects_equal_bounds() {
        let t = at(2024, 1, 1, 0);
        assert!(matches!(
            TimeRange::new(t, t),
            Err(PlanError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn test_interval_contains_is_half_open() {
        let interval = Interval::new(at(2024, 1, 1, 0), at(2024, 1, 2, 0)).unwrap();
        assert!(interval.contains(at(2024, 1, 1, 0)));
        assert!(interval.contains(at(2024, 1, 1, 23)));
        assert!(!interval.contains(at(2024, 1, 2, 0)));
    }

    #[test]
    fn test_rotation_parse_variants() {
        assert_eq!(
            RotationDuration::from_str("HOURLY").unwrap(),
            RotationDuration::hourly()
        );
        assert_eq!(
            RotationDuration::from_str("2d").unwrap().as_delta(),
            TimeDelta::days(2)
        );
        assert_eq!(
            RotationDuration::from_str("30m").unwrap().as_delta(),
            TimeDelta::minutes(30)
        );
        assert_eq!(
            RotationDuration::from_str(" 6 H ").unwrap().as_delta(),
            TimeDelta::hours(6)
        );
    }

    #[test]
    fn test_rotation_parse_rejects_garbage_and_zero() {
        assert!(matches!(
            RotationDuration::from_str("weekly"),
            Err(PlanError::InvalidRotation(_))
        ));
        for bad in ["", "h", "-2h", "1.5h", "2w", "h2"] {
            assert!(
                matches!(
                    RotationDuration::from_str(bad),
                    Err(PlanError::InvalidRotation(_))
                ),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            RotationDuration::from_str("0d"),
            Err(PlanError::NonPositiveRotation(_))
        ));
        assert!(RotationDuration::new(TimeDelta::seconds(-60)).is_err());
    }

    #[test]
    fn test_rotation_display() {
        assert_eq!(RotationDuration::daily().to_string(), "1d");
        assert_eq!(RotationDuration::hourly().to_string(), "1h");
        assert_eq!(
            RotationDuration::new(TimeDelta::minutes(90))
                .unwrap()
                .to_string(),
            "90m"
        );
    }

    #[test]
    fn test_window_trailing_days() {
        let now = at(2024, 3, 10, 15);
        let range = ExportWindow::last_days(7).resolve(now).unwrap();
        assert_eq!(range.start(), at(2024, 3, 3, 15));
        assert_eq!(range.end_exclusive(), now);
    }

    #[test]
    fn test_window_explicit_start_open_end() {
        let now = at(2024, 3, 10, 0);
        let window = ExportWindow {
            days: 7,
            start: Some(at(2024, 3, 9, 6)),
            end: None,
        };
        let range = window.resolve(now).unwrap();
        assert_eq!(range.start(), at(2024, 3, 9, 6));
        assert_eq!(range.end_exclusive(), now);
    }

    #[test]
    fn test_window_trailing_days_from_explicit_end() {
        let end = at(2024, 3, 10, 6);
        let window = ExportWindow {
            days: 3,
            start: None,
            end: Some(end),
        };
        let range = window.resolve(at(2030, 1, 1, 0)).unwrap();
        assert_eq!(range.start(), at(2024, 3, 7, 6));
        assert_eq!(range.end_exclusive(), end);
        assert_eq!(range, window.resolve(at(2024, 3, 10, 0)).unwrap());
    }

    #[test]
    fn test_window_rejects_zero_days() {
        let err = ExportWindow::last_days(0).resolve(at(2024, 1, 1, 0));
        assert!(matches!(err, Err(PlanError::InvalidWindow(_))));
    }

    #[test]
    fn test_window_rejects_start_after_end() {
        let window = ExportWindow::between(at(2024, 1, 5, 0), at(2024, 1, 1, 0));
        assert!(matches!(
            window.resolve(at(2024, 2, 1, 0)),
            Err(PlanError::DegenerateRange { .. })
        ));
    }
}
