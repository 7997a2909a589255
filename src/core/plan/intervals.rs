//! Interval planning
//!
//! Slices an export range into consecutive half-open intervals of the rotation
//! width, after expanding the range outward to the boundary implied by the
//! rotation (whole hours or whole UTC days).

use crate::domain::errors::PlanError;
use crate::domain::time::{Interval, RotationDuration, TimeRange};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use std::fmt;

/// How far the export range is widened before slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionPolicy {
    /// Slice the range exactly as given
    None,
    /// Widen to whole hours
    Hour,
    /// Widen to whole UTC calendar days
    Day,
}

impl ExpansionPolicy {
    /// Day alignment for rotations of a day or more, hour alignment otherwise
    pub fn for_rotation(rotation: RotationDuration) -> Self {
        if rotation.as_delta() >= TimeDelta::days(1) {
            ExpansionPolicy::Day
        } else {
            ExpansionPolicy::Hour
        }
    }

    fn unit(&self) -> Option<TimeDelta> {
        match self {
            ExpansionPolicy::None => None,
            ExpansionPolicy::Hour => Some(TimeDelta::hours(1)),
            ExpansionPolicy::Day => Some(TimeDelta::days(1)),
        }
    }

    /// Floors the start and ceils the end of `range` to this policy's boundary
    pub fn expand(&self, range: TimeRange) -> Result<TimeRange, PlanError> {
        let Some(unit) = self.unit() else {
            return Ok(range);
        };
        let start = floor(range.start(), unit)?;
        let end = ceil(range.end_exclusive(), unit)?;
        TimeRange::new(start, end)
    }
}

fn floor(instant: DateTime<Utc>, unit: TimeDelta) -> Result<DateTime<Utc>, PlanError> {
    instant
        .duration_trunc(unit)
        .map_err(|e| PlanError::Rounding(format!("{instant}: {e}")))
}

fn ceil(instant: DateTime<Utc>, unit: TimeDelta) -> Result<DateTime<Utc>, PlanError> {
    let floored = floor(instant, unit)?;
    if floored == instant {
        return Ok(instant);
    }
    floored
        .checked_add_signed(unit)
        .ok_or_else(|| PlanError::Rounding(format!("{instant}: overflow")))
}

/// Planned sequence of intervals
///
/// Holds only the expanded range and the step; iteration is lazy and every call
/// to [`IntervalSequence::iter`] yields the same intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSequence {
    range: TimeRange,
    rotation: RotationDuration,
}

impl IntervalSequence {
    /// The range after boundary expansion
    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn rotation(&self) -> RotationDuration {
        self.rotation
    }

    pub fn iter(&self) -> Intervals {
        Intervals {
            cursor: self.range.start(),
            end: self.range.end_exclusive(),
            step: self.rotation.as_delta(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a IntervalSequence {
    type Item = Interval;
    type IntoIter = Intervals;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for IntervalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} every {}", self.range, self.rotation)
    }
}

/// Iterator over an [`IntervalSequence`]
#[derive(Debug, Clone)]
pub struct Intervals {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    step: TimeDelta,
}

impl Iterator for Intervals {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if self.cursor >= self.end {
            return None;
        }
        // The last interval is clipped to the expanded end.
        let next = self
            .cursor
            .checked_add_signed(self.step)
            .map_or(self.end, |n| n.min(self.end));
        let interval = Interval::new(self.cursor, next).ok()?;
        self.cursor = next;
        Some(interval)
    }
}

/// Produces interval sequences
pub struct IntervalPlanner;

impl IntervalPlanner {
    /// Plans the intervals covering `range`
    ///
    /// # Errors
    ///
    /// Fails if the expanded boundaries cannot be computed.
    pub fn plan(
        range: TimeRange,
        rotation: RotationDuration,
        policy: ExpansionPolicy,
    ) -> Result<IntervalSequence, PlanError> {
        let range = policy.expand(range)?;
        Ok(IntervalSequence { range, rotation })
    }

    /// Plans from unvalidated bounds and step
    ///
    /// # Errors
    ///
    /// Fails on `start >= end` or a non-positive rotation. No partial plan is
    /// returned.
    pub fn plan_bounds(
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
        rotation: TimeDelta,
        policy: ExpansionPolicy,
    ) -> Result<IntervalSequence, PlanError> {
        let rotation = RotationDuration::new(rotation)?;
        let range = TimeRange::new(start, end_exclusive)?;
        Self::plan(range, rotation, policy)
    }
}
