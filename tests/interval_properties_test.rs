//! Integration tests for interval slicing and artifact naming

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use logslice::core::plan::filename::{output_name, QUERY_LOGS_PREFIX};
use logslice::core::plan::{ExpansionPolicy, IntervalPlanner};
use logslice::domain::{PlanError, RotationDuration, TimeRange};
use test_case::test_case;

fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
}

#[test_case(at(1, 0, 0), at(8, 0, 0), "daily", ExpansionPolicy::Day, 7 ; "aligned week")]
#[test_case(at(1, 10, 30), at(3, 2, 0), "daily", ExpansionPolicy::Day, 3 ; "unaligned days")]
#[test_case(at(1, 10, 30), at(1, 13, 5), "hourly", ExpansionPolicy::Hour, 4 ; "unaligned hours")]
#[test_case(at(1, 0, 0), at(1, 10, 0), "3h", ExpansionPolicy::Hour, 4 ; "clipped tail")]
#[test_case(at(1, 0, 17), at(1, 1, 3), "15m", ExpansionPolicy::None, 4 ; "no expansion")]
fn test_intervals_tile_the_expanded_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rotation: &str,
    policy: ExpansionPolicy,
    expected: usize,
) {
    let rotation: RotationDuration = rotation.parse().unwrap();
    let range = TimeRange::new(start, end).unwrap();
    let sequence = IntervalPlanner::plan(range, rotation, policy).unwrap();
    let intervals: Vec<_> = sequence.iter().collect();

    assert_eq!(intervals.len(), expected);
    assert_eq!(sequence.len(), expected);

    let planned = sequence.range();
    assert!(planned.start() <= start);
    assert!(planned.end_exclusive() >= end);
    assert_eq!(intervals[0].start(), planned.start());
    assert_eq!(
        intervals[expected - 1].end_exclusive(),
        planned.end_exclusive()
    );

    // Contiguous, strictly increasing, never longer than one rotation
    for pair in intervals.windows(2) {
        assert_eq!(pair[0].end_exclusive(), pair[1].start());
        assert!(pair[0].start() < pair[1].start());
    }
    for interval in &intervals {
        assert!(interval.start() < interval.end_exclusive());
        assert!(interval.end_exclusive() - interval.start() <= rotation.as_delta());
    }
}

#[test]
fn test_every_requested_instant_is_covered_once() {
    let start = at(1, 10, 30);
    let end = at(2, 4, 45);
    let range = TimeRange::new(start, end).unwrap();
    let sequence =
        IntervalPlanner::plan(range, RotationDuration::hourly(), ExpansionPolicy::Hour).unwrap();

    let mut t = start;
    while t < end {
        let hits = sequence.iter().filter(|i| i.contains(t)).count();
        assert_eq!(hits, 1, "instant {t} covered {hits} times");
        t += TimeDelta::minutes(7);
    }
}

#[test]
fn test_sequence_iterates_identically_twice() {
    let range = TimeRange::new(at(1, 0, 0), at(4, 0, 0)).unwrap();
    let sequence =
        IntervalPlanner::plan(range, RotationDuration::daily(), ExpansionPolicy::Day).unwrap();

    let first: Vec<_> = sequence.iter().collect();
    let second: Vec<_> = (&sequence).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_output_names_sort_like_intervals() {
    let range = TimeRange::new(at(1, 0, 0), at(12, 0, 0)).unwrap();
    let sequence =
        IntervalPlanner::plan(range, RotationDuration::hourly(), ExpansionPolicy::Hour).unwrap();

    let names: Vec<String> = sequence
        .iter()
        .map(|i| output_name(QUERY_LOGS_PREFIX, &i))
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let mut unique = names.clone();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
    assert_eq!(names[0], "query_history_2024-03-01T00:00:00Z.csv");
}

#[test]
fn test_plan_bounds_rejects_bad_input() {
    let err = IntervalPlanner::plan_bounds(
        at(2, 0, 0),
        at(1, 0, 0),
        TimeDelta::hours(1),
        ExpansionPolicy::Hour,
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::DegenerateRange { .. }));

    let err = IntervalPlanner::plan_bounds(
        at(1, 0, 0),
        at(2, 0, 0),
        TimeDelta::zero(),
        ExpansionPolicy::Hour,
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::NonPositiveRotation(_)));
}
