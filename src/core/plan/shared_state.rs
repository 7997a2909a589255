//! Per-stream coordination state
//!
//! One [`SharedState`] exists per output stream for the duration of a run. The
//! plan generator creates it before slicing and hands an `Arc` of it to every
//! task in the stream; tasks may run concurrently and update it through the
//! atomic operations below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Logical output stream a task contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    QueryLogs,
    UtilityLogs,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::QueryLogs => "query_logs",
            StreamKind::UtilityLogs => "utility_logs",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-task coordination for one stream
///
/// # Examples
///
/// ```
/// use logslice::core::plan::shared_state::{SharedState, StreamKind};
///
/// let state = SharedState::new(StreamKind::QueryLogs);
/// assert!(state.claim_header());
/// assert!(!state.claim_header());
///
/// state.add_rows(10);
/// assert_eq!(state.add_rows(5), 15);
/// ```
#[derive(Debug)]
pub struct SharedState {
    kind: StreamKind,
    header_claimed: AtomicBool,
    rows_written: AtomicU64,
    tasks_completed: AtomicUsize,
    empty_outputs: Mutex<Vec<String>>,
}

impl SharedState {
    pub fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            header_claimed: AtomicBool::new(false),
            rows_written: AtomicU64::new(0),
            tasks_completed: AtomicUsize::new(0),
            empty_outputs: Mutex::new(Vec::new()),
        }
    }

    /// Creates a state ready to be shared between tasks
    pub fn shared(kind: StreamKind) -> Arc<Self> {
        Arc::new(Self::new(kind))
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Returns true for exactly one caller per stream
    pub fn claim_header(&self) -> bool {
        self.header_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn header_claimed(&self) -> bool {
        self.header_claimed.load(Ordering::Acquire)
    }

    /// Adds to the running row total and returns the new total
    pub fn add_rows(&self, rows: u64) -> u64 {
        self.rows_written.fetch_add(rows, Ordering::AcqRel) + rows
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written.load(Ordering::Acquire)
    }

    /// Marks one task of the stream as finished and returns the new count
    pub fn record_completed(&self) -> usize {
        self.tasks_completed.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn tasks_completed(&self) -> usize {
        self.tasks_completed.load(Ordering::Acquire)
    }

    /// Flags an artifact that finished with no rows
    pub fn record_empty_output(&self, output_name: impl Into<String>) {
        let output_name = output_name.into();
        tracing::warn!(stream = %self.kind, output = %output_name, "Output slice is empty");
        match self.empty_outputs.lock() {
            Ok(mut outputs) => outputs.push(output_name),
            Err(poisoned) => poisoned.into_inner().push(output_name),
        }
    }

    /// Artifacts flagged empty so far, in the order they were reported
    pub fn empty_outputs(&self) -> Vec<String> {
        match self.empty_outputs.lock() {
            Ok(outputs) => outputs.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_header_claimed_once_across_threads() {
        let state = SharedState::shared(StreamKind::QueryLogs);
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || state.claim_header())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|claimed| *claimed)
            .count();
        assert_eq!(winners, 1);
        assert!(state.header_claimed());
    }

    #[test]
    fn test_row_total_accumulates_across_threads() {
        let state = SharedState::shared(StreamKind::UtilityLogs);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    for _ in 0..100 {
                        state.add_rows(3);
                    }
                    state.record_completed();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(state.rows_written(), 2400);
        assert_eq!(state.tasks_completed(), 8);
    }

    #[test]
    fn test_empty_outputs_recorded_in_order() {
        let state = SharedState::new(StreamKind::QueryLogs);
        state.record_empty_output("a.csv");
        state.record_empty_output("b.csv");
        assert_eq!(state.empty_outputs(), vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_stream_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StreamKind::UtilityLogs).unwrap();
        assert_eq!(json, "\"utility_logs\"");
    }
}
