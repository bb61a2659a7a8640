//! Thread-safe scan progress tracking.
//!
//! One `ProgressTracker` exists per scan session. Workers call
//! `record_completion` as each probe finishes; the returned snapshot is
//! consistent under concurrency and no increment is ever lost. How often a
//! snapshot is actually rendered is the caller's concern, throttled via
//! `ProgressSnapshot::is_report_point`.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Render a progress line at most every this many completions.
pub const DEFAULT_REPORT_CADENCE: usize = 10;

/// Monotonic completed-of-total counter shared across scan workers.
#[derive(Debug)]
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    /// Create a tracker for a scan of `total` probes.
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Record one completed probe and return the state after the increment.
    ///
    /// Atomic: concurrent callers each observe a distinct completed count
    /// and none exceeds the total.
    pub fn record_completion(&self) -> ProgressSnapshot {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        debug_assert!(completed <= self.total, "more completions than probes");
        ProgressSnapshot {
            completed,
            total: self.total,
        }
    }

    /// Total number of probes in this session, fixed at construction.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Current state without recording a completion.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed.load(Ordering::Relaxed),
            total: self.total,
        }
    }
}

/// A consistent (completed, total) pair captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSnapshot {
    /// Whether all probes have completed.
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    /// Presentation throttle: true every `cadence` completions and at the
    /// very end, so output volume stays bounded.
    pub fn is_report_point(&self, cadence: usize) -> bool {
        if self.is_done() {
            return true;
        }
        cadence > 0 && self.completed % cadence == 0
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}
