//! Thread-safe collection of per-port probe results.
//!
//! Workers record results in completion order, which is arbitrary; the
//! aggregator establishes the report's ascending-port ordering only when the
//! snapshot is taken. Only open ports are retained individually, keeping
//! memory bounded by the open count rather than the range size.

use crate::probe::{PortResult, ProbeOutcome};
use std::sync::Mutex;

/// Collector for probe results from concurrent workers.
///
/// Interior mutability behind a `Mutex`; the lock is held only for the push,
/// never across an await point.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    inner: Mutex<Tallies>,
}

#[derive(Debug, Default)]
struct Tallies {
    open: Vec<PortResult>,
    closed: usize,
    unreachable: usize,
}

/// Aggregated counts and the sorted open-port list for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Open ports, ascending by port number.
    pub open: Vec<PortResult>,
    /// Probes that found the port closed (refused or timed out).
    pub closed: usize,
    /// Probes that could not reach the host.
    pub unreachable: usize,
}

impl ScanSummary {
    /// Total results recorded, all outcomes.
    pub fn total_recorded(&self) -> usize {
        self.open.len() + self.closed + self.unreachable
    }
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe result. Safe to call from any worker.
    pub fn record(&self, result: PortResult) {
        let mut tallies = self.inner.lock().expect("aggregator lock poisoned");
        match result.outcome {
            ProbeOutcome::Open { .. } => tallies.open.push(result),
            ProbeOutcome::Closed => tallies.closed += 1,
            ProbeOutcome::Unreachable => tallies.unreachable += 1,
        }
    }

    /// Produce the final summary, sorting open ports ascending.
    ///
    /// The sort happens here rather than at insertion so that completion
    /// order never influences the report.
    pub fn snapshot(&self) -> ScanSummary {
        let tallies = self.inner.lock().expect("aggregator lock poisoned");
        let mut open = tallies.open.clone();
        open.sort_by_key(|r| r.port);
        ScanSummary {
            open,
            closed: tallies.closed,
            unreachable: tallies.unreachable,
        }
    }
}
