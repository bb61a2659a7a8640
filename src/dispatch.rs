//! Bounded-parallelism probe dispatch.
//!
//! The dispatcher owns the worker pool for one scan: it submits a probe per
//! port, caps the number in flight with a semaphore, and feeds every
//! completion into the shared tracker and aggregator exactly once. It
//! returns only after all submitted probes have finished; an individual
//! probe can never abort the batch.

use crate::aggregate::ResultAggregator;
use crate::probe::{PortResult, Prober};
use crate::progress::{ProgressTracker, DEFAULT_REPORT_CADENCE};
use crate::types::Port;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

// Stream buffering is kept high; the semaphore controls actual concurrency.
const QUEUE_DEPTH: usize = 1000;

/// Dispatches probes for one scan with bounded parallelism.
pub struct ScanDispatcher {
    concurrency: usize,
    progress: Option<ProgressBar>,
    cadence: usize,
}

impl ScanDispatcher {
    /// Create a dispatcher allowing at most `concurrency` probes in flight.
    ///
    /// A limit of zero is treated as one; the degenerate serial case must
    /// still complete.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            progress: None,
            cadence: DEFAULT_REPORT_CADENCE,
        }
    }

    /// Attach a progress bar, updated on the report cadence.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Override how many completions pass between progress updates.
    pub fn with_cadence(mut self, cadence: usize) -> Self {
        self.cadence = cadence;
        self
    }

    /// Probe every port in `ports`, returning once all have completed.
    ///
    /// Each completion records exactly once into `aggregator` and `tracker`,
    /// whatever its outcome. Completion order is arbitrary; the returned
    /// vector reflects it and callers wanting determinism read the
    /// aggregator's sorted snapshot instead. An empty port list returns
    /// immediately without touching either collaborator.
    pub async fn dispatch(
        &self,
        prober: Arc<dyn Prober>,
        ports: &[Port],
        tracker: &ProgressTracker,
        aggregator: &ResultAggregator,
    ) -> Vec<PortResult> {
        if ports.is_empty() {
            return Vec::new();
        }

        debug!(
            ports = ports.len(),
            concurrency = self.concurrency,
            "dispatching probes"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let results: Vec<PortResult> = stream::iter(ports.iter().copied())
            .map(|port| {
                let semaphore = Arc::clone(&semaphore);
                let prober = Arc::clone(&prober);

                async move {
                    // Never closed while dispatch is running.
                    let _permit = semaphore.acquire().await.expect("semaphore closed");

                    let outcome = prober.probe(port).await;
                    let result = PortResult::new(port, outcome);

                    aggregator.record(result.clone());
                    let snapshot = tracker.record_completion();

                    if let Some(bar) = &self.progress {
                        if result.is_open() {
                            bar.set_message(format!("found open port {}", port));
                        }
                        if snapshot.is_report_point(self.cadence) {
                            bar.set_position(snapshot.completed as u64);
                        }
                    }

                    result
                }
            })
            .buffer_unordered(QUEUE_DEPTH)
            .collect()
            .await;

        if let Some(bar) = &self.progress {
            bar.finish_with_message("scan complete");
        }

        results
    }
}

/// Build the progress bar used for interactive scans.
pub fn scan_progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .expect("static template is valid")
            .progress_chars("=>-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeOutcome;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Deterministic prober: configured ports report open, everything else
    /// closed. Optionally delays low ports longer than high ones to force
    /// out-of-order completion.
    struct ScriptedProber {
        open: HashSet<u16>,
        skew_completion_order: bool,
        calls: AtomicUsize,
    }

    impl ScriptedProber {
        fn new(open: impl IntoIterator<Item = u16>) -> Self {
            Self {
                open: open.into_iter().collect(),
                skew_completion_order: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn with_skewed_order(mut self) -> Self {
            self.skew_completion_order = true;
            self
        }
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, port: Port) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.skew_completion_order {
                // Lower ports finish later.
                let delay = 20u64.saturating_sub(u64::from(port.get()) % 20);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            if self.open.contains(&port.get()) {
                ProbeOutcome::open(Some("test".into()))
            } else {
                ProbeOutcome::Closed
            }
        }
    }

    /// Prober that tracks how many probes run simultaneously.
    struct ConcurrencyMeter {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ConcurrencyMeter {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for ConcurrencyMeter {
        async fn probe(&self, _port: Port) -> ProbeOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            ProbeOutcome::Closed
        }
    }

    fn ports(range: std::ops::RangeInclusive<u16>) -> Vec<Port> {
        range.map(|p| Port::new(p).unwrap()).collect()
    }

    #[tokio::test]
    async fn every_port_recorded_once() {
        let ports = ports(79..=82);
        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();
        let prober = Arc::new(ScriptedProber::new([80]));

        let results = ScanDispatcher::new(4)
            .dispatch(prober.clone(), &ports, &tracker, &aggregator)
            .await;

        assert_eq!(results.len(), 4);
        assert_eq!(prober.calls.load(Ordering::SeqCst), 4);
        assert_eq!(tracker.snapshot().completed, 4);

        let summary = aggregator.snapshot();
        assert_eq!(summary.total_recorded(), 4);
        assert_eq!(summary.open.len(), 1);
        assert_eq!(summary.open[0].port.get(), 80);
    }

    #[tokio::test]
    async fn sorted_despite_out_of_order_completion() {
        let ports = ports(1..=40);
        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();
        let prober = Arc::new(ScriptedProber::new([3, 7, 19, 31]).with_skewed_order());

        ScanDispatcher::new(16)
            .dispatch(prober, &ports, &tracker, &aggregator)
            .await;

        let open: Vec<u16> = aggregator
            .snapshot()
            .open
            .iter()
            .map(|r| r.port.get())
            .collect();
        assert_eq!(open, vec![3, 7, 19, 31]);
    }

    #[tokio::test]
    async fn concurrency_limit_respected() {
        let ports = ports(1..=30);
        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();
        let meter = Arc::new(ConcurrencyMeter::new());

        ScanDispatcher::new(5)
            .dispatch(meter.clone(), &ports, &tracker, &aggregator)
            .await;

        assert!(meter.peak.load(Ordering::SeqCst) <= 5);
        assert_eq!(tracker.snapshot().completed, 30);
    }

    #[tokio::test]
    async fn serial_limit_still_completes() {
        let ports = ports(1..=50);
        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();
        let prober = Arc::new(ScriptedProber::new([10, 20]));

        let results = ScanDispatcher::new(1)
            .dispatch(prober, &ports, &tracker, &aggregator)
            .await;

        assert_eq!(results.len(), 50);
        let open: Vec<u16> = aggregator
            .snapshot()
            .open
            .iter()
            .map(|r| r.port.get())
            .collect();
        assert_eq!(open, vec![10, 20]);
    }

    #[tokio::test]
    async fn empty_port_list_returns_immediately() {
        let tracker = ProgressTracker::new(0);
        let aggregator = ResultAggregator::new();
        let prober = Arc::new(ScriptedProber::new(std::iter::empty()));

        let results = ScanDispatcher::new(8)
            .dispatch(prober.clone(), &[], &tracker, &aggregator)
            .await;

        assert!(results.is_empty());
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
        assert_eq!(aggregator.snapshot().total_recorded(), 0);
    }

    #[tokio::test]
    async fn duplicate_ports_probed_independently() {
        let dup = Port::new(80).unwrap();
        let ports = vec![dup, dup, dup];
        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();
        let prober = Arc::new(ScriptedProber::new([80]));

        ScanDispatcher::new(2)
            .dispatch(prober.clone(), &ports, &tracker, &aggregator)
            .await;

        assert_eq!(prober.calls.load(Ordering::SeqCst), 3);
        assert_eq!(aggregator.snapshot().open.len(), 3);
    }
}
