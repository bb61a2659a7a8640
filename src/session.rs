//! Scan session orchestration.
//!
//! A `ScanSession` runs one complete scan: resolve the target, dispatch the
//! probes, and assemble the final report from the aggregator's snapshot plus
//! timing metadata. Sessions are side-effect free beyond the probes
//! themselves; printing and persistence belong to the caller.

use crate::aggregate::ResultAggregator;
use crate::dispatch::ScanDispatcher;
use crate::error::{ScanError, ScanResult};
use crate::probe::{PortResult, Prober, TcpProber, DEFAULT_PROBE_TIMEOUT};
use crate::progress::{ProgressTracker, DEFAULT_REPORT_CADENCE};
use crate::resolve::{DnsResolver, Resolve};
use crate::services::{ServiceNames, WellKnownServices};
use crate::types::{Port, PortRange, ScanTarget};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default cap on probes in flight.
pub const DEFAULT_CONCURRENCY: usize = 500;

/// Final report for one completed scan. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// What was scanned, as given and as resolved.
    pub target: ScanTarget,
    /// Bounds of the probed ports; `None` for an empty scan.
    pub range: Option<PortRange>,
    /// Number of probes issued (duplicates counted individually).
    pub total_ports_scanned: usize,
    /// Open ports, ascending by port number.
    pub open: Vec<PortResult>,
    /// Ports found closed (refused or timed out).
    pub closed: usize,
    /// Probes that could not reach the host.
    pub unreachable: usize,
    /// Wall-clock duration of the dispatch phase.
    pub duration_ms: u64,
    /// When the scan finished.
    pub completed_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// One-line summary for logs and history listings.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} open of {} scanned [{:.2}s]",
            self.target,
            self.open.len(),
            self.total_ports_scanned,
            self.duration_ms as f64 / 1000.0
        )
    }
}

/// Orchestrates one scan invocation against one target and port list.
///
/// Collaborators (resolver, service names, the probe mechanism) default to
/// the real implementations and can be swapped for test doubles.
pub struct ScanSession {
    concurrency: usize,
    timeout: Duration,
    resolver: Arc<dyn Resolve>,
    services: Arc<dyn ServiceNames>,
    prober: Option<Arc<dyn Prober>>,
    progress: Option<ProgressBar>,
    cadence: usize,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_PROBE_TIMEOUT,
            resolver: Arc::new(DnsResolver),
            services: Arc::new(WellKnownServices),
            prober: None,
            progress: None,
            cadence: DEFAULT_REPORT_CADENCE,
        }
    }

    /// Cap on simultaneous probes.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Per-probe connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Swap the resolver collaborator.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Swap the service-name oracle used by the default TCP prober.
    pub fn with_services(mut self, services: Arc<dyn ServiceNames>) -> Self {
        self.services = services;
        self
    }

    /// Replace the probe mechanism entirely (used by tests; the default
    /// builds a `TcpProber` against the resolved address).
    pub fn with_prober(mut self, prober: Arc<dyn Prober>) -> Self {
        self.prober = Some(prober);
        self
    }

    /// Attach a progress bar for interactive runs.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Run one scan. Fails only on pre-flight validation or resolution;
    /// individual probe outcomes never surface as errors.
    pub async fn run(&self, target: &str, ports: &[Port]) -> ScanResult<ScanReport> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ScanError::EmptyTarget);
        }

        // Resolve before any probing; an unresolvable target means no
        // partial scan.
        let ip = self.resolver.resolve(target).await?;
        let target = ScanTarget::new(target, ip);
        debug!(%target, ports = ports.len(), "target resolved");

        let tracker = ProgressTracker::new(ports.len());
        let aggregator = ResultAggregator::new();

        let prober: Arc<dyn Prober> = match &self.prober {
            Some(prober) => Arc::clone(prober),
            None => Arc::new(TcpProber::new(ip, self.timeout, Arc::clone(&self.services))),
        };

        let mut dispatcher = ScanDispatcher::new(self.concurrency).with_cadence(self.cadence);
        if let Some(bar) = &self.progress {
            dispatcher = dispatcher.with_progress(bar.clone());
        }

        let started = Instant::now();
        dispatcher
            .dispatch(prober, ports, &tracker, &aggregator)
            .await;
        let duration = started.elapsed();

        let summary = aggregator.snapshot();
        info!(
            target = %target,
            open = summary.open.len(),
            scanned = ports.len(),
            duration_ms = duration.as_millis() as u64,
            "scan finished"
        );

        let range = match (ports.iter().min(), ports.iter().max()) {
            (Some(&lo), Some(&hi)) => Some(PortRange::new(lo, hi).expect("min <= max")),
            _ => None,
        };

        Ok(ScanReport {
            target,
            range,
            total_ports_scanned: ports.len(),
            open: summary.open,
            closed: summary.closed,
            unreachable: summary.unreachable,
            duration_ms: duration.as_millis() as u64,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeOutcome;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedResolver(IpAddr);

    #[async_trait]
    impl Resolve for FixedResolver {
        async fn resolve(&self, _host: &str) -> ScanResult<IpAddr> {
            Ok(self.0)
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl Resolve for FailingResolver {
        async fn resolve(&self, host: &str) -> ScanResult<IpAddr> {
            Err(ScanError::Resolution {
                host: host.to_string(),
                reason: "no such host".to_string(),
            })
        }
    }

    /// Opens the configured ports with well-known service names; counts
    /// every invocation.
    struct ScriptedProber {
        open: HashSet<u16>,
        calls: AtomicUsize,
    }

    impl ScriptedProber {
        fn new(open: impl IntoIterator<Item = u16>) -> Self {
            Self {
                open: open.into_iter().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, port: Port) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.open.contains(&port.get()) {
                let service = WellKnownServices.lookup(port.get()).map(str::to_owned);
                ProbeOutcome::open(service)
            } else {
                ProbeOutcome::Closed
            }
        }
    }

    fn localhost_session(prober: Arc<dyn Prober>) -> ScanSession {
        ScanSession::new()
            .with_resolver(Arc::new(FixedResolver(IpAddr::V4(Ipv4Addr::LOCALHOST))))
            .with_prober(prober)
    }

    fn ports(range: std::ops::RangeInclusive<u16>) -> Vec<Port> {
        range.map(|p| Port::new(p).unwrap()).collect()
    }

    #[tokio::test]
    async fn finger_to_http_scenario() {
        let session = localhost_session(Arc::new(ScriptedProber::new([80])));
        let report = session.run("localhost", &ports(79..=82)).await.unwrap();

        assert_eq!(report.total_ports_scanned, 4);
        assert_eq!(report.open_count(), 1);
        assert_eq!(report.open[0].port.get(), 80);
        assert_eq!(report.open[0].service_label(), "http");
        assert_eq!(report.closed, 3);
        assert_eq!(report.range.unwrap().start().get(), 79);
        assert_eq!(report.range.unwrap().end().get(), 82);
    }

    #[tokio::test]
    async fn resolution_failure_issues_no_probes() {
        let prober = Arc::new(ScriptedProber::new([80]));
        let session = ScanSession::new()
            .with_resolver(Arc::new(FailingResolver))
            .with_prober(prober.clone());

        let err = session
            .run("nosuchhost.invalid", &ports(1..=100))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Resolution { .. }));
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_target_rejected() {
        let session = localhost_session(Arc::new(ScriptedProber::new(std::iter::empty())));
        let err = session.run("   ", &ports(1..=5)).await.unwrap_err();
        assert!(matches!(err, ScanError::EmptyTarget));
    }

    #[tokio::test]
    async fn empty_port_list_yields_empty_report() {
        let prober = Arc::new(ScriptedProber::new([80]));
        let session = localhost_session(prober.clone());

        let report = session.run("127.0.0.1", &[]).await.unwrap();
        assert_eq!(report.total_ports_scanned, 0);
        assert!(report.open.is_empty());
        assert!(report.range.is_none());
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reruns_are_deterministic() {
        let ports = ports(20..=120);
        let prober = Arc::new(ScriptedProber::new([22, 25, 80, 110]));
        let session = localhost_session(prober).with_concurrency(32);

        let first = session.run("localhost", &ports).await.unwrap();
        let second = session.run("localhost", &ports).await.unwrap();

        assert_eq!(first.target, second.target);
        assert_eq!(first.total_ports_scanned, second.total_ports_scanned);
        assert_eq!(first.open, second.open);
        assert_eq!(first.closed, second.closed);
        assert_eq!(first.unreachable, second.unreachable);
    }

    #[tokio::test]
    async fn serial_matches_parallel() {
        let ports = ports(1..=50);
        let open_set = [7u16, 21, 42];

        let serial = localhost_session(Arc::new(ScriptedProber::new(open_set)))
            .with_concurrency(1)
            .run("localhost", &ports)
            .await
            .unwrap();
        let parallel = localhost_session(Arc::new(ScriptedProber::new(open_set)))
            .with_concurrency(50)
            .run("localhost", &ports)
            .await
            .unwrap();

        assert_eq!(serial.open, parallel.open);
        assert_eq!(serial.closed, parallel.closed);
        assert_eq!(serial.total_ports_scanned, parallel.total_ports_scanned);
    }

    #[tokio::test]
    async fn real_probe_against_local_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let report = ScanSession::new()
            .with_timeout(Duration::from_millis(500))
            .run("127.0.0.1", &[Port::new(port).unwrap()])
            .await
            .unwrap();

        assert_eq!(report.open_count(), 1);
        assert_eq!(report.open[0].port.get(), port);
    }

    #[tokio::test]
    async fn report_serialization_roundtrip() {
        let session = localhost_session(Arc::new(ScriptedProber::new([80])));
        let report = session.run("localhost", &ports(79..=82)).await.unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.open, report.open);
        assert_eq!(parsed.total_ports_scanned, report.total_ports_scanned);
    }
}
