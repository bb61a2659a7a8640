//! Single-port probing.
//!
//! A probe is one attempted TCP connection to a (host, port) pair, bounded
//! by a per-probe timeout. The `Prober` trait abstracts the mechanism so the
//! dispatcher and session can be exercised with deterministic test doubles.

mod tcp;

pub use tcp::TcpProber;

use crate::services::UNKNOWN_SERVICE;
use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default per-probe connect timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Classified outcome of a single probe.
///
/// Timeouts and refused connections both classify as `Closed`; network-level
/// failures reaching the host are kept distinct as `Unreachable` even though
/// the dispatcher treats them identically (they never abort a scan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// Connection established; the port is accepting connections.
    Open {
        /// Best-effort service label from the name oracle.
        #[serde(skip_serializing_if = "Option::is_none")]
        service: Option<String>,
    },
    /// Connection refused, or no handshake within the timeout.
    Closed,
    /// The host could not be reached at the network level for this attempt.
    Unreachable,
}

impl ProbeOutcome {
    /// Open outcome with a service label already attached.
    pub fn open(service: Option<String>) -> Self {
        Self::Open { service }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { .. } => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Result of probing a single port. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    pub port: Port,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl PortResult {
    pub fn new(port: Port, outcome: ProbeOutcome) -> Self {
        Self { port, outcome }
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_open()
    }

    /// Service label for display, falling back to "unknown" on open ports
    /// with no mapping.
    pub fn service_label(&self) -> &str {
        match &self.outcome {
            ProbeOutcome::Open { service } => service.as_deref().unwrap_or(UNKNOWN_SERVICE),
            _ => "",
        }
    }
}

/// A single-port probe mechanism.
///
/// Implementations own their connection resources exclusively and release
/// them on every exit path. A probe never fails; every condition maps to a
/// `ProbeOutcome`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, port: Port) -> ProbeOutcome;
}
