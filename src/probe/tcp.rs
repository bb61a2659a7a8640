//! TCP connect probe.
//!
//! Uses the operating system's socket API via tokio. Completes the full
//! handshake, so no special privileges are required.

use crate::probe::{ProbeOutcome, Prober};
use crate::services::ServiceNames;
use crate::types::Port;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Probes ports by attempting real TCP connections with a per-probe timeout.
pub struct TcpProber {
    target: IpAddr,
    timeout: Duration,
    services: Arc<dyn ServiceNames>,
}

impl TcpProber {
    /// Create a prober for one target.
    ///
    /// `services` is consulted once per open port; lookup misses leave the
    /// service name empty rather than failing the probe.
    pub fn new(target: IpAddr, timeout: Duration, services: Arc<dyn ServiceNames>) -> Self {
        Self {
            target,
            timeout,
            services,
        }
    }

    pub fn target(&self) -> IpAddr {
        self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, port: Port) -> ProbeOutcome {
        let addr = SocketAddr::new(self.target, port.get());

        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                // Connection established; release the socket immediately.
                drop(stream);
                let service = self.services.lookup(port.get()).map(str::to_owned);
                trace!(port = port.get(), ?service, "port open");
                ProbeOutcome::open(service)
            }
            Ok(Err(e)) => classify_connect_error(&e),
            Err(_) => {
                trace!(port = port.get(), "connect timed out");
                ProbeOutcome::Closed
            }
        }
    }
}

/// Map a failed connect to an outcome.
///
/// Refusal means something answered, so the port is closed. Unreachable
/// errors mean the attempt never reached the host; those stay distinct.
fn classify_connect_error(e: &std::io::Error) -> ProbeOutcome {
    if e.kind() == std::io::ErrorKind::ConnectionRefused {
        return ProbeOutcome::Closed;
    }
    let text = e.to_string().to_lowercase();
    if text.contains("refused") {
        ProbeOutcome::Closed
    } else {
        // No route, host down, or another network-level failure.
        ProbeOutcome::Unreachable
    }
}
