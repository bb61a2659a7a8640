//! # Sounder - An Asynchronous TCP Port Scanner
//!
//! Sounder probes a target host's TCP ports to determine which are accepting
//! connections, reporting the open set with best-effort service names,
//! elapsed time, and progress feedback.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sounder::session::ScanSession;
//! use sounder::types::PortSpec;
//!
//! #[tokio::main]
//! async fn main() {
//!     let spec: PortSpec = "1-1024".parse().unwrap();
//!     let report = ScanSession::new()
//!         .run("example.com", &spec.ports())
//!         .await
//!         .expect("scan failed");
//!     for result in &report.open {
//!         println!("{} open ({})", result.port, result.service_label());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! Results flow one direction: [`session::ScanSession`] resolves the target
//! and hands the port list to [`dispatch::ScanDispatcher`], which runs
//! [`probe::Prober`] tasks under a concurrency cap; every completion feeds
//! the shared [`aggregate::ResultAggregator`] and [`progress::ProgressTracker`]
//! exactly once, and the session reads the aggregator's sorted snapshot to
//! build the final [`session::ScanReport`].

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod probe;
pub mod progress;
pub mod resolve;
pub mod services;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use probe::{PortResult, ProbeOutcome, Prober, TcpProber};
pub use session::{ScanReport, ScanSession};
pub use types::{Port, PortRange, PortSpec, ScanTarget};
