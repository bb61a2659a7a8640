//! Core type definitions with newtype patterns for type safety.

mod port;
mod scan_id;
mod target;

pub use port::{Port, PortError, PortRange, PortSpec};
pub use scan_id::{ScanId, ScanIdError};
pub use target::{is_valid_hostname, ScanTarget};
