//! Port number types and port-specification parsing.
//!
//! `Port` is a validated newtype over `u16`; zero is never a scannable port.
//! `PortSpec` handles the user-facing "80", "79-82", "22,80,8000-9000"
//! formats and normalizes them into the flat port list the engine consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Lowest scannable port.
    pub const MIN: u16 = 1;
    /// Highest scannable port.
    pub const MAX: u16 = 65535;

    /// Create a `Port`, rejecting zero.
    #[inline]
    pub const fn new(value: u16) -> Option<Self> {
        if value >= Self::MIN {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Errors from port parsing and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0:?}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An inclusive, validated range of ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a range; `start` must not exceed `end`.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start.get(), end.get()))
        } else {
            Ok(Self { start, end })
        }
    }

    /// A range covering exactly one port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Number of ports covered. Never zero for a valid range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the covered ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A user-supplied port specification: single ports, ranges, or a mix.
///
/// The engine never sees this type; the CLI parses it and hands the
/// normalized port list to the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Flatten into the port list in submission order.
    ///
    /// Duplicates across ranges are kept; each occurrence is probed
    /// independently.
    pub fn ports(&self) -> Vec<Port> {
        self.ranges.iter().flat_map(|r| r.iter()).collect()
    }

    /// Smallest and largest port mentioned anywhere in the spec.
    pub fn bounds(&self) -> Option<(Port, Port)> {
        let lo = self.ranges.iter().map(|r| r.start).min()?;
        let hi = self.ranges.iter().map(|r| r.end).max()?;
        Some((lo, hi))
    }

    /// Total number of ports that will be probed (duplicates included).
    pub fn count(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl From<PortRange> for PortSpec {
    fn from(range: PortRange) -> Self {
        Self {
            ranges: vec![range],
        }
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            match part.split_once('-') {
                Some((lo, hi)) => {
                    let start = parse_port(lo.trim())?;
                    let end = parse_port(hi.trim())?;
                    ranges.push(PortRange::new(start, end)?);
                }
                None => {
                    ranges.push(PortRange::single(parse_port(part)?));
                }
            }
        }

        Ok(Self { ranges })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

fn parse_port(s: &str) -> Result<Port, PortError> {
    let raw: u16 = s
        .parse()
        .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
    Port::new(raw).ok_or(PortError::OutOfRange(raw))
}
