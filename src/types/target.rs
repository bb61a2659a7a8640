//! Scan target identity.
//!
//! A `ScanTarget` pairs the user's original input (hostname or IP string)
//! with the address it resolved to. Construction happens once, before any
//! probing, and the value is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// A scan target that has been validated and resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Check whether a string is a plausible DNS hostname.
///
/// Labels are 1-63 characters, alphanumeric plus interior hyphens, with the
/// whole name capped at 253 characters.
pub fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn display_hides_redundant_ip() {
        let ip = IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34));
        let by_ip = ScanTarget::new("93.184.216.34", ip);
        assert_eq!(by_ip.to_string(), "93.184.216.34");

        let by_name = ScanTarget::new("example.com", ip);
        assert_eq!(by_name.to_string(), "example.com (93.184.216.34)");
    }

    #[test]
    fn hostname_validation() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com"));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-leading.com"));
        assert!(!is_valid_hostname("trailing-.com"));
        assert!(!is_valid_hostname("bad..dots"));
    }
}
