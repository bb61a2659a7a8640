//! Target resolution.
//!
//! Resolution happens once per session, before any probe is issued. The
//! `Resolve` trait is the seam the session depends on; `DnsResolver` is the
//! real implementation on top of trust-dns.

use crate::error::{ScanError, ScanResult};
use crate::types::is_valid_hostname;
use async_trait::async_trait;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves a target string to the address that will be scanned.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, host: &str) -> ScanResult<IpAddr>;
}

/// System DNS resolution via trust-dns. Literal IP addresses short-circuit
/// without a lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsResolver;

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, host: &str) -> ScanResult<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        if !is_valid_hostname(host) {
            return Err(ScanError::InvalidTarget(host.to_string()));
        }

        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ScanError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        // Prefer the first address; multi-homed hosts get one scan per run.
        response
            .iter()
            .next()
            .ok_or_else(|| ScanError::NoAddresses(host.to_string()))
    }
}
