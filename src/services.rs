//! Service name lookup for well-known ports.
//!
//! The engine treats service naming as a pluggable oracle: `ServiceNames`
//! maps a port number to an optional label and is queried once per open
//! port. A missing mapping is never an error; callers render it "unknown".

use std::collections::HashMap;
use std::sync::LazyLock;

/// Oracle mapping port numbers to human-readable service labels.
///
/// Implementations must be cheap and infallible; a port with no known
/// service yields `None`.
pub trait ServiceNames: Send + Sync {
    fn lookup(&self, port: u16) -> Option<&str>;
}

/// Built-in table of well-known TCP services.
static WELL_KNOWN: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let entries: &[(u16, &'static str)] = &[
        // Classic services
        (20, "ftp-data"),
        (21, "ftp"),
        (22, "ssh"),
        (23, "telnet"),
        (25, "smtp"),
        (53, "dns"),
        (69, "tftp"),
        (79, "finger"),
        (80, "http"),
        (88, "kerberos"),
        (110, "pop3"),
        (111, "rpcbind"),
        (119, "nntp"),
        (123, "ntp"),
        (135, "msrpc"),
        (139, "netbios-ssn"),
        (143, "imap"),
        (179, "bgp"),
        (194, "irc"),
        (389, "ldap"),
        (443, "https"),
        (445, "microsoft-ds"),
        (465, "smtps"),
        (513, "rlogin"),
        (514, "syslog"),
        (515, "printer"),
        (554, "rtsp"),
        (587, "submission"),
        (631, "ipp"),
        (636, "ldaps"),
        (873, "rsync"),
        (993, "imaps"),
        (995, "pop3s"),
        // VPN, tunnels, remote access
        (1080, "socks"),
        (1194, "openvpn"),
        (1701, "l2tp"),
        (1723, "pptp"),
        (3389, "rdp"),
        (5900, "vnc"),
        // Databases and caches
        (1433, "mssql"),
        (1521, "oracle"),
        (2049, "nfs"),
        (3306, "mysql"),
        (5432, "postgresql"),
        (5984, "couchdb"),
        (6379, "redis"),
        (9042, "cassandra"),
        (9200, "elasticsearch"),
        (11211, "memcached"),
        (27017, "mongodb"),
        // Messaging and infrastructure
        (1883, "mqtt"),
        (2181, "zookeeper"),
        (2375, "docker"),
        (2376, "docker-ssl"),
        (4369, "epmd"),
        (5222, "xmpp-client"),
        (5269, "xmpp-server"),
        (5672, "amqp"),
        (6443, "kubernetes-api"),
        (9090, "prometheus"),
        (9092, "kafka"),
        (9418, "git"),
        (15672, "rabbitmq-mgmt"),
        // Web alternates
        (3000, "grafana"),
        (3128, "squid"),
        (8000, "http-alt"),
        (8008, "http-alt"),
        (8080, "http-proxy"),
        (8081, "http-alt"),
        (8443, "https-alt"),
        (8888, "http-alt"),
        (10000, "webmin"),
    ];
    entries.iter().copied().collect()
});

/// `ServiceNames` implementation backed by the static well-known table.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellKnownServices;

impl ServiceNames for WellKnownServices {
    fn lookup(&self, port: u16) -> Option<&str> {
        WELL_KNOWN.get(&port).copied()
    }
}

/// Label used when no service mapping exists.
pub const UNKNOWN_SERVICE: &str = "unknown";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_ports_resolve() {
        let names = WellKnownServices;
        assert_eq!(names.lookup(22), Some("ssh"));
        assert_eq!(names.lookup(80), Some("http"));
        assert_eq!(names.lookup(443), Some("https"));
        assert_eq!(names.lookup(5432), Some("postgresql"));
    }

    #[test]
    fn unknown_port_yields_none() {
        let names = WellKnownServices;
        assert_eq!(names.lookup(49321), None);
    }
}
