//! Host name resolution for INET_ADDRESS inference.
//!
//! The parser's first rule asks whether a string names a network host. Answering
//! that with a live lookup would make parsing slow and dependent on the network,
//! so the default [`StaticResolver`] only knows IP literals, `localhost`, and an
//! explicit host table. [`SystemResolver`] adds real lookups and must be enabled
//! in configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use tracing::trace;

pub trait HostResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, host: &str) -> Option<IpAddr>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: BTreeMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host names are matched ignoring ASCII case.
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = (S, IpAddr)>,
        S: AsRef<str>,
    {
        let mut resolver = Self::new();
        for (name, addr) in hosts {
            resolver.insert(name.as_ref(), addr);
        }
        resolver
    }

    pub fn insert(&mut self, name: &str, addr: IpAddr) {
        self.hosts.insert(name.to_ascii_lowercase(), addr);
    }
}

impl HostResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        if let Ok(addr) = host.parse::<IpAddr>() {
            return Some(addr);
        }
        let key = host.to_ascii_lowercase();
        if key == "localhost" {
            return Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        }
        self.hosts.get(&key).copied()
    }
}

/// Static resolution first, then the operating system's resolver for dotted host names.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    table: StaticResolver,
}

impl SystemResolver {
    pub fn new(table: StaticResolver) -> Self {
        Self { table }
    }
}

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        if let Some(addr) = self.table.resolve(host) {
            return Some(addr);
        }
        if !is_dotted_host_name(host) {
            return None;
        }
        trace!(host, "system lookup");
        (host, 0)
            .to_socket_addrs()
            .ok()?
            .next()
            .map(|socket| socket.ip())
    }
}

/// RFC 1123 shape with at least two labels and at least one letter.
pub fn is_dotted_host_name(text: &str) -> bool {
    if text.is_empty() || text.len() > 253 || !text.contains('.') {
        return false;
    }
    let labels_ok = text.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    labels_ok && text.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_static_literals() {
        let resolver = StaticResolver::new();
        assert_eq!(
            resolver.resolve("127.0.0.1"),
            Some(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)))
        );
        assert_eq!(
            resolver.resolve("::1"),
            Some(IpAddr::V6(Ipv6Addr::LOCALHOST))
        );
        assert_eq!(
            resolver.resolve("LocalHost"),
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        assert_eq!(resolver.resolve("134"), None);
        assert_eq!(resolver.resolve("www.example.org"), None);
    }

    #[test]
    fn test_static_table() {
        let addr: IpAddr = "10.1.2.3".parse().unwrap();
        let resolver = StaticResolver::with_hosts([("Build-Box", addr)]);
        assert_eq!(resolver.resolve("build-box"), Some(addr));
    }

    #[test]
    fn test_host_name_shape() {
        assert!(is_dotted_host_name("www.multiagent.fr"));
        assert!(!is_dotted_host_name("localhost"));
        assert!(!is_dotted_host_name("1.5"));
        assert!(!is_dotted_host_name("-bad.example"));
        assert!(!is_dotted_host_name("a..b"));
        assert!(!is_dotted_host_name("2012-11-30 18:22:34"));
    }

    #[test]
    fn test_system_resolver_skips_non_host_text() {
        let resolver = SystemResolver::default();
        assert_eq!(resolver.resolve("blablabla"), None);
        assert_eq!(resolver.resolve("1;2;3"), None);
        assert_eq!(
            resolver.resolve("localhost"),
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
    }
}
