//! Evaluation context for parsing, casting and reading values.
//!
//! Almost everything in this crate is a pure function of its inputs. The exceptions
//! are collected here as injected capabilities:
//!
//! - the [`Clock`] behind the DATE/TIMESTAMP "now" defaults,
//! - the [`HostResolver`] behind INET_ADDRESS inference,
//! - the [`TypeRegistry`] behind TYPE_REF and ENUM_REF,
//! - user date layouts and the set of URL schemes.
//!
//! Context-free entry points (`parse`, `cast`, `get_*`) use [`AttrContext::global`],
//! a lazily built default with the system clock and a static resolver.

use crate::clock::{Clock, SystemClock};
use crate::config::{AttrKitConfig, DEFAULT_URL_SCHEMES};
use crate::registry::TypeRegistry;
use crate::resolver::{HostResolver, StaticResolver, SystemResolver};
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<AttrContext> = Lazy::new(AttrContext::default);

#[derive(Debug, Clone)]
pub struct AttrContext {
    clock: Arc<dyn Clock>,
    resolver: Arc<dyn HostResolver>,
    registry: Arc<TypeRegistry>,
    date_formats: Vec<String>,
    url_schemes: Vec<String>,
}

impl Default for AttrContext {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            resolver: Arc::new(StaticResolver::new()),
            registry: Arc::new(TypeRegistry::builtin()),
            date_formats: Vec::new(),
            url_schemes: DEFAULT_URL_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AttrContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared default context.
    pub fn global() -> &'static AttrContext {
        &GLOBAL
    }

    pub fn from_config(config: &AttrKitConfig) -> Self {
        let table = StaticResolver::with_hosts(config.hosts.iter().map(|(k, v)| (k, *v)));
        let resolver: Arc<dyn HostResolver> = if config.resolve_hosts {
            Arc::new(SystemResolver::new(table))
        } else {
            Arc::new(table)
        };
        Self {
            resolver,
            date_formats: config.date_formats.clone(),
            url_schemes: config
                .url_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn resolver(&self) -> &dyn HostResolver {
        self.resolver.as_ref()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    pub fn is_url_scheme(&self, scheme: &str) -> bool {
        self.url_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::net::IpAddr;

    #[test]
    fn test_default_context() {
        let ctx = AttrContext::global();
        assert!(ctx.is_url_scheme("HTTP"));
        assert!(!ctx.is_url_scheme("urn"));
        assert!(ctx.registry().contains_type("uuid::Uuid"));
        assert!(ctx.resolver().resolve("www.example.org").is_none());
    }

    #[test]
    fn test_from_config() {
        let mut config = AttrKitConfig::default();
        config.set("hosts", "db=10.0.0.5").unwrap();
        config.set("url_schemes", "HTTP,urn").unwrap();
        config.set("date_formats", "%d/%m/%Y").unwrap();

        let ctx = AttrContext::from_config(&config);
        assert_eq!(
            ctx.resolver().resolve("DB"),
            Some("10.0.0.5".parse::<IpAddr>().unwrap())
        );
        assert!(ctx.is_url_scheme("urn"));
        assert!(!ctx.is_url_scheme("mailto"));
        assert_eq!(ctx.date_formats(), ["%d/%m/%Y".to_string()]);
    }

    #[test]
    fn test_with_clock() {
        let ctx = AttrContext::new().with_clock(FixedClock::at_millis(42));
        assert_eq!(ctx.clock().now_millis(), 42);
    }
}
