use crate::error::{AttrKitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;

const CONFIG_FILENAME: &str = "config.json";

/// Schemes read as URL rather than URI by the parser.
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "jar", "mailto"];

pub const CONFIG_KEYS: &[&str] = &["date_formats", "url_schemes", "hosts", "resolve_hosts"];

/// Configuration for attrkit, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttrKitConfig {
    /// Extra chrono layouts tried when reading dates (e.g. "%d/%m/%Y")
    #[serde(default)]
    pub date_formats: Vec<String>,

    /// Schemes classified as URL; any other scheme parses as URI
    #[serde(default = "default_url_schemes")]
    pub url_schemes: Vec<String>,

    /// Extra host names recognized as network addresses without a lookup
    #[serde(default)]
    pub hosts: BTreeMap<String, IpAddr>,

    /// Ask the operating system to resolve dotted host names
    #[serde(default)]
    pub resolve_hosts: bool,
}

fn default_url_schemes() -> Vec<String> {
    DEFAULT_URL_SCHEMES.iter().map(|s| s.to_string()).collect()
}

impl Default for AttrKitConfig {
    fn default() -> Self {
        Self {
            date_formats: Vec::new(),
            url_schemes: default_url_schemes(),
            hosts: BTreeMap::new(),
            resolve_hosts: false,
        }
    }
}

impl AttrKitConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AttrKitConfig = serde_json::from_str(&content)?;
        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        debug!(path = %config_path.display(), "saved config");
        Ok(())
    }

    /// Textual value of a key, as shown by the `config` command.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "date_formats" => Some(self.date_formats.join(",")),
            "url_schemes" => Some(self.url_schemes.join(",")),
            "hosts" => Some(
                self.hosts
                    .iter()
                    .map(|(name, addr)| format!("{}={}", name, addr))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "resolve_hosts" => Some(self.resolve_hosts.to_string()),
            _ => None,
        }
    }

    /// Sets a key from text. List values are comma-separated.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "date_formats" => {
                let formats = split_list(value);
                if let Some(bad) = formats.iter().find(|f| !is_valid_layout(f)) {
                    return Err(AttrKitError::Config(format!(
                        "invalid date layout: {}",
                        bad
                    )));
                }
                self.date_formats = formats;
            }
            "url_schemes" => {
                self.url_schemes = split_list(value)
                    .into_iter()
                    .map(|s| s.to_ascii_lowercase())
                    .collect();
            }
            "hosts" => {
                let mut hosts = BTreeMap::new();
                for entry in split_list(value) {
                    let (name, addr) = entry.split_once('=').ok_or_else(|| {
                        AttrKitError::Config(format!("expected name=address, got {}", entry))
                    })?;
                    let addr: IpAddr = addr.trim().parse().map_err(|_| {
                        AttrKitError::Config(format!("invalid address: {}", addr.trim()))
                    })?;
                    hosts.insert(name.trim().to_ascii_lowercase(), addr);
                }
                self.hosts = hosts;
            }
            "resolve_hosts" => {
                self.resolve_hosts = crate::attr::format::parse_boolean(value).ok_or_else(|| {
                    AttrKitError::Config(format!("expected true or false, got {}", value))
                })?;
            }
            _ => {
                return Err(AttrKitError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_valid_layout(layout: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    !StrftimeItems::new(layout).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AttrKitConfig::default();
        assert!(config.date_formats.is_empty());
        assert!(config.url_schemes.contains(&"mailto".to_string()));
        assert!(!config.resolve_hosts);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = AttrKitConfig::load(temp.path().join("absent")).unwrap();
        assert_eq!(config, AttrKitConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let mut config = AttrKitConfig::default();
        config.set("date_formats", "%d/%m/%Y, %Y%m%d").unwrap();
        config.set("hosts", "build=10.0.0.7").unwrap();
        config.save(&dir).unwrap();

        let loaded = AttrKitConfig::load(&dir).unwrap();
        assert_eq!(loaded.date_formats, vec!["%d/%m/%Y", "%Y%m%d"]);
        assert_eq!(loaded.get("hosts").unwrap(), "build=10.0.0.7");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AttrKitConfig = serde_json::from_str(r#"{"resolve_hosts": true}"#).unwrap();
        assert!(config.resolve_hosts);
        assert_eq!(config.url_schemes, default_url_schemes());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = AttrKitConfig::default();
        assert!(config.set("date_formats", "%Q").is_err());
        assert!(config.set("hosts", "nohost").is_err());
        assert!(config.set("hosts", "a=999.1.1.1").is_err());
        assert!(config.set("resolve_hosts", "sometimes").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, AttrKitConfig::default());
    }

    #[test]
    fn test_set_resolve_hosts() {
        let mut config = AttrKitConfig::default();
        config.set("resolve_hosts", "yes").unwrap();
        assert_eq!(config.get("resolve_hosts").unwrap(), "true");
    }
}
