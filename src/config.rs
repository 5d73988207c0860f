// src/config.rs

use anyhow::{Context, Result};
use std::{env, net::SocketAddr, time::Duration};
use url::Url;

use crate::fetch::DEFAULT_API_URL;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosting settings. The query itself is fixed and not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: Url,
    pub listen: SocketAddr,
    pub log_level: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            listen: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Read `PORT` and `LOG_LEVEL` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
            cfg.listen.set_port(port);
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            cfg.log_level = level.trim().to_string();
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.listen.port(), 8080);
        assert_eq!(cfg.api_url.host_str(), Some("api.scb.se"));
    }

    #[test]
    fn port_and_level_override() {
        let cfg = Config::from_lookup(lookup(&[("PORT", "3000"), ("LOG_LEVEL", "debug")])).unwrap();
        assert_eq!(cfg.listen.port(), 3000);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("PORT", "åtta")])).is_err());
    }
}
