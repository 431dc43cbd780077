use std::time::Duration;

use crate::env::{parsed_or, process_env, string_or};

const DEFAULT_STORE_TIMEOUT_MS: u64 = 2000;

/// Listen address and limits for calls into external stores.
///
/// - `SERVER_HOST` (default `0.0.0.0`)
/// - `SERVER_PORT` (default `8080`)
/// - `STORE_TIMEOUT_MS` (default `2000`): upper bound on a single session
///   store or user directory call; `0` falls back to the default
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let store_timeout_ms =
            match parsed_or(&lookup, "STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS) {
                0 => DEFAULT_STORE_TIMEOUT_MS,
                ms => ms,
            };
        Self {
            host: string_or(&lookup, "SERVER_HOST", &defaults.host),
            port: parsed_or(&lookup, "SERVER_PORT", defaults.port),
            store_timeout: Duration::from_millis(store_timeout_ms),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "1883"),
            ("STORE_TIMEOUT_MS", "250"),
        ]);
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.bind_address(), "127.0.0.1:1883");
        assert_eq!(config.store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let config = ServerConfig::from_lookup(|k| (k == "SERVER_PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_zero_store_timeout_falls_back() {
        let config =
            ServerConfig::from_lookup(|k| (k == "STORE_TIMEOUT_MS").then(|| "0".to_string()));
        assert_eq!(config.store_timeout, Duration::from_millis(2000));
    }
}
