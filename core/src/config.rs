//! Adapter configuration.
//!
//! The base address and timeout are fixed for the lifetime of an `Adapter`
//! and handed to its constructor. `from_env` is a convenience for binaries;
//! library code never reads the environment on its own.
//!
//! | Variable               | Default                       |
//! |------------------------|-------------------------------|
//! | `MUSEO_API_URL`        | `http://localhost:3000/api`   |
//! | `MUSEO_API_TIMEOUT_MS` | `5000`                        |

use std::time::Duration;

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

pub const BASE_URL_VAR: &str = "MUSEO_API_URL";
pub const TIMEOUT_VAR: &str = "MUSEO_API_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the process environment, falling back to
    /// the defaults for anything absent or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {TIMEOUT_VAR}");
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self { base_url, timeout }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn overrides_from_environment() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://museos.local/api"),
            (TIMEOUT_VAR, "250"),
        ]));
        assert_eq!(config.base_url, "http://museos.local/api");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = ApiConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        let config = ApiConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn blank_base_url_falls_back() {
        let config = ApiConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  ")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
