//! Client configuration.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "DASHVECTOR";

/// Connection settings for a DashVector cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Cluster endpoint host, e.g. `vrs-cn-xxx.dashvector.cn-hangzhou.aliyuncs.com`.
    /// A value containing `://` is used as-is as the scheme and host.
    pub endpoint: String,
    /// API key sent in the `dashvector-auth-token` header.
    pub api_key: String,
    /// Per-request timeout in milliseconds; `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout_ms: None,
        }
    }

    /// Sets the per-request timeout, kept at millisecond precision. Chainable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis.max(1));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Reads `DASHVECTOR_ENDPOINT` and `DASHVECTOR_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(None, |key| env::var(key).ok())
    }

    /// Reads `DASHVECTOR_<NAME>_ENDPOINT` / `DASHVECTOR_<NAME>_API_KEY`,
    /// falling back to the unnamed variables for whichever is missing.
    pub fn from_env_named(name: &str) -> Result<Self> {
        Self::from_lookup(Some(name), |key| env::var(key).ok())
    }

    fn from_lookup<F>(name: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |suffix: &str| {
            let named = name
                .filter(|n| !n.is_empty())
                .and_then(|n| lookup(&format!("{ENV_PREFIX}_{}_{suffix}", env_segment(n))));
            named
                .or_else(|| lookup(&format!("{ENV_PREFIX}_{suffix}")))
                .filter(|v| !v.is_empty())
        };

        let label = name.unwrap_or("default");
        let endpoint = read("ENDPOINT")
            .ok_or_else(|| Error::Config(format!("cluster endpoint not configured for {label}")))?;
        let api_key = read("API_KEY")
            .ok_or_else(|| Error::Config(format!("api key not configured for {label}")))?;
        let timeout_ms = match read("TIMEOUT_MS") {
            Some(raw) => Some(raw.parse().map_err(|_| {
                Error::Config(format!("invalid timeout for {label}: {raw:?}"))
            })?),
            None => None,
        };

        Ok(Self {
            endpoint,
            api_key,
            timeout_ms,
        })
    }

    /// Base URL all request paths are appended to.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.contains("://") {
            format!("{endpoint}/v1")
        } else {
            format!("https://{endpoint}/v1")
        }
    }
}

fn env_segment(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_keys() {
        let config = ClientConfig::from_lookup(
            None,
            lookup(&[("DASHVECTOR_ENDPOINT", "host"), ("DASHVECTOR_API_KEY", "key")]),
        )
        .unwrap();
        assert_eq!(config, ClientConfig::new("host", "key"));
        assert_eq!(config.base_url(), "https://host/v1");
    }

    #[test]
    fn test_named_keys_fall_back() {
        let config = ClientConfig::from_lookup(
            Some("search-prod"),
            lookup(&[
                ("DASHVECTOR_SEARCH_PROD_ENDPOINT", "prod-host"),
                ("DASHVECTOR_ENDPOINT", "host"),
                ("DASHVECTOR_API_KEY", "shared-key"),
                ("DASHVECTOR_TIMEOUT_MS", "5000"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoint, "prod-host");
        assert_eq!(config.api_key, "shared-key");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = ClientConfig::from_lookup(None, lookup(&[("DASHVECTOR_ENDPOINT", "h")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_explicit_scheme_kept() {
        let config = ClientConfig::new("http://127.0.0.1:8080/", "k");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/v1");
    }

    #[test]
    fn test_deserialize() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"endpoint":"h","api_key":"k","timeout_ms":3000}"#).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let config = ClientConfig::new("h", "k").with_timeout(Duration::from_millis(2500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));

        let config = ClientConfig::new("h", "k").with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));
    }
}
