//! Startup configuration
//!
//! Values come from a key lookup (environment variables natively,
//! compile-time `option_env!` in the browser build).

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const ENV_STORE_URL: &str = "TRACKER_STORE_URL";
pub const ENV_STORE_KEY: &str = "TRACKER_STORE_KEY";
pub const ENV_STORE_SCHEMA: &str = "TRACKER_STORE_SCHEMA";
pub const ENV_REFRESH_SECS: &str = "TRACKER_REFRESH_SECS";
pub const ENV_PAUSE_SECS: &str = "TRACKER_PAUSE_SECS";
pub const ENV_NOTICE_TTL_MS: &str = "TRACKER_NOTICE_TTL_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid store url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{0} is set but {1} is missing")]
    Missing(&'static str, &'static str),
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Connection settings for the hosted store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_schema() -> String {
    "public".to_string()
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            schema: default_schema(),
        }
    }

    /// Parsed base URL, always ending without a trailing slash segment
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let trimmed = self.url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: "expected an http(s) url".to_string(),
            });
        }
        Ok(url)
    }
}

/// Timing knobs for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    #[serde(deserialize_with = "positive")]
    pub refresh_secs: u32,
    #[serde(deserialize_with = "positive")]
    pub pause_secs: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 5,
            pause_secs: 60,
        }
    }
}

impl DashboardSettings {
    /// Never zero, so interval timers always advance
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_secs.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// `None` runs the app offline on the in-memory store
    pub remote: Option<RemoteConfig>,
    pub dashboard: DashboardSettings,
    #[serde(deserialize_with = "positive")]
    pub notice_ttl_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            remote: None,
            dashboard: DashboardSettings::default(),
            notice_ttl_ms: 3000,
        }
    }
}

impl TrackerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = TrackerConfig::default();

        config.remote = match (get(ENV_STORE_URL), get(ENV_STORE_KEY)) {
            (Some(url), Some(key)) => {
                let mut remote = RemoteConfig::new(url, key);
                if let Some(schema) = get(ENV_STORE_SCHEMA) {
                    remote.schema = schema;
                }
                remote.base_url()?;
                Some(remote)
            }
            (Some(_), None) => return Err(ConfigError::Missing(ENV_STORE_URL, ENV_STORE_KEY)),
            (None, Some(_)) => return Err(ConfigError::Missing(ENV_STORE_KEY, ENV_STORE_URL)),
            (None, None) => None,
        };

        if let Some(value) = get(ENV_REFRESH_SECS) {
            config.dashboard.refresh_secs = parse_positive(ENV_REFRESH_SECS, &value)?;
        }
        if let Some(value) = get(ENV_PAUSE_SECS) {
            config.dashboard.pause_secs = parse_positive(ENV_PAUSE_SECS, &value)?;
        }
        if let Some(value) = get(ENV_NOTICE_TTL_MS) {
            config.notice_ttl_ms = parse_positive(ENV_NOTICE_TTL_MS, &value)?;
        }

        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}

fn positive<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value == 0 {
        return Err(serde::de::Error::custom("expected a positive integer, got 0"));
    }
    Ok(value)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_offline() {
        let config = TrackerConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.is_offline());
        assert_eq!(config.dashboard.refresh_secs, 5);
        assert_eq!(config.dashboard.pause_secs, 60);
        assert_eq!(config.notice_ttl_ms, 3000);
    }

    #[test]
    fn test_remote_settings() {
        let config = TrackerConfig::from_lookup(lookup(&[
            (ENV_STORE_URL, "https://demo.example.co/"),
            (ENV_STORE_KEY, "anon"),
            (ENV_REFRESH_SECS, "10"),
        ]))
        .unwrap();
        let remote = config.remote.unwrap();
        assert_eq!(remote.schema, "public");
        assert_eq!(remote.base_url().unwrap().as_str(), "https://demo.example.co/");
        assert_eq!(config.dashboard.refresh_secs, 10);
    }

    #[test]
    fn test_url_without_key_is_rejected() {
        let err = TrackerConfig::from_lookup(lookup(&[(ENV_STORE_URL, "https://x.co")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_STORE_URL, ENV_STORE_KEY));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let err = TrackerConfig::from_lookup(lookup(&[
            (ENV_STORE_URL, "not a url"),
            (ENV_STORE_KEY, "k"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = TrackerConfig::from_lookup(lookup(&[(ENV_PAUSE_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"dashboard":{"pause_secs":30}}"#).unwrap();
        assert_eq!(config.dashboard.pause_secs, 30);
        assert_eq!(config.dashboard.refresh_secs, 5);
        assert!(config.remote.is_none());
    }

    #[test]
    fn test_deserialize_rejects_zero_durations() {
        let err = serde_json::from_str::<TrackerConfig>(r#"{"dashboard":{"refresh_secs":0}}"#).unwrap_err();
        assert!(err.to_string().contains("positive"));
        assert!(serde_json::from_str::<TrackerConfig>(r#"{"notice_ttl_ms":0}"#).is_err());

        let settings = DashboardSettings {
            refresh_secs: 0,
            pause_secs: 60,
        };
        assert_eq!(settings.refresh_interval(), Duration::from_secs(1));
    }
}
