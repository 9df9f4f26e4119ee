//! Bridge configuration
//!
//! Loaded from JSON or from `LOG_BRIDGE_*` environment variables; every field
//! has a default so partial documents are accepted.

use super::error::{LoggerError, Result};
use super::frame_filter::FrameFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_CAPTURE_LOCATION: &str = "LOG_BRIDGE_CAPTURE_LOCATION";
pub const ENV_SOURCE_MAPS: &str = "LOG_BRIDGE_SOURCE_MAPS";
pub const ENV_INTERNAL_MARKERS: &str = "LOG_BRIDGE_INTERNAL_MARKERS";

/// Default time [`LogBridge::flush`](crate::LogBridge::flush) waits for in-flight events.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Capture the caller's stack on every log call
    pub capture_location: bool,

    /// Translate captured locations through inline source maps
    pub resolve_source_maps: bool,

    /// Path markers treated as logging infrastructure, on top of the fixed set
    pub internal_markers: Vec<String>,

    /// Upper bound for draining in-flight events, in milliseconds
    pub flush_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            capture_location: true,
            resolve_source_maps: true,
            internal_markers: Vec::new(),
            flush_timeout_ms: DEFAULT_FLUSH_TIMEOUT.as_millis() as u64,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log_bridge::BridgeConfig;
    ///
    /// let config = BridgeConfig::from_json(r#"{"resolve_source_maps": false}"#).unwrap();
    /// assert!(config.capture_location);
    /// assert!(!config.resolve_source_maps);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `LOG_BRIDGE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_CAPTURE_LOCATION) {
            config.capture_location = parse_flag(ENV_CAPTURE_LOCATION, &value)?;
        }
        if let Some(value) = lookup(ENV_SOURCE_MAPS) {
            config.resolve_source_maps = parse_flag(ENV_SOURCE_MAPS, &value)?;
        }
        if let Some(value) = lookup(ENV_INTERNAL_MARKERS) {
            config.internal_markers = value
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.flush_timeout_ms == 0 {
            return Err(LoggerError::config(
                "BridgeConfig",
                "flush_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.flush_timeout_ms)
    }

    pub fn frame_filter(&self) -> FrameFilter {
        FrameFilter::new().with_markers(self.internal_markers.iter().cloned())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LoggerError::config(
            key,
            format!("expected a boolean flag, got '{}'", other),
        )),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert!(config.capture_location);
        assert!(config.resolve_source_maps);
        assert!(config.internal_markers.is_empty());
        assert_eq!(config.flush_timeout(), DEFAULT_FLUSH_TIMEOUT);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            BridgeConfig::from_json(r#"{"internal_markers": ["/vendor/"], "flush_timeout_ms": 250}"#)
                .unwrap();
        assert!(config.capture_location);
        assert_eq!(config.internal_markers, vec!["/vendor/".to_string()]);
        assert_eq!(config.flush_timeout(), Duration::from_millis(250));
        assert!(config.frame_filter().is_internal("lib/vendor/x.js"));
    }

    #[test]
    fn test_from_json_rejects_zero_timeout() {
        let err = BridgeConfig::from_json(r#"{"flush_timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_from_env_overrides() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_CAPTURE_LOCATION, "0"),
            (ENV_SOURCE_MAPS, "false"),
            (ENV_INTERNAL_MARKERS, "/vendor/, ,/gen/"),
        ]))
        .unwrap();
        assert!(!config.capture_location);
        assert!(!config.resolve_source_maps);
        assert_eq!(config.internal_markers, vec!["/vendor/", "/gen/"]);
    }

    #[test]
    fn test_from_env_empty_is_default() {
        let config = BridgeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_from_env_rejects_bad_flag() {
        let err = BridgeConfig::from_lookup(lookup(&[(ENV_SOURCE_MAPS, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SOURCE_MAPS));
    }
}
