//! Host runtime settings, loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{InteropError, InteropResult};

/// Settings for a [`HostHeap`](crate::HostHeap).
///
/// ```toml
/// intern_string_names = true
/// strict_handles = true
/// max_live_handles = 4096
/// report_leaks_on_drop = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Equal string names share one payload.
    pub intern_string_names: bool,
    /// Releasing a stale handle is an error. When off it is logged and ignored.
    pub strict_handles: bool,
    /// Cap on simultaneously live handles.
    pub max_live_handles: Option<usize>,
    /// Log payloads still alive when the heap is dropped.
    pub report_leaks_on_drop: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            intern_string_names: true,
            strict_handles: true,
            max_live_handles: None,
            report_leaks_on_drop: true,
        }
    }
}

impl RuntimeConfig {
    /// Parses settings from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`InteropError::InvalidConfig`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> InteropResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| InteropError::InvalidConfig(e.to_string()))?;
        if config.max_live_handles == Some(0) {
            return Err(InteropError::InvalidConfig("max_live_handles must be at least 1".into()));
        }
        tracing::debug!(?config, "runtime config loaded");
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`InteropError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> InteropResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InteropError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = RuntimeConfig::from_toml_str("max_live_handles = 16").unwrap();
        assert_eq!(config.max_live_handles, Some(16));
        assert!(config.intern_string_names);
        assert!(config.strict_handles);
        assert_eq!(RuntimeConfig::from_toml_str("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            RuntimeConfig::from_toml_str("strict_handles = \"yes\""),
            Err(InteropError::InvalidConfig(_))
        ));
        assert!(matches!(
            RuntimeConfig::from_toml_str("unknown_key = 1"),
            Err(InteropError::InvalidConfig(_))
        ));
        assert!(matches!(
            RuntimeConfig::from_toml_str("max_live_handles = 0"),
            Err(InteropError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RuntimeConfig::from_toml_file("/nonexistent/meridian.toml").unwrap_err();
        assert!(err.to_string().contains("meridian.toml"));
    }
}
