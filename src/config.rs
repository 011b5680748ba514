//! Engine options, loaded from JSON.
//!
//! ```json
//! { "history_limit": 64 }
//! ```
//! Missing fields take their defaults.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Options for a [`Calculator`](crate::Calculator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of undo steps kept; `None` keeps all of them.
    pub history_limit: Option<usize>,
}

impl EngineConfig {
    /// Parse options from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded config");
        Ok(config)
    }
}

/// Errors that can occur while loading options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        assert_eq!(EngineConfig::from_json("{}"), Ok(EngineConfig::default()));
        assert_eq!(EngineConfig::default().history_limit, None);
    }

    #[test]
    fn test_history_limit() {
        let config = EngineConfig::from_json(r#"{ "history_limit": 64 }"#).unwrap();
        assert_eq!(config.history_limit, Some(64));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "history_limit": "many" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load("/nonexistent/terncalc.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
