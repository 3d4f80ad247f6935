use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the High Low skill.
///
/// Loaded from `~/.highlow/config.toml` by default. Every field has a
/// default, so a partial (or missing) file is always valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighLowConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl HighLowConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HighLowConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Turn dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound on a single turn (load, transition, save), in milliseconds.
    pub turn_timeout_ms: u64,
    /// Locale assumed when a request does not carry one.
    pub default_locale: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            turn_timeout_ms: 3000,
            default_locale: "en-GB".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = HighLowConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.dispatch.turn_timeout_ms, 3000);
        assert_eq!(config.dispatch.default_locale, "en-GB");
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[dispatch]
turn_timeout_ms = 500
default_locale = "en-US"
"#;
        let file = create_temp_config(content);
        let config = HighLowConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.dispatch.turn_timeout_ms, 500);
        assert_eq!(config.dispatch.default_locale, "en-US");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[dispatch]
turn_timeout_ms = 1000
"#;
        let file = create_temp_config(content);
        let config = HighLowConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.dispatch.turn_timeout_ms, 1000);
        assert_eq!(config.dispatch.default_locale, "en-GB");
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let file = create_temp_config("[general\nlog_level = ");
        let err = HighLowConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, crate::HighLowError::Config(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = HighLowConfig::load_or_default(Path::new("/nonexistent/highlow.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = HighLowConfig::default();
        config.general.log_level = "trace".to_string();
        config.dispatch.turn_timeout_ms = 42;
        config.save(&path).unwrap();

        let reloaded = HighLowConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.log_level, "trace");
        assert_eq!(reloaded.dispatch.turn_timeout_ms, 42);
    }
}
