use std::path::Path;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HustleError;
use crate::error::Result;
use crate::persistence::STORE_KEY;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| HustleError::Config(err.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: STORE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub toast_ms: u64,
    pub start_route: String,
    pub export_dir: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: 1400,
            start_route: "#/".to_string(),
            export_dir: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "hustle.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = Config::from_toml_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.key, "hhss_v1");
        assert_eq!(config.ui.toast_ms, 1400);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [ui]
            toast_ms = 900

            [storage]
            data_dir = "/var/lib/hustle"
            "#,
        )
        .expect("parse");
        assert_eq!(config.ui.toast_ms, 900);
        assert_eq!(config.ui.start_route, "#/");
        assert_eq!(
            config.storage.data_dir.as_deref(),
            Some(Path::new("/var/lib/hustle"))
        );
        assert_eq!(config.storage.key, "hhss_v1");
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = Config::from_toml_str("[ui\ntoast_ms = ").expect_err("invalid");
        assert!(matches!(err, HustleError::Config(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tmpdir");
        let config = Config::load(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config, Config::default());
    }
}
