//! Configuration with a layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Tool configuration, merged from defaults, the global config file and
/// environment variables (later layers win)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default custodian for new records
    pub custodian: Option<String>,

    /// Default data directory holding inventory.db and accounts.db
    pub data_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/ait/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(custodian) = std::env::var("AIT_CUSTODIAN") {
            config.custodian = Some(custodian);
        }
        if let Ok(data_dir) = std::env::var("AIT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ait")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.custodian.is_some() {
            self.custodian = other.custodian;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Default custodian name, falling back to the OS username
    pub fn custodian(&self) -> String {
        if let Some(ref custodian) = self.custodian {
            return custodian.clone();
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Data directory to use when no `--data-dir` was given
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
