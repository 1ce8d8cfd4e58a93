//! Configuration handling for the setup host

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding where entries are stored
pub const ENTRIES_PATH_ENV: &str = "PLACES_SETUP_ENTRIES";

/// Default tracing filter for the host binary
pub const DEFAULT_LOG_FILTER: &str = "places_setup=info";

/// User configuration for the setup host
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SetupConfig {
    /// File holding created entries
    pub entries_path: Option<PathBuf>,
    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: Option<String>,
}

impl SetupConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "places", "places-setup")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: SetupConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Where entries go: environment, then config file, then the data dir
    pub fn resolve_entries_path(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.entries_path.clone())
            .or_else(crate::store::JsonEntryStore::default_path)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SetupConfig::default();
        assert!(config.entries_path.is_none());
        assert!(config.log_filter.is_none());
        assert_eq!(config.log_filter(), "places_setup=info");
    }

    #[test]
    fn test_serialization() {
        let config = SetupConfig {
            entries_path: Some(PathBuf::from("/var/lib/places/entries.json")),
            log_filter: Some("places_setup=debug".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SetupConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.entries_path,
            Some(PathBuf::from("/var/lib/places/entries.json"))
        );
        assert_eq!(parsed.log_filter(), "places_setup=debug");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: SetupConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.entries_path.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"log_filter": "warn", "unknown_field": "value"}"#;
        let parsed: SetupConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.log_filter(), "warn");
    }

    #[test]
    fn test_env_override_wins() {
        let config = SetupConfig {
            entries_path: Some(PathBuf::from("from-config.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_entries_path(Some("from-env.json".to_string())),
            Some(PathBuf::from("from-env.json"))
        );
    }

    #[test]
    fn test_blank_env_falls_back_to_config() {
        let config = SetupConfig {
            entries_path: Some(PathBuf::from("from-config.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_entries_path(Some("  ".to_string())),
            Some(PathBuf::from("from-config.json"))
        );
    }

    #[test]
    fn test_load_returns_ok() {
        // Load should return default config when file doesn't exist
        let result = SetupConfig::load();
        assert!(result.is_ok());
    }
}
