//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::Project;

/// Table file used when no configuration names one
pub const DEFAULT_TABLE_FILE: &str = "fha-table.csv";

/// Breakdown groups shown before the rest collapse into "Other"
pub const DEFAULT_MAX_GROUPS: usize = 9;

/// FHA configuration with layered hierarchy
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working table file, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_file: Option<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Breakdown group limit for `fha dashboard`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_groups: Option<usize>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load_for(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/fha/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.fha/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_path()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        if let Ok(table_file) = std::env::var("FHA_TABLE_FILE") {
            config.table_file = Some(table_file);
        }
        if let Ok(format) = std::env::var("FHA_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fha")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.table_file.is_some() {
            self.table_file = other.table_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.max_groups.is_some() {
            self.max_groups = other.max_groups;
        }
    }

    /// Table file name, falling back to the default
    pub fn table_file(&self) -> &str {
        self.table_file.as_deref().unwrap_or(DEFAULT_TABLE_FILE)
    }

    pub fn max_groups(&self) -> usize {
        self.max_groups.unwrap_or(DEFAULT_MAX_GROUPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table_file(), DEFAULT_TABLE_FILE);
        assert_eq!(config.max_groups(), DEFAULT_MAX_GROUPS);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut config = Config {
            table_file: Some("a.csv".into()),
            default_format: Some("tsv".into()),
            max_groups: None,
        };
        config.merge(Config {
            table_file: Some("b.csv".into()),
            default_format: None,
            max_groups: Some(4),
        });

        assert_eq!(config.table_file(), "b.csv");
        assert_eq!(config.default_format.as_deref(), Some("tsv"));
        assert_eq!(config.max_groups(), 4);
    }

    #[test]
    fn test_parses_yaml() {
        let config: Config = serde_yml::from_str("table_file: hazards.csv\nmax_groups: 5\n").unwrap();
        assert_eq!(config.table_file(), "hazards.csv");
        assert_eq!(config.max_groups(), 5);
    }
}
