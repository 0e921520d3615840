//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::Config;

/// Name of the marker directory at the project root
pub const PROJECT_DIR: &str = ".fha";

/// Represents an FHA project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project (parent of .fha/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::init_force(&root)
    }

    /// Initialize even if .fha/ exists, rewriting the default config
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        let fha_dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(&fha_dir)
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(fha_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# FHA Project Configuration

# Working table file, relative to the project root
# table_file: fha-table.csv

# Default output format (auto, tsv, csv, json, yaml, md)
# default_format: auto

# Function groups shown in the dashboard breakdown before the rest
# are merged into "Other"
# max_groups: 9
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .fha configuration directory
    pub fn fha_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Get the project config file path
    pub fn config_path(&self) -> PathBuf {
        self.fha_dir().join("config.yaml")
    }

    /// Path of the working table file
    pub fn table_path(&self, config: &Config) -> PathBuf {
        self.root.join(config.table_file())
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an FHA project (searched from {searched_from:?}). Run 'fha init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("FHA project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.fha_dir().is_dir());
        assert!(project.config_path().exists());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
        assert!(Project::init_force(tmp.path()).is_ok());
    }

    #[test]
    fn test_project_discover_finds_fha_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_fha_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_table_path_uses_config() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let config = Config {
            table_file: Some("hazards.csv".into()),
            ..Default::default()
        };
        assert_eq!(project.table_path(&config), project.root().join("hazards.csv"));
    }
}
