//! The live table of a project, loaded for one command and written back

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, FhaTable, Project};
use crate::tabular;

/// A project together with its configuration and current table
pub struct Workspace {
    pub project: Project,
    pub config: Config,
    pub table: FhaTable,
}

impl Workspace {
    /// Locate the project and load its table.
    ///
    /// A missing table file is an empty table.
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project = discover(global)?;
        let config = Config::load_for(Some(&project));
        let path = project.table_path(&config);

        let mut table = FhaTable::new();
        if path.exists() {
            let rows = tabular::read_rows(&path)?;
            table.load(rows)?;
        }
        debug!(path = %path.display(), rows = table.len(), "opened workspace");

        Ok(Self {
            project,
            config,
            table,
        })
    }

    /// Locate the project without reading its current table.
    ///
    /// For commands that replace the table wholesale, so a damaged table
    /// file can still be overwritten.
    pub fn open_for_replace(global: &GlobalOpts) -> Result<Self> {
        let project = discover(global)?;
        let config = Config::load_for(Some(&project));
        debug!(
            path = %project.table_path(&config).display(),
            "opened workspace for replacement"
        );

        Ok(Self {
            project,
            config,
            table: FhaTable::new(),
        })
    }

    pub fn table_path(&self) -> PathBuf {
        self.project.table_path(&self.config)
    }

    /// Output format after applying the configured default
    pub fn format(&self, global: &GlobalOpts) -> OutputFormat {
        global
            .format
            .or_configured(self.config.default_format.as_deref())
    }

    /// Write the table back to the project's table file
    pub fn save(&self) -> Result<()> {
        let path = self.table_path();
        let text = tabular::encode_for_path(&self.table, &path)?;
        std::fs::write(&path, text).into_diagnostic()?;
        debug!(path = %path.display(), rows = self.table.len(), "saved table");
        Ok(())
    }
}

/// Find the project from `--project` or the current directory
pub fn discover(global: &GlobalOpts) -> Result<Project> {
    let project = match &global.project {
        Some(root) => Project::discover_from(root),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}
