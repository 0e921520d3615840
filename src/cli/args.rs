//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, config::ConfigCommands,
    dashboard::DashboardArgs, delete::DeleteArgs, export::ExportArgs, import::ImportArgs,
    init::InitArgs, list::ListArgs, new::NewArgs, update::UpdateArgs, wizard::WizardArgs,
};

#[derive(Parser)]
#[command(name = "fha")]
#[command(author, version, about = "Functional Hazard Analysis Toolkit")]
#[command(long_about = "Functional Hazard Analysis toolkit: maintain a structured FHA table and derive risk dashboards from it.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .fha/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new FHA project
    Init(InitArgs),

    /// Start a new analysis, replacing the current table
    New(NewArgs),

    /// Replace the table with rows from a CSV, TSV, JSON or YAML file
    Import(ImportArgs),

    /// Export the table (CSV by default, columns in schema order)
    Export(ExportArgs),

    /// List table entries
    List(ListArgs),

    /// Append entries to the end of the table
    Add(AddArgs),

    /// Update fields of one entry
    Update(UpdateArgs),

    /// Delete entries
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Expand one entry into several analyzed failure-mode entries
    Wizard(WizardArgs),

    /// Show KPIs, severity breakdown, cross-analysis and summary
    Dashboard(DashboardArgs),

    /// Show severity categories, function types, flight phases and failure modes
    Vocab,

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (human-readable in a terminal)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `Auto` against a configured default
    pub fn or_configured(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}
