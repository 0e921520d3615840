//! `fha export` command - Write the table for spreadsheets and other tools

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::write_output;
use crate::cli::{GlobalOpts, OutputFormat, Workspace};
use crate::core::FhaTable;
use crate::tabular::{self, HeaderStyle, SourceFormat};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (format follows the extension unless --format is given)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Use human-readable column titles instead of field keys
    #[arg(long)]
    pub titles: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    if ws.table.is_empty() {
        return Err(miette::miette!(
            "Nothing to export: the table has no entries"
        ));
    }

    let headers = if args.titles {
        HeaderStyle::Titles
    } else {
        HeaderStyle::Keys
    };

    let format = match ws.format(global) {
        OutputFormat::Auto => args
            .output
            .as_deref()
            .and_then(|p| SourceFormat::from_path(p).ok())
            .map(|f| match f {
                SourceFormat::Csv => OutputFormat::Csv,
                SourceFormat::Tsv => OutputFormat::Tsv,
                SourceFormat::Json => OutputFormat::Json,
                SourceFormat::Yaml => OutputFormat::Yaml,
            })
            .unwrap_or(OutputFormat::Csv),
        f => f,
    };

    let content = render(&ws.table, format, headers)?;
    write_output(&content, args.output)
}

fn render(table: &FhaTable, format: OutputFormat, headers: HeaderStyle) -> Result<String> {
    let content = match format {
        OutputFormat::Tsv => tabular::to_delimited_string(table, headers, b'\t')?,
        OutputFormat::Json => serde_json::to_string_pretty(table.entries()).into_diagnostic()? + "\n",
        OutputFormat::Yaml => serde_yml::to_string(table.entries()).into_diagnostic()?,
        OutputFormat::Md => tabular::entries_to_markdown(table.entries(), headers),
        OutputFormat::Id => table
            .entries()
            .iter()
            .map(|e| format!("{}\n", e.id))
            .collect(),
        OutputFormat::Csv | OutputFormat::Auto => tabular::to_csv_string(table, headers)?,
    };
    Ok(content)
}
