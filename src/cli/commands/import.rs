//! `fha import` command - Replace the table from an external file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::{GlobalOpts, Workspace};
use crate::core::FhaTable;
use crate::tabular;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// File to import (.csv, .tsv, .json, .yaml)
    pub file: PathBuf,

    /// Validate the file without replacing the table
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let mut ws = Workspace::open_for_replace(global)?;

    if !global.quiet {
        println!(
            "{} Importing entries from {}{}",
            style("→").blue(),
            style(args.file.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
    }

    let rows = tabular::read_rows(&args.file)?;
    let mut imported = FhaTable::new();
    imported.load(rows)?;
    let analyzed = imported.entries().iter().filter(|e| e.is_analyzed()).count();

    if !args.dry_run {
        ws.table = imported.clone();
        ws.save()?;
    }

    if !global.quiet {
        println!(
            "{} {} {} entr{} ({} analyzed)",
            style("✓").green(),
            if args.dry_run { "Would load" } else { "Loaded" },
            style(imported.len()).cyan(),
            if imported.len() == 1 { "y" } else { "ies" },
            analyzed
        );
    }
    Ok(())
}
