//! `fha delete` command - Remove entries

use console::style;
use miette::Result;
use std::collections::BTreeSet;

use crate::cli::helpers::resolve_position;
use crate::cli::{GlobalOpts, Workspace};

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Entries to delete (ids like FHA-003 or row numbers)
    #[arg(required = true)]
    pub entries: Vec<String>,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let positions = args
        .entries
        .iter()
        .map(|r| resolve_position(r))
        .collect::<Result<Vec<usize>, String>>()
        .map_err(|e| miette::miette!("{}", e))?;

    let mut ws = Workspace::open(global)?;
    let removed = ws.table.delete(&positions);
    if removed > 0 {
        ws.save()?;
    }

    if !global.quiet {
        let distinct: BTreeSet<usize> = positions.iter().copied().collect();
        let skipped = distinct.len() - removed;
        println!(
            "{} Deleted {} entr{}, {} remaining",
            style("✓").green(),
            style(removed).cyan(),
            if removed == 1 { "y" } else { "ies" },
            ws.table.len()
        );
        if skipped > 0 {
            println!(
                "{} {} reference{} did not match a row and {} ignored",
                style("!").yellow(),
                skipped,
                if skipped == 1 { "" } else { "s" },
                if skipped == 1 { "was" } else { "were" }
            );
        }
    }
    Ok(())
}
