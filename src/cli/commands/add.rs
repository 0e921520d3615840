//! `fha add` command - Append entries to the end of the table

use console::style;
use miette::Result;

use crate::cli::helpers::{fields_from_assignments, parse_assignment};
use crate::cli::{GlobalOpts, Workspace};

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Field value for the new entries (KEY=VALUE, repeatable)
    #[arg(long = "set", short = 's', value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Number of identical entries to append
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open(global)?;

    let fields = fields_from_assignments(&args.set);
    let rows = vec![fields; args.count];
    let first = ws.table.len();
    ws.table.append(&rows);
    ws.save()?;

    if !global.quiet {
        for entry in &ws.table.entries()[first..] {
            println!("{} Added {}", style("✓").green(), style(&entry.id).cyan());
        }
    }
    Ok(())
}
