//! `fha update` command - Change fields of one entry

use console::style;
use miette::Result;

use crate::cli::helpers::{fields_from_assignments, parse_assignment, resolve_position};
use crate::cli::{GlobalOpts, Workspace};

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Entry to update (id like FHA-003 or row number)
    pub entry: String,

    /// New field value (KEY=VALUE, repeatable)
    #[arg(long = "set", short = 's', value_parser = parse_assignment, required = true)]
    pub set: Vec<(String, String)>,
}

pub fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let position = resolve_position(&args.entry).map_err(|e| miette::miette!("{}", e))?;
    let mut ws = Workspace::open(global)?;

    let fields = fields_from_assignments(&args.set);
    ws.table.update(position, &fields)?;
    ws.save()?;

    if !global.quiet {
        if let Some(entry) = ws.table.get(position) {
            println!(
                "{} Updated {} ({} field{})",
                style("✓").green(),
                style(&entry.id).cyan(),
                args.set.len(),
                if args.set.len() == 1 { "" } else { "s" }
            );
        }
    }
    Ok(())
}
