//! `fha list` command - Show table entries

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::truncate_str;
use crate::cli::{GlobalOpts, OutputFormat, Workspace};
use crate::core::entry::Entry;
use crate::core::severity::short_form;
use crate::tabular::{self, HeaderStyle};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only entries with a failure mode
    #[arg(long, short = 'a')]
    pub analyzed: bool,

    /// Only entries whose level-1 function matches (case-insensitive)
    #[arg(long = "function", short = 'F')]
    pub function: Option<String>,

    /// Print only the number of matching entries
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;

    let entries: Vec<&Entry> = ws
        .table
        .entries()
        .iter()
        .filter(|e| !args.analyzed || e.is_analyzed())
        .filter(|e| match &args.function {
            Some(f) => e.function_level_1.eq_ignore_ascii_case(f),
            None => true,
        })
        .collect();

    if args.count {
        println!("{}", entries.len());
        return Ok(());
    }

    let format = match ws.format(global) {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    if entries.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Yaml => println!("[]"),
            OutputFormat::Id => {}
            _ => {
                println!("No entries found.");
                println!();
                println!(
                    "Start one with: {}",
                    style("fha add --set function_level_1=<NAME>").yellow()
                );
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&entries).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let csv = tabular::entries_to_delimited(entries.iter().copied(), HeaderStyle::Keys, b',')?;
            print!("{}", csv);
        }
        OutputFormat::Md => {
            print!(
                "{}",
                tabular::entries_to_markdown(entries.iter().copied(), HeaderStyle::Titles)
            );
        }
        OutputFormat::Id => {
            for entry in &entries {
                println!("{}", entry.id);
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<9} {:<18} {:<18} {:<14} {:<28} {:<14}",
                style("ID").bold(),
                style("FUNCTION").bold(),
                style("SUB-FUNCTION").bold(),
                style("PHASE").bold(),
                style("FAILURE MODE").bold(),
                style("SEVERITY").bold()
            );
            println!("{}", "-".repeat(106));

            for entry in &entries {
                println!(
                    "{:<9} {:<18} {:<18} {:<14} {:<28} {:<14}",
                    entry.id,
                    truncate_str(&entry.function_level_1, 16),
                    truncate_str(&entry.function_level_2, 16),
                    truncate_str(&entry.flight_phase, 12),
                    truncate_str(&entry.failure_mode, 26),
                    short_form(&entry.severity_classification)
                );
            }

            println!();
            println!(
                "{} entr{} ({} of {} analyzed)",
                style(entries.len()).cyan(),
                if entries.len() == 1 { "y" } else { "ies" },
                entries.iter().filter(|e| e.is_analyzed()).count(),
                ws.table.len()
            );
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
