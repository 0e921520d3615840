//! `fha vocab` command - Show the lookup vocabularies

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Vocabulary;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let vocabulary = Vocabulary::builtin().map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&vocabulary).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&vocabulary).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            print_list(
                "Severity categories",
                vocabulary
                    .severity_categories
                    .iter()
                    .filter(|s| !s.is_empty()),
            );
            print_list("Function types", vocabulary.function_types.iter());
            print_list("Flight phases", vocabulary.flight_phases.iter());

            println!("{}", style("Failure modes").bold());
            for (function_type, modes) in &vocabulary.failure_modes {
                println!("  {}", style(function_type).cyan());
                for mode in modes {
                    println!("    {}", mode);
                }
            }
        }
    }
    Ok(())
}

fn print_list<'a>(title: &str, items: impl Iterator<Item = &'a String>) {
    println!("{}", style(title).bold());
    for item in items {
        println!("  {}", item);
    }
    println!();
}
