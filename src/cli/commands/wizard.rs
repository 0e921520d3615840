//! `fha wizard` command - Expand one entry into analyzed failure-mode entries
//!
//! Results come from a file (`--results`), from repeated `--mode` flags, or
//! interactively from the failure-mode catalog of the entry's function type.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::helpers::resolve_position;
use crate::cli::{GlobalOpts, Workspace};
use crate::core::entry::{format_id, Entry, Field, Fields};
use crate::core::{Severity, TableError, Vocabulary};
use crate::tabular;

#[derive(clap::Args, Debug)]
pub struct WizardArgs {
    /// Entry to expand (id like FHA-003 or row number)
    pub entry: String,

    /// Read wizard results (one record per new entry) from a file
    #[arg(long, short = 'r', conflicts_with = "modes")]
    pub results: Option<PathBuf>,

    /// Failure mode for a new entry (repeatable, skips the prompts)
    #[arg(long = "mode", short = 'm')]
    pub modes: Vec<String>,

    /// Severity applied to every entry created with --mode
    #[arg(long, requires = "modes")]
    pub severity: Option<String>,
}

pub fn run(args: WizardArgs, global: &GlobalOpts) -> Result<()> {
    let position = resolve_position(&args.entry).map_err(|e| miette::miette!("{}", e))?;
    let mut ws = Workspace::open(global)?;

    let results = if let Some(path) = &args.results {
        tabular::read_field_maps(path)?
    } else if !args.modes.is_empty() {
        results_from_modes(&args.modes, args.severity.as_deref())?
    } else if std::io::stdin().is_terminal() {
        let source = ws.table.get(position).ok_or(TableError::NotFound {
            position,
            len: ws.table.len(),
        })?;
        prompt_results(source)?
    } else {
        return Err(miette::miette!(
            "No wizard results given; use --results <FILE> or --mode <FAILURE_MODE>"
        ));
    };

    let source_id = format_id(position);
    ws.table.expand_via_wizard(position, &results)?;

    if results.is_empty() {
        if !global.quiet {
            println!("{} No results, {} left unchanged", style("!").yellow(), source_id);
        }
        return Ok(());
    }
    ws.save()?;

    if !global.quiet {
        println!(
            "{} Expanded {} into {} entr{}",
            style("✓").green(),
            style(&source_id).cyan(),
            results.len(),
            if results.len() == 1 { "y" } else { "ies" }
        );
        for entry in &ws.table.entries()[position..position + results.len()] {
            println!(
                "  {} {}",
                style(&entry.id).cyan(),
                style(&entry.failure_mode).yellow()
            );
        }
    }
    Ok(())
}

/// One result per failure mode, with an optional shared severity
fn results_from_modes(modes: &[String], severity: Option<&str>) -> Result<Vec<Fields>> {
    let severity = severity
        .map(|s| {
            Severity::parse(s).ok_or_else(|| {
                miette::miette!(
                    "Unknown severity '{}' (expected one of: {})",
                    s,
                    Severity::ALL.map(|sev| sev.label()).join(", ")
                )
            })
        })
        .transpose()?;

    Ok(modes
        .iter()
        .map(|mode| {
            let mut result = Fields::new();
            result.insert(Field::FailureMode.key().into(), Value::String(mode.clone()));
            if let Some(sev) = severity {
                result.insert(
                    Field::SeverityClassification.key().into(),
                    Value::String(sev.label().to_string()),
                );
            }
            result
        })
        .collect())
}

fn prompt_results(source: &Entry) -> Result<Vec<Fields>> {
    let vocabulary = Vocabulary::builtin().map_err(|e| miette::miette!("{}", e))?;
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{} {} {}",
        style("Failure-mode wizard for").bold(),
        style(&source.id).cyan(),
        style(&source.function_level_1).yellow()
    );
    println!();

    let catalog = vocabulary.failure_modes_for(&source.function_type);
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Failure modes (space to select)")
        .items(catalog)
        .interact()
        .into_diagnostic()?;

    let mut modes: Vec<String> = picked.into_iter().map(|i| catalog[i].clone()).collect();

    let custom: String = Input::with_theme(&theme)
        .with_prompt("Other failure modes (comma-separated)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    modes.extend(
        custom
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from),
    );

    let severities = &vocabulary.severity_categories;
    let mut results = Vec::with_capacity(modes.len());
    for mode in modes {
        println!();
        println!("{}", style(&mode).bold().underlined());

        let mut result = Fields::new();
        result.insert(Field::FailureMode.key().into(), Value::String(mode));

        for field in [
            Field::EffectOnVehicle,
            Field::EffectOnGroundAirspace,
            Field::EffectOnGroundCrew,
        ] {
            let text: String = Input::with_theme(&theme)
                .with_prompt(field.title())
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            result.insert(field.key().into(), Value::String(text));
        }

        let selection = Select::with_theme(&theme)
            .with_prompt(Field::SeverityClassification.title())
            .items(severities)
            .default(0)
            .interact()
            .into_diagnostic()?;
        result.insert(
            Field::SeverityClassification.key().into(),
            Value::String(severities[selection].clone()),
        );

        let rationale: String = Input::with_theme(&theme)
            .with_prompt(Field::Rationale.title())
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        result.insert(Field::Rationale.key().into(), Value::String(rationale));

        results.push(result);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_from_modes_with_severity() {
        let results = results_from_modes(
            &["Loss".to_string(), "Erroneous".to_string()],
            Some("hazardous"),
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["failure_mode"], "Erroneous");
        assert_eq!(results[0]["severity_classification"], "Hazardous");
    }

    #[test]
    fn test_results_from_modes_rejects_unknown_severity() {
        assert!(results_from_modes(&["Loss".to_string()], Some("Severe")).is_err());
    }

    #[test]
    fn test_results_from_modes_without_severity() {
        let results = results_from_modes(&["Loss".to_string()], None).unwrap();
        assert!(!results[0].contains_key("severity_classification"));
    }
}
