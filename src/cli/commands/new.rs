//! `fha new` command - Start a new analysis from an optional skeleton

use console::style;
use miette::Result;
use serde_json::Value;
use std::path::PathBuf;

use crate::cli::{GlobalOpts, Workspace};
use crate::core::entry::{Field, Fields};
use crate::tabular;

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Skeleton rows to start from (CSV, TSV, JSON or YAML)
    #[arg(long, short = 's')]
    pub skeleton: Option<PathBuf>,

    /// Add a top-level function row (repeatable, appended after the skeleton)
    #[arg(long = "function")]
    pub functions: Vec<String>,

    /// Function type for rows added with --function
    #[arg(long)]
    pub function_type: Option<String>,

    /// Flight phase for rows added with --function
    #[arg(long)]
    pub phase: Option<String>,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open_for_replace(global)?;

    let mut skeleton: Vec<Fields> = match &args.skeleton {
        Some(path) => tabular::read_field_maps(path)?,
        None => Vec::new(),
    };
    for function in &args.functions {
        let mut row = Fields::new();
        row.insert(Field::FunctionLevel1.key().into(), Value::String(function.clone()));
        if let Some(function_type) = &args.function_type {
            row.insert(Field::FunctionType.key().into(), Value::String(function_type.clone()));
        }
        if let Some(phase) = &args.phase {
            row.insert(Field::FlightPhase.key().into(), Value::String(phase.clone()));
        }
        skeleton.push(row);
    }

    ws.table.reset(&skeleton);
    ws.save()?;

    if !global.quiet {
        println!(
            "{} New analysis created with {} entr{} in {}",
            style("✓").green(),
            style(ws.table.len()).cyan(),
            if ws.table.len() == 1 { "y" } else { "ies" },
            style(ws.table_path().display()).yellow()
        );
    }
    Ok(())
}
