//! CLI command implementations

pub mod add;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod new;
pub mod update;
pub mod vocab;
pub mod wizard;

use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            eprintln!("Written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
