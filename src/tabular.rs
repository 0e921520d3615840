//! Tabular boundary - reading external row sources and writing CSV
//!
//! Rows are handed to [`FhaTable::load`] as JSON values so that every source
//! goes through the same schema projection.

use miette::Diagnostic;
use serde_json::Value;
use std::io::{Read, Write};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

use crate::core::entry::{Entry, Field, Fields};
use crate::core::table::{FhaTable, TableError};

/// Errors reading or writing tabular files
#[derive(Debug, Error, Diagnostic)]
pub enum TabularError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Table(#[from] TableError),

    #[error("CSV error: {0}")]
    #[diagnostic(code(fha::tabular::csv))]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(fha::tabular::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(fha::tabular::yaml))]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file type '{0}'")]
    #[diagnostic(
        code(fha::tabular::unsupported),
        help("use a .csv, .tsv, .json, .yaml or .yml file")
    )]
    UnsupportedFormat(String),
}

/// Source file formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Json,
    Yaml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, TabularError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "tsv" => Ok(SourceFormat::Tsv),
            "json" => Ok(SourceFormat::Json),
            "yaml" | "yml" => Ok(SourceFormat::Yaml),
            _ => Err(TabularError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read rows from a file, choosing the decoder by extension
pub fn read_rows(path: &Path) -> Result<Vec<Value>, TabularError> {
    let format = SourceFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    match format {
        SourceFormat::Csv => read_delimited(file, b','),
        SourceFormat::Tsv => read_delimited(file, b'\t'),
        SourceFormat::Json => {
            let value: Value = serde_json::from_reader(file)?;
            into_rows(value)
        }
        SourceFormat::Yaml => {
            let value: Value = serde_yml::from_reader(file)?;
            into_rows(value)
        }
    }
}

/// Read partial field maps (skeletons, wizard results) from a file
pub fn read_field_maps(path: &Path) -> Result<Vec<Fields>, TabularError> {
    read_rows(path)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => Ok(fields),
            _ => Err(TableError::Schema {
                index,
                reason: "expected a record".to_string(),
            }
            .into()),
        })
        .collect()
}

/// Decode CSV with a header row into one record per line.
///
/// Empty cells become empty strings; a row with the wrong number of cells
/// is a schema error.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Value>, TabularError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::UnequalLengths { .. }) => {
                return Err(TableError::Schema {
                    index,
                    reason: e.to_string(),
                }
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        let fields: Fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.trim().to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(Value::Object(fields));
    }
    Ok(rows)
}

/// Accept a top-level list; anything else is not row-shaped
pub fn into_rows(value: Value) -> Result<Vec<Value>, TabularError> {
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(TableError::NotRowShaped(format!(
            "expected a list of records, found {}",
            if other.is_object() { "a single record" } else { "a scalar" }
        ))
        .into()),
    }
}

/// Header style for CSV output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// snake_case keys, re-importable
    #[default]
    Keys,
    /// Human-readable column titles
    Titles,
}

/// Write the table as delimited text, columns in schema order
pub fn write_csv<W: Write>(
    writer: W,
    table: &FhaTable,
    headers: HeaderStyle,
    delimiter: u8,
) -> Result<(), TabularError> {
    write_entries(writer, table.entries(), headers, delimiter)
}

/// Write any selection of entries as delimited text, keeping their ids
pub fn write_entries<'a, W, I>(
    writer: W,
    entries: I,
    headers: HeaderStyle,
    delimiter: u8,
) -> Result<(), TabularError>
where
    W: Write,
    I: IntoIterator<Item = &'a Entry>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(header_row(headers))?;
    for entry in entries {
        writer.write_record(entry.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the table as CSV text
pub fn to_csv_string(table: &FhaTable, headers: HeaderStyle) -> Result<String, TabularError> {
    to_delimited_string(table, headers, b',')
}

/// Render the table with an arbitrary delimiter
pub fn to_delimited_string(
    table: &FhaTable,
    headers: HeaderStyle,
    delimiter: u8,
) -> Result<String, TabularError> {
    entries_to_delimited(table.entries(), headers, delimiter)
}

/// Render a selection of entries with an arbitrary delimiter
pub fn entries_to_delimited<'a, I>(
    entries: I,
    headers: HeaderStyle,
    delimiter: u8,
) -> Result<String, TabularError>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut buf = Vec::new();
    write_entries(&mut buf, entries, headers, delimiter)?;
    String::from_utf8(buf).map_err(|e| TabularError::Io(std::io::Error::other(e)))
}

/// Render a selection of entries as a markdown table
pub fn entries_to_markdown<'a, I>(entries: I, headers: HeaderStyle) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut builder = Builder::default();
    builder.push_record(header_row(headers));
    for entry in entries {
        builder.push_record(entry.to_record());
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    format!("{}\n", table)
}

fn header_row(headers: HeaderStyle) -> Vec<&'static str> {
    Field::ALL
        .iter()
        .map(|f| match headers {
            HeaderStyle::Keys => f.key(),
            HeaderStyle::Titles => f.title(),
        })
        .collect()
}

/// Render the table in the format implied by `path`, ready to be written.
///
/// Everything is encoded before the caller touches the file, so a failed
/// encode leaves the previous contents in place.
pub fn encode_for_path(table: &FhaTable, path: &Path) -> Result<String, TabularError> {
    match SourceFormat::from_path(path)? {
        SourceFormat::Csv => to_delimited_string(table, HeaderStyle::Keys, b','),
        SourceFormat::Tsv => to_delimited_string(table, HeaderStyle::Keys, b'\t'),
        SourceFormat::Json => Ok(serde_json::to_string_pretty(table.entries())? + "\n"),
        SourceFormat::Yaml => Ok(serde_yml::to_string(table.entries())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_csv_with_legacy_headers() {
        let data = "编号,一级功能,失效状态,危害性分类\nFHA-001,Power,Supply interrupted,危险的 (Hazardous)\nFHA-002,Nav,,\n";
        let rows = read_delimited(data.as_bytes(), b',').unwrap();

        let mut table = FhaTable::new();
        table.load(rows).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].function_level_1, "Power");
        assert_eq!(table.entries()[0].severity_classification, "危险的 (Hazardous)");
        assert_eq!(table.entries()[1].failure_mode, "");
        assert_eq!(table.entries()[1].id, "FHA-002");
    }

    #[test]
    fn test_read_csv_ragged_row_is_schema_error() {
        let data = "function_level_1,failure_mode\nPower,Loss\nNav\n";
        let err = read_delimited(data.as_bytes(), b',').unwrap_err();
        match err {
            TabularError::Table(e) => assert!(e.is_schema_error()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_into_rows_rejects_single_record() {
        let err = into_rows(json!({ "function_level_1": "Power" })).unwrap_err();
        assert!(matches!(err, TabularError::Table(TableError::NotRowShaped(_))));
        assert!(into_rows(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_csv_round_trip() {
        let mut table = FhaTable::new();
        table
            .load(vec![
                json!({ "function_level_1": "Power", "rationale": "has, comma" }),
                json!({ "function_level_1": "Nav", "effect_on_vehicle": "line\nbreak" }),
            ])
            .unwrap();

        let text = to_csv_string(&table, HeaderStyle::Keys).unwrap();
        assert!(text.starts_with("id,function_level_1,function_level_2"));

        let mut reloaded = FhaTable::new();
        reloaded
            .load(read_delimited(text.as_bytes(), b',').unwrap())
            .unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_title_headers() {
        let text = to_csv_string(&FhaTable::new(), HeaderStyle::Titles).unwrap();
        assert_eq!(
            text.trim_end(),
            "ID,Function Level 1,Function Level 2,Function Level 3,Function Type,Flight Phase,Failure Mode,Effect on Vehicle,Effect on Ground/Airspace,Effect on Ground Crew,Severity Classification,Rationale"
        );
    }

    #[test]
    fn test_encode_for_path_yaml_reloads() {
        let mut table = FhaTable::new();
        table
            .load(vec![json!({ "function_level_1": "Power", "failure_mode": "Loss" })])
            .unwrap();

        let text = encode_for_path(&table, Path::new("table.yaml")).unwrap();
        let value: Value = serde_yml::from_str(&text).unwrap();
        let mut reloaded = FhaTable::new();
        reloaded.load(into_rows(value).unwrap()).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_markdown_keeps_selected_ids() {
        let mut table = FhaTable::new();
        table
            .load(vec![
                json!({ "function_level_1": "Power" }),
                json!({ "function_level_1": "Nav", "failure_mode": "Loss" }),
            ])
            .unwrap();

        let md = entries_to_markdown(table.entries().iter().filter(|e| e.is_analyzed()), HeaderStyle::Keys);
        assert!(md.starts_with("| id "));
        assert!(md.contains("FHA-002"));
        assert!(!md.contains("FHA-001"));
    }

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a.CSV")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.yml")).unwrap(),
            SourceFormat::Yaml
        );
        assert!(SourceFormat::from_path(Path::new("a.xlsx")).is_err());
    }
}
