//! Table engine - the ordered collection of analysis entries
//!
//! Every mutating operation either completes fully (including renumbering)
//! or fails before touching the table.

use miette::Diagnostic;
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

use crate::core::entry::{format_id, Entry, Fields};

/// Errors raised by table operations
#[derive(Debug, Error, Diagnostic)]
pub enum TableError {
    #[error("no entry at position {position} (table has {len} entries)")]
    #[diagnostic(
        code(fha::table::not_found),
        help("positions are 0-based; use `fha list` to see the current rows")
    )]
    NotFound { position: usize, len: usize },

    #[error("row {} cannot be mapped onto the table schema: {reason}", .index + 1)]
    #[diagnostic(code(fha::table::schema))]
    Schema { index: usize, reason: String },

    #[error("input is not row-shaped: {0}")]
    #[diagnostic(
        code(fha::table::not_row_shaped),
        help("expected a list of records with one field per column")
    )]
    NotRowShaped(String),
}

impl TableError {
    /// True for both flavours of schema violation
    pub fn is_schema_error(&self) -> bool {
        matches!(self, TableError::Schema { .. } | TableError::NotRowShaped(_))
    }
}

/// The live analysis table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FhaTable {
    entries: Vec<Entry>,
}

impl FhaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Read-only view of the rows in order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Current contents as field maps, for display and export
    pub fn snapshot(&self) -> Vec<Fields> {
        self.entries.iter().map(Entry::to_fields).collect()
    }

    /// Start a new project, optionally seeded with skeleton rows
    pub fn reset(&mut self, skeleton: &[Fields]) {
        debug!(rows = skeleton.len(), "resetting table");
        self.entries.clear();
        self.append(skeleton);
    }

    /// Replace the table wholesale from external rows.
    ///
    /// Each row must be a record; anything else is a schema error and leaves
    /// the current table untouched.
    pub fn load<I>(&mut self, rows: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut entries = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Value::Object(fields) => entries.push(Entry::from_fields(&fields)),
                other => {
                    return Err(TableError::Schema {
                        index,
                        reason: format!("expected a record, found {}", value_kind(&other)),
                    })
                }
            }
        }

        debug!(rows = entries.len(), "loading table");
        self.entries = entries;
        self.renumber();
        Ok(())
    }

    /// Append new rows built from partial field maps, in the given order
    pub fn append(&mut self, rows: &[Fields]) {
        if rows.is_empty() {
            return;
        }
        self.entries.extend(rows.iter().map(Entry::from_fields));
        self.renumber();
        debug!(added = rows.len(), len = self.len(), "appended entries");
    }

    /// Overwrite the known fields of the entry at `position`
    pub fn update(&mut self, position: usize, fields: &Fields) -> Result<(), TableError> {
        let len = self.len();
        let entry = self
            .entries
            .get_mut(position)
            .ok_or(TableError::NotFound { position, len })?;
        entry.apply(fields);
        self.renumber();
        debug!(position, "updated entry");
        Ok(())
    }

    /// Replace the entry at `source` with one new entry per wizard result.
    ///
    /// Each new entry is the source with its analysis fields cleared, then
    /// overwritten by the keys of its result. Rows before and after the
    /// source keep their relative order around the new block.
    pub fn expand_via_wizard(
        &mut self,
        source: usize,
        results: &[Fields],
    ) -> Result<(), TableError> {
        let template = self.entries.get(source).cloned().ok_or(TableError::NotFound {
            position: source,
            len: self.len(),
        })?;
        if results.is_empty() {
            return Ok(());
        }

        let block: Vec<Entry> = results
            .iter()
            .map(|result| {
                let mut entry = template.clone();
                entry.clear_analysis();
                entry.apply(result);
                entry
            })
            .collect();

        self.entries.splice(source..=source, block);
        self.renumber();
        debug!(source, expanded = results.len(), len = self.len(), "expanded entry");
        Ok(())
    }

    /// Remove the rows at `positions`.
    ///
    /// Duplicates and positions past the end are ignored. Returns the number
    /// of rows actually removed.
    pub fn delete(&mut self, positions: &[usize]) -> usize {
        let valid: BTreeSet<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.entries.len())
            .collect();

        // Descending, so earlier removals don't shift later targets
        for &position in valid.iter().rev() {
            self.entries.remove(position);
        }
        self.renumber();
        debug!(removed = valid.len(), len = self.len(), "deleted entries");
        valid.len()
    }

    fn renumber(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.id = format_id(position);
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}
