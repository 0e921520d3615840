//! Function x severity cross-tabulation

use serde::Serialize;

use crate::core::entry::Entry;
use crate::core::severity::Severity;

use super::bucket_first_seen;

/// Count matrix: one row per top-level function, one column per severity
/// category that occurs in the data (blank and "No Safety Effect" excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<Severity>,
    pub data: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Tabulate entries that already have a function and a classification.
    ///
    /// Rows keep first-seen order; columns follow the fixed severity order.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let buckets = bucket_first_seen(entries, |e| e.function_level_1.clone());

        let present: Vec<Severity> = buckets
            .iter()
            .flat_map(|(_, members)| members.iter())
            .filter_map(|e| Severity::parse(&e.severity_classification))
            .collect();
        let columns: Vec<Severity> = Severity::ALL
            .into_iter()
            .filter(|sev| *sev != Severity::NoSafetyEffect && present.contains(sev))
            .collect();

        let data = buckets
            .iter()
            .map(|(_, members)| {
                columns
                    .iter()
                    .map(|col| {
                        members
                            .iter()
                            .filter(|e| Severity::parse(&e.severity_classification) == Some(*col))
                            .count()
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: buckets.into_iter().map(|(name, _)| name).collect(),
            columns,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_index(&self, function: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == function)
    }

    pub fn column_index(&self, severity: Severity) -> Option<usize> {
        self.columns.iter().position(|c| *c == severity)
    }

    /// Cell count, 0 when the row or column is absent
    pub fn count(&self, function: &str, severity: Severity) -> usize {
        match (self.row_index(function), self.column_index(severity)) {
            (Some(r), Some(c)) => self.data[r][c],
            _ => 0,
        }
    }

    /// Short column headers for display
    pub fn column_labels(&self) -> Vec<&'static str> {
        self.columns.iter().map(Severity::short_label).collect()
    }

    /// True when at least one Catastrophic or Hazardous column exists
    pub fn has_high_risk_column(&self) -> bool {
        self.columns.iter().any(Severity::is_high_risk)
    }

    /// Row with the most Catastrophic + Hazardous entries.
    ///
    /// Ties go to the earliest row. `None` without a high-risk column.
    pub fn top_high_risk_row(&self) -> Option<&str> {
        if !self.has_high_risk_column() {
            return None;
        }
        let high: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_high_risk())
            .map(|(i, _)| i)
            .collect();

        let mut best: Option<(usize, usize)> = None;
        for (r, cells) in self.data.iter().enumerate() {
            let sum: usize = high.iter().map(|&c| cells[c]).sum();
            if best.map_or(true, |(_, max)| sum > max) {
                best = Some((r, sum));
            }
        }
        best.map(|(r, _)| self.rows[r].as_str())
    }
}
