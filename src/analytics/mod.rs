//! Analytics engine - dashboard statistics derived from the table
//!
//! Everything here is a pure function of a table snapshot and is recomputed
//! in full on every call.

pub mod breakdown;
pub mod crosstab;
pub mod summary;

use serde::Serialize;
use tracing::debug;

use crate::core::entry::Entry;
use crate::core::severity::Severity;

pub use breakdown::{Breakdown, FunctionNode, LegendItem, SeverityLeaf};
pub use crosstab::CrossTab;
pub use summary::{NO_ANALYZED, NO_DATA};

/// Headline counts over analyzed entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub catastrophic: usize,
    pub hazardous: usize,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub kpis: Kpis,
    pub breakdown: Breakdown,
    pub cross_tab: CrossTab,
    pub summary: String,
}

impl DashboardReport {
    /// Report for a table without analyzed entries
    pub fn empty() -> Self {
        Self {
            kpis: Kpis::default(),
            breakdown: Breakdown::default(),
            cross_tab: CrossTab::default(),
            summary: NO_DATA.to_string(),
        }
    }
}

/// Compute the dashboard for the given rows
pub fn compute_dashboard(entries: &[Entry]) -> DashboardReport {
    let analyzed: Vec<&Entry> = entries.iter().filter(|e| e.is_analyzed()).collect();
    if analyzed.is_empty() {
        return DashboardReport::empty();
    }

    let count_of = |sev: Severity| {
        analyzed
            .iter()
            .filter(|e| Severity::parse(&e.severity_classification) == Some(sev))
            .count()
    };
    let kpis = Kpis {
        total: analyzed.len(),
        catastrophic: count_of(Severity::Catastrophic),
        hazardous: count_of(Severity::Hazardous),
    };

    let classified: Vec<&Entry> = analyzed
        .iter()
        .copied()
        .filter(|e| !e.function_level_1.is_empty() && !e.severity_classification.is_empty())
        .collect();

    let breakdown = Breakdown::from_entries(classified.iter().copied().filter(|e| {
        Severity::parse(&e.severity_classification) != Some(Severity::NoSafetyEffect)
    }));
    let cross_tab = CrossTab::from_entries(classified.iter().copied());
    let summary = summary::narrative(&kpis, &cross_tab);

    debug!(
        total = kpis.total,
        groups = breakdown.children.len(),
        rows = cross_tab.rows.len(),
        "computed dashboard"
    );

    DashboardReport {
        kpis,
        breakdown,
        cross_tab,
        summary,
    }
}

/// Split entries into buckets keyed by `key`, in first-seen key order
pub(crate) fn bucket_first_seen<'a, I, K, F>(entries: I, key: F) -> Vec<(K, Vec<&'a Entry>)>
where
    I: IntoIterator<Item = &'a Entry>,
    K: PartialEq,
    F: Fn(&Entry) -> K,
{
    let mut buckets: Vec<(K, Vec<&'a Entry>)> = Vec::new();
    for entry in entries {
        let k = key(entry);
        match buckets.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(entry),
            None => buckets.push((k, vec![entry])),
        }
    }
    buckets
}
