//! Two-level severity breakdown (function -> severity) for sunburst charts

use serde::Serialize;

use crate::core::entry::Entry;
use crate::core::severity::{short_form, Severity};

use super::bucket_first_seen;

/// Name of the root node
pub const BREAKDOWN_ROOT: &str = "FHA Risk";

/// Name of the node that absorbs groups beyond the display limit
pub const OTHER_GROUP: &str = "Other";

/// Root of the breakdown tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub name: String,
    pub children: Vec<FunctionNode>,
}

/// One top-level function group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionNode {
    pub name: String,
    /// Total entries in this group
    pub value: usize,
    pub children: Vec<SeverityLeaf>,
}

/// Count of one severity value within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityLeaf {
    pub name: String,
    pub value: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Severity total across the whole breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    pub name: String,
    pub value: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Grouping key for a leaf: known categories sort in severity order,
/// anything else follows in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum LeafKey {
    Known(Severity),
    Other(String),
}

impl LeafKey {
    fn of(raw: &str) -> Self {
        match Severity::parse(raw) {
            Some(sev) => LeafKey::Known(sev),
            None => LeafKey::Other(raw.to_string()),
        }
    }

    fn leaf(&self, value: usize) -> SeverityLeaf {
        match self {
            LeafKey::Known(sev) => SeverityLeaf {
                name: sev.short_label().to_string(),
                value,
                color: sev.color().map(str::to_string),
            },
            LeafKey::Other(raw) => SeverityLeaf {
                name: short_form(raw).to_string(),
                value,
                color: None,
            },
        }
    }
}

impl Default for Breakdown {
    fn default() -> Self {
        Self {
            name: BREAKDOWN_ROOT.to_string(),
            children: Vec::new(),
        }
    }
}

impl Breakdown {
    /// Build the tree from risk-filtered entries.
    ///
    /// Groups appear in first-seen order of `function_level_1`.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let groups = bucket_first_seen(entries, |e| e.function_level_1.clone());

        let children = groups
            .into_iter()
            .map(|(name, members)| {
                let mut leaves =
                    bucket_first_seen(members, |e| LeafKey::of(&e.severity_classification));
                // Stable: unknown values keep first-seen order after the known ones
                leaves.sort_by(|(a, _), (b, _)| match (a, b) {
                    (LeafKey::Other(_), LeafKey::Other(_)) => std::cmp::Ordering::Equal,
                    _ => a.cmp(b),
                });
                let children: Vec<SeverityLeaf> = leaves
                    .iter()
                    .map(|(key, members)| key.leaf(members.len()))
                    .collect();
                FunctionNode {
                    name,
                    value: children.iter().map(|l| l.value).sum(),
                    children,
                }
            })
            .collect();

        Self {
            name: BREAKDOWN_ROOT.to_string(),
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Limit the tree to `max_groups` top-level nodes for display.
    ///
    /// Groups are ordered by total descending (ties keep their order). When
    /// there are too many, the smallest ones are merged into a single
    /// [`OTHER_GROUP`] node whose leaves are summed by name.
    pub fn collapsed(&self, max_groups: usize) -> Breakdown {
        let max_groups = max_groups.max(1);
        let mut groups = self.children.clone();
        groups.sort_by(|a, b| b.value.cmp(&a.value));

        if groups.len() > max_groups {
            let rest = groups.split_off(max_groups - 1);
            let mut leaves: Vec<SeverityLeaf> = Vec::new();
            for leaf in rest.iter().flat_map(|g| g.children.iter()) {
                match leaves.iter_mut().find(|l| l.name == leaf.name) {
                    Some(existing) => existing.value += leaf.value,
                    None => leaves.push(leaf.clone()),
                }
            }
            groups.push(FunctionNode {
                name: OTHER_GROUP.to_string(),
                value: rest.iter().map(|g| g.value).sum(),
                children: leaves,
            });
        }

        Breakdown {
            name: self.name.clone(),
            children: groups,
        }
    }

    /// Severity totals over all groups, largest first
    pub fn legend(&self) -> Vec<LegendItem> {
        let mut items: Vec<LegendItem> = Vec::new();
        for leaf in self.children.iter().flat_map(|g| g.children.iter()) {
            match items.iter_mut().find(|i| i.name == leaf.name) {
                Some(item) => item.value += leaf.value,
                None => items.push(LegendItem {
                    name: leaf.name.clone(),
                    value: leaf.value,
                    color: leaf.color.clone(),
                }),
            }
        }
        items.sort_by(|a, b| b.value.cmp(&a.value));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(function: &str, severity: &str) -> Entry {
        Entry {
            function_level_1: function.to_string(),
            failure_mode: "fails".to_string(),
            severity_classification: severity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let entries = vec![
            entry("Power", "Minor"),
            entry("Navigation", "Hazardous"),
            entry("Power", "Catastrophic"),
            entry("Power", "Minor"),
        ];
        let tree = Breakdown::from_entries(&entries);

        assert_eq!(tree.name, BREAKDOWN_ROOT);
        let names: Vec<&str> = tree.children.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Power", "Navigation"]);

        let power = &tree.children[0];
        assert_eq!(power.value, 3);
        assert_eq!(
            power.children,
            vec![
                SeverityLeaf {
                    name: "Catastrophic".into(),
                    value: 1,
                    color: Some("#D32F2F".into())
                },
                SeverityLeaf {
                    name: "Minor".into(),
                    value: 2,
                    color: Some("#1976D2".into())
                },
            ]
        );
    }

    #[test]
    fn test_bilingual_and_plain_labels_share_a_leaf() {
        let entries = vec![
            entry("Power", "Hazardous"),
            entry("Power", "危险的 (Hazardous)"),
        ];
        let tree = Breakdown::from_entries(&entries);
        assert_eq!(tree.children[0].children.len(), 1);
        assert_eq!(tree.children[0].children[0].value, 2);
    }

    #[test]
    fn test_unknown_severity_gets_no_color() {
        let entries = vec![entry("Power", "Severe impact"), entry("Power", "Major")];
        let tree = Breakdown::from_entries(&entries);
        let leaves = &tree.children[0].children;

        assert_eq!(leaves[0].name, "Major");
        assert_eq!(leaves[1].name, "Severe");
        assert_eq!(leaves[1].color, None);
    }

    #[test]
    fn test_collapsed_merges_smallest_groups() {
        let mut entries = Vec::new();
        for (function, count) in [("A", 1), ("B", 4), ("C", 2), ("D", 1)] {
            for _ in 0..count {
                entries.push(entry(function, "Major"));
            }
        }
        entries.push(entry("D", "Minor"));

        let tree = Breakdown::from_entries(&entries).collapsed(3);
        let names: Vec<&str> = tree.children.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["B", "C", OTHER_GROUP]);

        let other = &tree.children[2];
        // A (1 Major) + D (1 Major, 1 Minor)
        assert_eq!(other.value, 3);
        assert_eq!(other.children[0].name, "Major");
        assert_eq!(other.children[0].value, 2);
        assert_eq!(other.children[1].name, "Minor");
    }

    #[test]
    fn test_collapsed_without_overflow_only_sorts() {
        let entries = vec![entry("A", "Major"), entry("B", "Major"), entry("B", "Minor")];
        let tree = Breakdown::from_entries(&entries).collapsed(9);
        let names: Vec<&str> = tree.children.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_legend_totals() {
        let entries = vec![
            entry("A", "Major"),
            entry("B", "Hazardous"),
            entry("B", "Hazardous"),
            entry("C", "Major"),
            entry("C", "Major"),
            entry("C", "Minor"),
        ];
        let legend = Breakdown::from_entries(&entries).legend();

        assert_eq!(legend[0].name, "Major");
        assert_eq!(legend[0].value, 3);
        assert_eq!(legend[1].name, "Hazardous");
        assert_eq!(legend[1].color.as_deref(), Some("#FFA000"));
        assert_eq!(legend[2].name, "Minor");
    }
}
