//! Narrative findings generated from KPIs and the cross-tabulation

use crate::core::severity::Severity;

use super::crosstab::CrossTab;
use super::Kpis;

/// Summary when the table holds no analyzed entries
pub const NO_DATA: &str = "No data available.";

/// Summary when no analyzed entry has both a function and a classification
pub const NO_ANALYZED: &str = "No analyzed entries yet; cannot generate summary.";

const RECOMMENDATION: &str = "Recommended action:\n\
Review the functions in the high-risk cells of the cross-analysis matrix first, \
and define mitigations and verification plans for those risks.";

/// Build the narrative summary
pub fn narrative(kpis: &Kpis, cross_tab: &CrossTab) -> String {
    if cross_tab.is_empty() {
        return NO_ANALYZED.to_string();
    }

    let mut paragraphs = vec![format!(
        "{} high-risk entries identified (Catastrophic or Hazardous).",
        kpis.catastrophic + kpis.hazardous
    )];

    if let Some(function) = cross_tab.top_high_risk_row() {
        paragraphs.push(format!(
            "Key concern:\nRisk is concentrated in the \"{}\" function, with {} Catastrophic and {} Hazardous entries.",
            function,
            cross_tab.count(function, Severity::Catastrophic),
            cross_tab.count(function, Severity::Hazardous),
        ));
    }

    paragraphs.push(RECOMMENDATION.to_string());
    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Entry;

    fn entry(function: &str, severity: &str) -> Entry {
        Entry {
            function_level_1: function.to_string(),
            failure_mode: "fails".to_string(),
            severity_classification: severity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_cross_tab_gives_placeholder() {
        let text = narrative(&Kpis::default(), &CrossTab::default());
        assert_eq!(text, NO_ANALYZED);
    }

    #[test]
    fn test_names_top_function() {
        let entries = vec![
            entry("Power", "Hazardous"),
            entry("Power", "Catastrophic"),
            entry("Nav", "Minor"),
        ];
        let kpis = Kpis {
            total: 3,
            catastrophic: 1,
            hazardous: 1,
        };
        let text = narrative(&kpis, &CrossTab::from_entries(&entries));

        assert!(text.starts_with("2 high-risk entries identified"));
        assert!(text.contains("\"Power\" function, with 1 Catastrophic and 1 Hazardous"));
        assert!(text.ends_with("verification plans for those risks."));
    }

    #[test]
    fn test_skips_concern_without_high_risk_columns() {
        let entries = vec![entry("Nav", "Minor")];
        let kpis = Kpis {
            total: 1,
            ..Default::default()
        };
        let text = narrative(&kpis, &CrossTab::from_entries(&entries));

        assert!(text.starts_with("0 high-risk entries identified"));
        assert!(!text.contains("Key concern"));
        assert!(text.contains("Recommended action"));
    }

    #[test]
    fn test_missing_column_counts_as_zero() {
        let entries = vec![entry("Nav", "Hazardous"), entry("Nav", "Hazardous")];
        let kpis = Kpis {
            total: 2,
            catastrophic: 0,
            hazardous: 2,
        };
        let text = narrative(&kpis, &CrossTab::from_entries(&entries));
        assert!(text.contains("with 0 Catastrophic and 2 Hazardous entries"));
    }

    #[test]
    fn test_full_narrative() {
        let entries = vec![
            entry("Power", "Hazardous"),
            entry("Nav", "Catastrophic"),
            entry("Power", "Catastrophic"),
        ];
        let kpis = Kpis {
            total: 3,
            catastrophic: 2,
            hazardous: 1,
        };
        let text = narrative(&kpis, &CrossTab::from_entries(&entries));

        insta::assert_snapshot!(text, @r#"
        3 high-risk entries identified (Catastrophic or Hazardous).

        Key concern:
        Risk is concentrated in the "Power" function, with 1 Catastrophic and 1 Hazardous entries.

        Recommended action:
        Review the functions in the high-risk cells of the cross-analysis matrix first, and define mitigations and verification plans for those risks.
        "#);
    }
}
