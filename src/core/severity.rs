//! ARP4761 severity classification vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hazard severity category, in the fixed preferred order used for columns
/// and legends (most severe first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Catastrophic,
    Hazardous,
    Major,
    Minor,
    #[serde(rename = "No Safety Effect")]
    NoSafetyEffect,
}

impl Severity {
    /// All categories in preferred order
    pub const ALL: [Severity; 5] = [
        Severity::Catastrophic,
        Severity::Hazardous,
        Severity::Major,
        Severity::Minor,
        Severity::NoSafetyEffect,
    ];

    /// The categories counted as high-risk
    pub const HIGH_RISK: [Severity; 2] = [Severity::Catastrophic, Severity::Hazardous];

    /// Canonical label stored in the `severity_classification` field
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Catastrophic => "Catastrophic",
            Severity::Hazardous => "Hazardous",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
            Severity::NoSafetyEffect => "No Safety Effect",
        }
    }

    /// Short form used for chart leaves and matrix columns
    pub fn short_label(&self) -> &'static str {
        short_form(self.label())
    }

    /// Color tag used by the breakdown visualization
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Severity::Catastrophic => Some("#D32F2F"),
            Severity::Hazardous => Some("#FFA000"),
            Severity::Major => Some("#388E3C"),
            Severity::Minor => Some("#1976D2"),
            Severity::NoSafetyEffect => None,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self, Severity::Catastrophic | Severity::Hazardous)
    }

    /// Parse a stored classification.
    ///
    /// Accepts the English label in any case, or a bilingual label of the
    /// form `<local name> (<English label>)` as written by older exports.
    /// Blank and unrecognised text yield `None`.
    pub fn parse(value: &str) -> Option<Severity> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Some(sev) = Self::from_english(value) {
            return Some(sev);
        }
        let inner = value.strip_suffix(')')?;
        let open = inner.rfind('(')?;
        Self::from_english(&inner[open + 1..])
    }

    fn from_english(name: &str) -> Option<Severity> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|sev| sev.label().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Text before the first space of a classification label
pub fn short_form(label: &str) -> &str {
    label.split(' ').next().unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_labels() {
        assert_eq!(Severity::parse("Catastrophic"), Some(Severity::Catastrophic));
        assert_eq!(Severity::parse("hazardous"), Some(Severity::Hazardous));
        assert_eq!(Severity::parse(" Minor "), Some(Severity::Minor));
        assert_eq!(
            Severity::parse("No Safety Effect"),
            Some(Severity::NoSafetyEffect)
        );
    }

    #[test]
    fn test_parse_bilingual_labels() {
        assert_eq!(
            Severity::parse("灾难的 (Catastrophic)"),
            Some(Severity::Catastrophic)
        );
        assert_eq!(
            Severity::parse("无安全影响 (No Safety Effect)"),
            Some(Severity::NoSafetyEffect)
        );
    }

    #[test]
    fn test_parse_rejects_blank_and_unknown() {
        assert_eq!(Severity::parse(""), None);
        assert_eq!(Severity::parse("   "), None);
        assert_eq!(Severity::parse("Severe"), None);
        assert_eq!(Severity::parse("Bad (Worse)"), None);
    }

    #[test]
    fn test_short_label_and_color() {
        assert_eq!(Severity::NoSafetyEffect.short_label(), "No");
        assert_eq!(Severity::Major.short_label(), "Major");
        assert_eq!(Severity::Catastrophic.color(), Some("#D32F2F"));
        assert_eq!(Severity::NoSafetyEffect.color(), None);
        assert_eq!(short_form("灾难的 (Catastrophic)"), "灾难的");
    }

    #[test]
    fn test_order_is_most_severe_first() {
        let mut shuffled = vec![Severity::Minor, Severity::Catastrophic, Severity::Major];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Severity::Catastrophic, Severity::Major, Severity::Minor]
        );
        assert!(Severity::Hazardous.is_high_risk());
        assert!(!Severity::Major.is_high_risk());
    }
}
