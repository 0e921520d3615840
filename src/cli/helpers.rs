//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use serde_json::Value;

use crate::core::entry::{parse_id, Field, Fields};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a `KEY=VALUE` assignment (clap value parser)
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build a field map from assignments, warning about keys the table ignores
pub fn fields_from_assignments(assignments: &[(String, String)]) -> Fields {
    let mut fields = Fields::new();
    for (key, value) in assignments {
        match Field::from_key(key) {
            Some(Field::Id) => eprintln!(
                "{} 'id' is derived from the row position and cannot be set",
                style("!").yellow()
            ),
            Some(_) => {}
            None => eprintln!(
                "{} Unknown field '{}' ignored (see `fha list -f csv` for column names)",
                style("!").yellow(),
                key
            ),
        }
        fields.insert(key.clone(), Value::String(value.clone()));
    }
    fields
}

/// Resolve an entry reference to a 0-based position.
///
/// Accepts an id such as `FHA-003` or a 1-based row number.
pub fn resolve_position(reference: &str) -> Result<usize, String> {
    if let Some(position) = parse_id(reference) {
        return Ok(position);
    }
    match reference.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(format!(
            "invalid entry reference '{}' (use an id like FHA-003 or a row number from 1)",
            reference
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("功能完全丧失功能", 5), "功能...");
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("failure_mode=Heading error").unwrap(),
            ("failure_mode".to_string(), "Heading error".to_string())
        );
        assert_eq!(
            parse_assignment("rationale=a=b").unwrap(),
            ("rationale".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("rationale=").unwrap(),
            ("rationale".to_string(), String::new())
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_resolve_position() {
        assert_eq!(resolve_position("FHA-003"), Ok(2));
        assert_eq!(resolve_position("fha-010"), Ok(9));
        assert_eq!(resolve_position("1"), Ok(0));
        assert!(resolve_position("0").is_err());
        assert!(resolve_position("abc").is_err());
    }

    #[test]
    fn test_fields_from_assignments() {
        let fields = fields_from_assignments(&[
            ("severity_classification".into(), "Major".into()),
            ("Flight Phase".into(), "Cruise".into()),
        ]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["severity_classification"], "Major");
    }
}
