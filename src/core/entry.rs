//! Analysis entry - one row of the hazard analysis table

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A field-keyed map as supplied by callers (skeletons, imports, wizard results)
pub type Fields = serde_json::Map<String, Value>;

/// Prefix of every entry identifier
pub const ID_PREFIX: &str = "FHA";

/// The fixed schema, in export column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    FunctionLevel1,
    FunctionLevel2,
    FunctionLevel3,
    FunctionType,
    FlightPhase,
    FailureMode,
    EffectOnVehicle,
    EffectOnGroundAirspace,
    EffectOnGroundCrew,
    SeverityClassification,
    Rationale,
}

impl Field {
    /// Every schema field in column order
    pub const ALL: [Field; 12] = [
        Field::Id,
        Field::FunctionLevel1,
        Field::FunctionLevel2,
        Field::FunctionLevel3,
        Field::FunctionType,
        Field::FlightPhase,
        Field::FailureMode,
        Field::EffectOnVehicle,
        Field::EffectOnGroundAirspace,
        Field::EffectOnGroundCrew,
        Field::SeverityClassification,
        Field::Rationale,
    ];

    /// Shared context of an analysis item, carried into every expanded row
    pub const DESCRIPTIVE: [Field; 5] = [
        Field::FunctionLevel1,
        Field::FunctionLevel2,
        Field::FunctionLevel3,
        Field::FunctionType,
        Field::FlightPhase,
    ];

    /// Per-failure-mode results; cleared when a row is expanded
    pub const ANALYSIS: [Field; 6] = [
        Field::FailureMode,
        Field::EffectOnVehicle,
        Field::EffectOnGroundAirspace,
        Field::EffectOnGroundCrew,
        Field::SeverityClassification,
        Field::Rationale,
    ];

    /// Snake-case key used in field maps and CSV headers
    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::FunctionLevel1 => "function_level_1",
            Field::FunctionLevel2 => "function_level_2",
            Field::FunctionLevel3 => "function_level_3",
            Field::FunctionType => "function_type",
            Field::FlightPhase => "flight_phase",
            Field::FailureMode => "failure_mode",
            Field::EffectOnVehicle => "effect_on_vehicle",
            Field::EffectOnGroundAirspace => "effect_on_ground_airspace",
            Field::EffectOnGroundCrew => "effect_on_ground_crew",
            Field::SeverityClassification => "severity_classification",
            Field::Rationale => "rationale",
        }
    }

    /// Human-readable column header
    pub fn title(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::FunctionLevel1 => "Function Level 1",
            Field::FunctionLevel2 => "Function Level 2",
            Field::FunctionLevel3 => "Function Level 3",
            Field::FunctionType => "Function Type",
            Field::FlightPhase => "Flight Phase",
            Field::FailureMode => "Failure Mode",
            Field::EffectOnVehicle => "Effect on Vehicle",
            Field::EffectOnGroundAirspace => "Effect on Ground/Airspace",
            Field::EffectOnGroundCrew => "Effect on Ground Crew",
            Field::SeverityClassification => "Severity Classification",
            Field::Rationale => "Rationale",
        }
    }

    /// Column header written by earlier spreadsheet exports
    pub fn legacy_title(&self) -> &'static str {
        match self {
            Field::Id => "编号",
            Field::FunctionLevel1 => "一级功能",
            Field::FunctionLevel2 => "二级功能",
            Field::FunctionLevel3 => "三级功能",
            Field::FunctionType => "功能类型",
            Field::FlightPhase => "飞行阶段",
            Field::FailureMode => "失效状态",
            Field::EffectOnVehicle => "对于飞行器的影响",
            Field::EffectOnGroundAirspace => "对于地面/空域的影响",
            Field::EffectOnGroundCrew => "对于地面控制组的影响",
            Field::SeverityClassification => "危害性分类",
            Field::Rationale => "理由/备注",
        }
    }

    /// Resolve a key, title or legacy header to a field
    pub fn from_key(key: &str) -> Option<Field> {
        Self::resolve(key).map(|(field, _)| field)
    }

    /// Field for `key` with the rank of the spelling that matched:
    /// 0 for the snake_case key, 1 for the title, 2 for the legacy header.
    fn resolve(key: &str) -> Option<(Field, u8)> {
        let key = key.trim();
        Self::ALL.into_iter().find_map(|field| {
            if field.key() == key {
                Some((field, 0))
            } else if field.title().eq_ignore_ascii_case(key) {
                Some((field, 1))
            } else if field.legacy_title() == key {
                Some((field, 2))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One analysis row. Every field is a string; empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Derived from the row position, never user-set
    pub id: String,
    pub function_level_1: String,
    pub function_level_2: String,
    pub function_level_3: String,
    pub function_type: String,
    pub flight_phase: String,
    pub failure_mode: String,
    pub effect_on_vehicle: String,
    pub effect_on_ground_airspace: String,
    pub effect_on_ground_crew: String,
    pub severity_classification: String,
    pub rationale: String,
}

impl Entry {
    /// Build an entry from an untrusted field map.
    ///
    /// Known keys are copied with their values coerced to strings, missing
    /// fields stay empty, unknown keys and any supplied `id` are dropped.
    pub fn from_fields(fields: &Fields) -> Self {
        let mut entry = Entry::default();
        entry.apply(fields);
        entry
    }

    /// Overwrite every known, non-id field present in `fields`.
    ///
    /// When several spellings name the same field, the snake_case key wins
    /// over the title, which wins over the legacy header.
    pub fn apply(&mut self, fields: &Fields) {
        let mut chosen: Vec<(Field, u8, &Value)> = Vec::new();
        for (key, value) in fields {
            let Some((field, rank)) = Field::resolve(key) else {
                continue;
            };
            if field == Field::Id {
                continue;
            }
            match chosen.iter_mut().find(|(f, _, _)| *f == field) {
                Some(slot) if rank < slot.1 => *slot = (field, rank, value),
                Some(_) => {}
                None => chosen.push((field, rank, value)),
            }
        }
        for (field, _, value) in chosen {
            self.set(field, coerce(value));
        }
    }

    /// Reset the analysis-result fields to empty
    pub fn clear_analysis(&mut self) {
        for field in Field::ANALYSIS {
            self.set(field, String::new());
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::FunctionLevel1 => &self.function_level_1,
            Field::FunctionLevel2 => &self.function_level_2,
            Field::FunctionLevel3 => &self.function_level_3,
            Field::FunctionType => &self.function_type,
            Field::FlightPhase => &self.flight_phase,
            Field::FailureMode => &self.failure_mode,
            Field::EffectOnVehicle => &self.effect_on_vehicle,
            Field::EffectOnGroundAirspace => &self.effect_on_ground_airspace,
            Field::EffectOnGroundCrew => &self.effect_on_ground_crew,
            Field::SeverityClassification => &self.severity_classification,
            Field::Rationale => &self.rationale,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Id => &mut self.id,
            Field::FunctionLevel1 => &mut self.function_level_1,
            Field::FunctionLevel2 => &mut self.function_level_2,
            Field::FunctionLevel3 => &mut self.function_level_3,
            Field::FunctionType => &mut self.function_type,
            Field::FlightPhase => &mut self.flight_phase,
            Field::FailureMode => &mut self.failure_mode,
            Field::EffectOnVehicle => &mut self.effect_on_vehicle,
            Field::EffectOnGroundAirspace => &mut self.effect_on_ground_airspace,
            Field::EffectOnGroundCrew => &mut self.effect_on_ground_crew,
            Field::SeverityClassification => &mut self.severity_classification,
            Field::Rationale => &mut self.rationale,
        };
        *slot = value;
    }

    /// Field map with every schema key present
    pub fn to_fields(&self) -> Fields {
        Field::ALL
            .into_iter()
            .map(|field| (field.key().to_string(), Value::String(self.get(field).to_string())))
            .collect()
    }

    /// Values in column order
    pub fn to_record(&self) -> Vec<&str> {
        Field::ALL.into_iter().map(|field| self.get(field)).collect()
    }

    /// True once a failure mode has been recorded
    pub fn is_analyzed(&self) -> bool {
        !self.failure_mode.is_empty()
    }

    /// Equality over every field except `id`
    pub fn same_content(&self, other: &Entry) -> bool {
        Field::ALL
            .into_iter()
            .filter(|field| *field != Field::Id)
            .all(|field| self.get(field) == other.get(field))
    }
}

/// Identifier for the entry at a 0-based position
pub fn format_id(position: usize) -> String {
    format!("{}-{:03}", ID_PREFIX, position + 1)
}

/// Position addressed by an identifier such as `FHA-007` (case-insensitive)
pub fn parse_id(id: &str) -> Option<usize> {
    let id = id.trim();
    let (prefix, number) = id.split_once('-')?;
    if !prefix.eq_ignore_ascii_case(ID_PREFIX) {
        return None;
    }
    let n: usize = number.parse().ok()?;
    n.checked_sub(1)
}

/// Coerce an arbitrary value to the string stored in an entry.
///
/// Null (and NaN, which deserializes as null) becomes the empty string.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_fields_defaults_and_drops() {
        let entry = Entry::from_fields(&fields(json!({
            "id": "FHA-999",
            "function_level_1": "Power",
            "failure_mode": "Output interrupted",
            "colour": "blue"
        })));

        assert_eq!(entry.id, "");
        assert_eq!(entry.function_level_1, "Power");
        assert_eq!(entry.failure_mode, "Output interrupted");
        assert_eq!(entry.rationale, "");
    }

    #[test]
    fn test_from_fields_coerces_values() {
        let entry = Entry::from_fields(&fields(json!({
            "function_level_2": 42,
            "function_level_3": null,
            "rationale": true,
            "flight_phase": 1.5
        })));

        assert_eq!(entry.function_level_2, "42");
        assert_eq!(entry.function_level_3, "");
        assert_eq!(entry.rationale, "true");
        assert_eq!(entry.flight_phase, "1.5");
    }

    #[test]
    fn test_from_fields_accepts_titles_and_legacy_headers() {
        let entry = Entry::from_fields(&fields(json!({
            "Function Level 1": "Navigation",
            "危害性分类": "危险的 (Hazardous)",
            "编号": "FHA-001"
        })));

        assert_eq!(entry.function_level_1, "Navigation");
        assert_eq!(entry.severity_classification, "危险的 (Hazardous)");
        assert_eq!(entry.id, "");
    }

    #[test]
    fn test_duplicate_spellings_prefer_canonical_key() {
        // Key order is "Failure Mode" < "failure_mode" < "失效状态"
        let entry = Entry::from_fields(&fields(json!({
            "失效状态": "legacy",
            "Failure Mode": "title",
            "failure_mode": "key",
            "危害性分类": "Major",
            "severity classification": "Minor",
        })));
        assert_eq!(entry.failure_mode, "key");
        assert_eq!(entry.severity_classification, "Minor");
    }

    #[test]
    fn test_clear_analysis_keeps_descriptive_context() {
        let mut entry = Entry::from_fields(&fields(json!({
            "function_level_1": "Power",
            "function_type": "Power",
            "failure_mode": "Supply interrupted",
            "severity_classification": "Major",
            "rationale": "redundant bus"
        })));
        entry.clear_analysis();

        assert_eq!(entry.function_level_1, "Power");
        assert_eq!(entry.function_type, "Power");
        assert_eq!(entry.failure_mode, "");
        assert_eq!(entry.severity_classification, "");
        assert_eq!(entry.rationale, "");
    }

    #[test]
    fn test_to_fields_has_full_schema() {
        let map = Entry::default().to_fields();
        assert_eq!(map.len(), Field::ALL.len());
        for field in Field::ALL {
            assert_eq!(map.get(field.key()), Some(&json!("")));
        }
    }

    #[test]
    fn test_format_and_parse_id() {
        assert_eq!(format_id(0), "FHA-001");
        assert_eq!(format_id(41), "FHA-042");
        assert_eq!(format_id(999), "FHA-1000");
        assert_eq!(parse_id("FHA-001"), Some(0));
        assert_eq!(parse_id("fha-12"), Some(11));
        assert_eq!(parse_id("FHA-000"), None);
        assert_eq!(parse_id("RISK-001"), None);
        assert_eq!(parse_id("3"), None);
    }

    #[test]
    fn test_field_from_key() {
        assert_eq!(Field::from_key("failure_mode"), Some(Field::FailureMode));
        assert_eq!(Field::from_key("failure mode"), Some(Field::FailureMode));
        assert_eq!(Field::from_key("失效状态"), Some(Field::FailureMode));
        assert_eq!(Field::from_key("unknown"), None);
    }
}
