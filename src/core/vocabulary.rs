//! Static configuration vocabularies (severity categories, function types,
//! flight phases, failure-mode catalog), embedded at build time.

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Embed)]
#[folder = "vocabulary/"]
struct EmbeddedVocabulary;

const VOCABULARY_FILE: &str = "vocabulary.yaml";

/// Catalog key used when a function type has no dedicated list
pub const GENERAL_FAILURE_MODES: &str = "General";

/// Lookup data offered to users when filling in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub severity_categories: Vec<String>,
    pub function_types: Vec<String>,
    pub flight_phases: Vec<String>,
    pub failure_modes: BTreeMap<String, Vec<String>>,
}

impl Vocabulary {
    /// Parse the vocabulary shipped with the binary
    pub fn builtin() -> Result<Self, VocabularyError> {
        let file = EmbeddedVocabulary::get(VOCABULARY_FILE)
            .ok_or(VocabularyError::Missing(VOCABULARY_FILE))?;
        let text = std::str::from_utf8(&file.data)
            .map_err(|e| VocabularyError::Parse(e.to_string()))?;
        serde_yml::from_str(text).map_err(|e| VocabularyError::Parse(e.to_string()))
    }

    /// Catalog entries for a function type, falling back to the general list
    pub fn failure_modes_for(&self, function_type: &str) -> &[String] {
        self.failure_modes
            .get(function_type.trim())
            .or_else(|| self.failure_modes.get(GENERAL_FAILURE_MODES))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("embedded vocabulary file '{0}' is missing")]
    Missing(&'static str),

    #[error("invalid vocabulary file: {0}")]
    Parse(String),
}
