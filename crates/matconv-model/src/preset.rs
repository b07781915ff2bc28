use serde::{Deserialize, Serialize};

use crate::attribute::CanonicalType;

/// One confirmed correspondence recorded in a preset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetPair {
    pub source: String,
    pub target: String,
    pub kind: CanonicalType,
}

/// Portable mapping record, independent of any value store.
///
/// A preset names its schemas but carries no catalog; it has to be replayed
/// against a freshly built mapping set to become usable again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub source_schema: String,
    pub target_schema: String,
    #[serde(default)]
    pub pairs: Vec<PresetPair>,
}

impl Preset {
    pub fn new(source_schema: impl Into<String>, target_schema: impl Into<String>) -> Self {
        Self {
            source_schema: source_schema.into(),
            target_schema: target_schema.into(),
            pairs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether this preset maps `source_schema` onto `target_schema`.
    pub fn is_for(&self, source_schema: &str, target_schema: &str) -> bool {
        self.source_schema == source_schema && self.target_schema == target_schema
    }
}
