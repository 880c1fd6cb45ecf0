//! Tunable behavior for merges and structure learning.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "cycle_policy": "reject", "learning": { "aggregation": "union" } }
//! ```

use crate::error::StructureError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a merge does when its result contains a directed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Install the cyclic graph, log a warning and flag the violation in the merge report.
    #[default]
    Tolerate,
    /// Fail the merge and keep the previous graph.
    Reject,
}

/// How graphs learned from several tables are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Keep only the graph learned from the last table.
    #[default]
    Last,
    /// Union of the graphs learned from every table.
    Union,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub aggregation: Aggregation,
    /// Drop rows with a missing cell before learning. When `false` the table is passed on
    /// with its missing cells intact.
    pub drop_missing_rows: bool,
    /// Prepended to every categorical value, e.g. category `3` becomes `v3`.
    pub category_prefix: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            aggregation: Aggregation::Last,
            drop_missing_rows: true,
            category_prefix: "v".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub cycle_policy: CyclePolicy,
    pub learning: LearningConfig,
}

impl StructureConfig {
    pub fn from_json(json: &str) -> Result<Self, StructureError> {
        serde_json::from_str(json).map_err(|e| StructureError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StructureError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StructureError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StructureConfig::default();
        assert_eq!(config.cycle_policy, CyclePolicy::Tolerate);
        assert_eq!(config.learning.aggregation, Aggregation::Last);
        assert!(config.learning.drop_missing_rows);
        assert_eq!(config.learning.category_prefix, "v");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StructureConfig::from_json(r#"{ "learning": { "aggregation": "union" } }"#).unwrap();
        assert_eq!(config.cycle_policy, CyclePolicy::Tolerate);
        assert_eq!(config.learning.aggregation, Aggregation::Union);
        assert_eq!(config.learning.category_prefix, "v");
    }

    #[test]
    fn test_unknown_policy_is_a_config_error() {
        let err = StructureConfig::from_json(r#"{ "cycle_policy": "panic" }"#).unwrap_err();
        assert!(matches!(err, StructureError::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cycle_policy": "reject", "learning": {{ "drop_missing_rows": false }} }}"#).unwrap();

        let config = StructureConfig::from_path(file.path()).unwrap();
        assert_eq!(config.cycle_policy, CyclePolicy::Reject);
        assert!(!config.learning.drop_missing_rows);
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StructureConfig::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StructureError::Config(msg) if msg.contains("absent.json")));
    }
}
