//! Merge types and priorities, as accepted by `update_structure`.
use crate::error::StructureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeType {
    /// The candidate becomes the graph as-is.
    Replace,
    /// Union of both graphs. May introduce cycles.
    Union,
    /// Edge-wise merge where the priority graph wins directional conflicts.
    Add,
}

impl FromStr for MergeType {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(MergeType::Replace),
            "union" => Ok(MergeType::Union),
            "add" => Ok(MergeType::Add),
            other => Err(StructureError::UnsupportedMergeType(other.to_string())),
        }
    }
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeType::Replace => "replace",
            MergeType::Union => "union",
            MergeType::Add => "add",
        };
        f.write_str(name)
    }
}

/// Which graph wins when an `Add` merge meets an edge and its reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// The structure's current graph.
    #[default]
    #[serde(rename = "self")]
    Current,
    #[serde(rename = "candidate")]
    Candidate,
}

impl Priority {
    /// `"self"` selects the current graph; any other value selects the candidate.
    pub fn parse(s: &str) -> Self {
        if s == "self" { Priority::Current } else { Priority::Candidate }
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self { Self::parse(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("replace", MergeType::Replace)]
    #[case("union", MergeType::Union)]
    #[case("add", MergeType::Add)]
    fn test_merge_type_parsing(#[case] input: &str, #[case] expected: MergeType) {
        assert_eq!(input.parse::<MergeType>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("intersect")]
    #[case("Union")]
    #[case("")]
    fn test_unsupported_merge_type(#[case] input: &str) {
        let err = input.parse::<MergeType>().unwrap_err();
        assert_eq!(err, StructureError::UnsupportedMergeType(input.to_string()));
    }

    #[rstest]
    #[case("self", Priority::Current)]
    #[case("other", Priority::Candidate)]
    #[case("candidate", Priority::Candidate)]
    #[case("", Priority::Candidate)]
    fn test_priority_parsing(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(Priority::from(input), expected);
    }

    #[test]
    fn test_priority_serde_names() {
        assert_eq!(serde_json::to_string(&Priority::Current).unwrap(), "\"self\"");
        assert_eq!(serde_json::to_string(&Priority::Candidate).unwrap(), "\"candidate\"");
        assert_eq!(serde_json::from_str::<Priority>("\"self\"").unwrap(), Priority::Current);
        assert_eq!(serde_json::from_str::<Priority>("\"candidate\"").unwrap(), Priority::Candidate);
        assert!(serde_json::from_str::<Priority>("\"current\"").is_err());
    }
}
