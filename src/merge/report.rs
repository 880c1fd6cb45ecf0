use super::policy::MergeType;
use crate::validation::AcyclicityViolation;
use serde::{Deserialize, Serialize};

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub merge_type: MergeType,
    /// Whether the installed graph is a DAG.
    pub acyclic: bool,
    /// Set when a cyclic result was installed under the tolerant cycle policy.
    pub violation: Option<AcyclicityViolation>,
    /// Edges present after the merge that were absent before it.
    pub edges_added: usize,
    /// Edges present before the merge that are gone after it. `Replace` can remove edges, as
    /// can an `Add` merge where the candidate wins a reverse-edge conflict.
    pub edges_removed: usize,
    /// `Add` merges only: edges of the lower-priority graph dropped because the priority
    /// graph holds the reverse edge, as `(parent, child)`.
    pub rejected_edges: Vec<(String, String)>,
}

impl MergeReport {
    pub fn is_valid(&self) -> bool { self.acyclic }

    /// True when the merge left the edge set untouched.
    pub fn is_noop(&self) -> bool { self.edges_added == 0 && self.edges_removed == 0 }
}
