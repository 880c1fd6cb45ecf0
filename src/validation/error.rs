//! Defines the error types for the validation module.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A merge left the graph with at least one directed cycle.
///
/// Under the tolerant cycle policy this is a diagnostic carried in the merge report;
/// under the rejecting policy it is returned as the merge error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Graph is no longer acyclic: {} cycle(s) found {:?}", .cycles.len(), .cycles)]
pub struct AcyclicityViolation {
    /// Strongly connected groups of variables that form cycles, each listed in vertex
    /// insertion order. A self-loop shows up as a one-element group.
    pub cycles: Vec<Vec<String>>,
}

impl AcyclicityViolation {
    pub fn involves(&self, variable: &str) -> bool {
        self.cycles.iter().any(|c| c.iter().any(|v| v == variable))
    }
}
