//! Combines a candidate graph with the current one.
//!
//! The engine never touches the caller's graph: it returns the merged graph and a report,
//! and the owner installs the result only when the call succeeds.

use super::policy::{MergeType, Priority};
use super::report::MergeReport;
use crate::config::CyclePolicy;
use crate::error::StructureError;
use crate::graph::Dag;
use crate::validation::Validator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub dag: Dag,
    pub report: MergeReport,
}

pub struct MergeEngine<'a> {
    variable_names: &'a [String],
    cycle_policy: CyclePolicy,
}

impl<'a> MergeEngine<'a> {
    pub fn new(variable_names: &'a [String], cycle_policy: CyclePolicy) -> Self {
        Self { variable_names, cycle_policy }
    }

    pub fn merge(
        &self,
        current: &Dag,
        candidate: Dag,
        merge_type: MergeType,
        priority: Priority,
    ) -> Result<MergeOutcome, StructureError> {
        let mut rejected_edges = Vec::new();

        let merged = match merge_type {
            MergeType::Replace => {
                self.warn_on_vertex_mismatch(&candidate);
                candidate
            }
            // Priority has no say in a union.
            MergeType::Union => candidate.compose(current),
            MergeType::Add => {
                let (merged, rejected) = match priority {
                    Priority::Current => add(current.clone(), &candidate),
                    Priority::Candidate => add(candidate, current),
                };
                rejected_edges = rejected;
                merged
            }
        };

        let edges_added = merged.edges().filter(|&(p, c)| !current.has_edge(p, c)).count();
        let edges_removed = current.edges().filter(|&(p, c)| !merged.has_edge(p, c)).count();

        let violation = match Validator::new(&merged).validate() {
            Ok(()) => None,
            Err(violation) => match self.cycle_policy {
                CyclePolicy::Reject => {
                    tracing::warn!(
                        merge_type = %merge_type,
                        cycles = ?violation.cycles,
                        "Merge rejected: result is no longer a DAG"
                    );
                    return Err(violation.into());
                }
                CyclePolicy::Tolerate => {
                    tracing::warn!(
                        merge_type = %merge_type,
                        cycles = ?violation.cycles,
                        "After merge the graph is no longer a DAG; installing it anyway"
                    );
                    Some(violation)
                }
            },
        };

        tracing::debug!(
            merge_type = %merge_type,
            priority = ?priority,
            edges_added,
            edges_removed,
            rejected = rejected_edges.len(),
            "Merged candidate graph"
        );

        let report = MergeReport {
            merge_type,
            acyclic: violation.is_none(),
            violation,
            edges_added,
            edges_removed,
            rejected_edges,
        };
        Ok(MergeOutcome { dag: merged, report })
    }

    fn warn_on_vertex_mismatch(&self, candidate: &Dag) {
        let missing: Vec<&str> = self
            .variable_names
            .iter()
            .map(String::as_str)
            .filter(|v| !candidate.contains(v))
            .collect();
        let extra: Vec<&str> = candidate
            .vertices()
            .filter(|v| !self.variable_names.iter().any(|n| n == v))
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            tracing::warn!(?missing, ?extra, "Replacement graph does not cover the declared variables");
        }
    }
}

/// Edge-wise merge: every edge of `other` is added to `priority` unless `priority` already
/// holds the reverse edge. Vertices of `other` are carried over as well.
///
/// Returns the merged graph and the edges of `other` that lost a directional conflict.
pub fn add(priority: Dag, other: &Dag) -> (Dag, Vec<(String, String)>) {
    let mut merged = priority;
    let mut rejected = Vec::new();

    for v in other.vertices() {
        merged.add_vertex(v);
    }

    for (parent, child) in other.edges() {
        if merged.has_edge(parent, child) {
            continue;
        }
        if merged.has_edge(child, parent) {
            rejected.push((parent.to_string(), child.to_string()));
        } else {
            merged.add_edge(parent, child);
        }
    }

    (merged, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(vars: &[&str]) -> Vec<String> {
        vars.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_add_keeps_priority_direction() {
        let g1 = Dag::from_edges([("a", "b")]);
        let g2 = Dag::from_edges([("b", "a"), ("b", "c")]);

        let (merged, rejected) = add(g1, &g2);
        assert!(merged.has_edge("a", "b"));
        assert!(!merged.has_edge("b", "a"));
        assert!(merged.has_edge("b", "c"));
        assert_eq!(rejected, vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_add_with_candidate_priority() {
        let vars = names(&["a", "b", "c"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let mut current = Dag::empty(&vars);
        current.add_edge("a", "b");
        let mut candidate = Dag::empty(["b", "a"]);
        candidate.add_edge("b", "a");

        let outcome = engine.merge(&current, candidate, MergeType::Add, Priority::Candidate).unwrap();
        assert!(outcome.dag.has_edge("b", "a"));
        assert!(!outcome.dag.has_edge("a", "b"));
        assert!(outcome.dag.contains("c"), "declared vertices survive a candidate-priority merge");
        assert_eq!(outcome.report.edges_added, 1);
        assert_eq!(outcome.report.edges_removed, 1);
        assert_eq!(outcome.report.rejected_edges, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_add_self_merge_is_idempotent() {
        let vars = names(&["x", "y", "z"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let dag = Dag::from_edges([("x", "y"), ("y", "z")]);

        let outcome = engine.merge(&dag, dag.clone(), MergeType::Add, Priority::Current).unwrap();
        assert_eq!(outcome.dag.edge_set(), dag.edge_set());
        assert!(outcome.report.is_noop());
        assert!(outcome.report.rejected_edges.is_empty());
    }

    #[test]
    fn test_union_tolerates_cycles() {
        let vars = names(&["a", "b"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let current = Dag::from_edges([("a", "b")]);
        let candidate = Dag::from_edges([("b", "a")]);

        let outcome = engine.merge(&current, candidate, MergeType::Union, Priority::Current).unwrap();
        assert!(outcome.dag.has_edge("a", "b"));
        assert!(outcome.dag.has_edge("b", "a"));
        assert!(!outcome.report.is_valid());
        let violation = outcome.report.violation.expect("violation reported");
        assert!(violation.involves("a") && violation.involves("b"));
    }

    #[test]
    fn test_union_ignores_priority() {
        let vars = names(&["a", "b", "c"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let current = Dag::from_edges([("a", "b")]);
        let candidate = Dag::from_edges([("b", "c")]);

        let by_self = engine.merge(&current, candidate.clone(), MergeType::Union, Priority::Current).unwrap();
        let by_other = engine.merge(&current, candidate, MergeType::Union, Priority::Candidate).unwrap();
        assert_eq!(by_self.dag, by_other.dag);
        assert_eq!(by_self.report.edges_added, 1);
    }

    #[test]
    fn test_reject_policy_refuses_cycles() {
        let vars = names(&["a", "b"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Reject);
        let current = Dag::from_edges([("a", "b")]);
        let candidate = Dag::from_edges([("b", "a")]);

        let err = engine.merge(&current, candidate, MergeType::Union, Priority::Current).unwrap_err();
        assert!(matches!(err, StructureError::Acyclicity(ref v) if v.involves("a")));
    }

    #[test]
    fn test_add_can_still_close_a_longer_cycle() {
        // No direct reverse edge, so the add merge accepts c -> a and the check flags it.
        let vars = names(&["a", "b", "c"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let current = Dag::from_edges([("a", "b"), ("b", "c")]);
        let candidate = Dag::from_edges([("c", "a")]);

        let outcome = engine.merge(&current, candidate, MergeType::Add, Priority::Current).unwrap();
        assert!(outcome.dag.has_edge("c", "a"));
        assert!(!outcome.report.acyclic);
    }

    #[test]
    fn test_replace_installs_candidate_wholesale() {
        let vars = names(&["a", "b", "c"]);
        let engine = MergeEngine::new(&vars, CyclePolicy::Tolerate);
        let current = Dag::from_edges([("a", "b"), ("b", "c")]);
        let candidate = Dag::from_edges([("c", "a")]).compose(&Dag::empty(&vars));

        let outcome = engine.merge(&current, candidate.clone(), MergeType::Replace, Priority::Current).unwrap();
        assert_eq!(outcome.dag, candidate);
        assert_eq!(outcome.report.edges_added, 1);
        assert_eq!(outcome.report.edges_removed, 2);
        assert!(outcome.report.acyclic);
    }
}
