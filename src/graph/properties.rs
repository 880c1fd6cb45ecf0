//! Properties derived from a `Dag`: topological order, parent lists and the root partition.
//!
//! These are never edited directly. `GraphProperties::derive` rebuilds all of them from the
//! graph, and the owner calls it after every structural change.

use super::dag::Dag;
use crate::analysis::topology;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Direct predecessors of one variable. Most causal variables have a handful of parents.
pub type ParentList = SmallVec<[String; 4]>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphProperties {
    /// Every vertex, parents before children. On a cyclic graph the vertices stuck on or
    /// behind a cycle trail the order and `acyclic` is `false`.
    pub topo_sorted: Vec<String>,
    pub parents: BTreeMap<String, ParentList>,
    /// Vertices without parents, in `topo_sorted` order.
    pub roots: Vec<String>,
    /// Vertices with at least one parent, in `topo_sorted` order.
    pub non_roots: Vec<String>,
    pub acyclic: bool,
}

impl GraphProperties {
    pub fn derive(dag: &Dag) -> Self {
        let (topo_sorted, acyclic) = topology::sort_with_fallback(dag);

        let mut parents = BTreeMap::new();
        let mut roots = Vec::new();
        let mut non_roots = Vec::new();

        for v in &topo_sorted {
            // Each entry gets its own list.
            let list: ParentList = dag.predecessors(v).into_iter().map(str::to_string).collect();
            if list.is_empty() {
                roots.push(v.clone());
            } else {
                non_roots.push(v.clone());
            }
            parents.insert(v.clone(), list);
        }

        Self { topo_sorted, parents, roots, non_roots, acyclic }
    }

    pub fn parents_of(&self, variable: &str) -> Option<&[String]> {
        self.parents.get(variable).map(|list| list.as_slice())
    }

    pub fn is_root(&self, variable: &str) -> bool {
        self.parents.get(variable).map_or(false, |list| list.is_empty())
    }
}
