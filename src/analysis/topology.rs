use crate::error::StructureError;
use crate::graph::Dag;
use crate::validation;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::VecDeque;

/// Result of a Kahn pass over a possibly cyclic graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KahnOrder {
    /// Vertices in topological order.
    pub ordered: Vec<NodeIndex>,
    /// Vertices that never reached in-degree zero: those on a cycle and everything downstream of one.
    /// Empty for a DAG.
    pub blocked: Vec<NodeIndex>,
}

impl KahnOrder {
    pub fn is_complete(&self) -> bool { self.blocked.is_empty() }
}

/// Performs a topological sort using Kahn's Algorithm.
///
/// The initial queue is seeded in vertex insertion order and children are released in
/// edge insertion order, so the output is deterministic for a given build history.
pub fn kahn(dag: &Dag) -> KahnOrder {
    let graph = dag.graph();
    let count = graph.node_count();
    let mut in_degree = vec![0usize; count];
    let mut queue = VecDeque::with_capacity(count);
    let mut ordered = Vec::with_capacity(count);

    // 1. Initialize In-Degrees O(N + E)
    for ix in graph.node_indices() {
        let degree = graph.neighbors_directed(ix, Direction::Incoming).count();
        in_degree[ix.index()] = degree;
        if degree == 0 {
            queue.push_back(ix);
        }
    }

    // 2. Process Queue
    while let Some(node) = queue.pop_front() {
        ordered.push(node);
        for child in dag.sorted_neighbors(node, Direction::Outgoing) {
            let slot = &mut in_degree[child.index()];
            *slot -= 1;
            if *slot == 0 {
                queue.push_back(child);
            }
        }
    }

    let blocked = if ordered.len() == count {
        Vec::new()
    } else {
        graph.node_indices().filter(|ix| in_degree[ix.index()] > 0).collect()
    };

    KahnOrder { ordered, blocked }
}

/// Strict sort: every parent appears before its children, or the call fails.
pub fn sort(dag: &Dag) -> Result<Vec<String>, StructureError> {
    let order = kahn(dag);
    if !order.is_complete() {
        // Name a vertex that actually sits on a cycle, not one merely downstream of it.
        let vertex = validation::find_cycles(dag)
            .into_iter()
            .next()
            .and_then(|cycle| cycle.into_iter().next())
            .unwrap_or_else(|| dag.name(order.blocked[0]).to_string());
        return Err(StructureError::Cycle { vertex });
    }
    Ok(names(dag, &order.ordered))
}

/// Lenient sort used when a cyclic graph has been tolerated: the Kahn prefix followed by the
/// blocked vertices in insertion order. The flag reports whether the order is a true topological one.
pub fn sort_with_fallback(dag: &Dag) -> (Vec<String>, bool) {
    let order = kahn(dag);
    let complete = order.is_complete();
    let mut all = order.ordered;
    all.extend(order.blocked);
    (names(dag, &all), complete)
}

fn names(dag: &Dag, ids: &[NodeIndex]) -> Vec<String> {
    ids.iter().map(|&ix| dag.name(ix).to_string()).collect()
}
