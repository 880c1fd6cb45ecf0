//! Checks a graph for directed cycles and describes the ones it finds.
use super::error::AcyclicityViolation;
use crate::graph::Dag;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};

/// Runs the acyclicity check against a graph.
///
/// Unlike a plain `is_acyclic` call, a failed validation names every cycle so the
/// caller can log or inspect the offending variables.
pub struct Validator<'a> {
    dag: &'a Dag,
}

impl<'a> Validator<'a> {
    pub fn new(dag: &'a Dag) -> Self {
        Self { dag }
    }

    /// # Returns
    /// - `Ok(())` if the graph is a DAG.
    /// - `Err(AcyclicityViolation)` listing every cycle otherwise.
    pub fn validate(&self) -> Result<(), AcyclicityViolation> {
        if !is_cyclic_directed(self.dag.graph()) {
            return Ok(());
        }
        Err(AcyclicityViolation { cycles: find_cycles(self.dag) })
    }
}

/// Strongly connected components that contain a cycle, ordered by their first vertex.
pub fn find_cycles(dag: &Dag) -> Vec<Vec<String>> {
    let graph = dag.graph();
    let mut components: Vec<_> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.find_edge(scc[0], scc[0]).is_some())
        .map(|mut scc| {
            scc.sort();
            scc
        })
        .collect();
    components.sort_by_key(|scc| scc[0]);

    components
        .into_iter()
        .map(|scc| scc.into_iter().map(|ix| dag.name(ix).to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acyclic_graph_passes() {
        let dag = Dag::from_edges([("A", "B"), ("B", "C"), ("A", "C")]);
        assert!(Validator::new(&dag).validate().is_ok());
        assert!(find_cycles(&dag).is_empty());
    }

    #[test]
    fn test_two_cycle_is_reported() {
        let dag = Dag::from_edges([("a", "b"), ("b", "a")]);
        let violation = Validator::new(&dag).validate().unwrap_err();
        assert_eq!(violation.cycles, vec![vec!["a".to_string(), "b".to_string()]]);
        assert!(violation.involves("a"));
        assert!(!violation.involves("c"));
        assert!(violation.to_string().contains("1 cycle(s)"));
    }

    #[test]
    fn test_independent_cycles_and_self_loops() {
        let mut dag = Dag::empty(["p", "q", "r", "s", "t"]);
        dag.add_edge("p", "q");
        dag.add_edge("q", "p");
        dag.add_edge("r", "s");
        dag.add_edge("t", "t");

        let cycles = find_cycles(&dag);
        assert_eq!(cycles, vec![
            vec!["p".to_string(), "q".to_string()],
            vec!["t".to_string()],
        ]);
    }
}
