//! dag.rs
//! Wraps a petgraph `DiGraph` with a name index so variables are addressed by label.
//! Vertex and edge order are insertion order; nothing is ever removed from a `Dag`.

use crate::analysis::topology;
use crate::error::StructureError;
use petgraph::algo::is_cyclic_directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A directed graph over named variables. Edge `u -> v` reads "u is a parent of v".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "DagSnapshot", into = "DagSnapshot")]
pub struct Dag {
    graph: DiGraph<String, ()>,
    // Ephemeral lookup table, rebuilt on load.
    index: HashMap<String, NodeIndex>,
}

impl Dag {
    pub fn new() -> Self { Self::default() }

    /// An edgeless graph over `names`. Repeated names collapse onto the first occurrence.
    pub fn empty<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dag = Self::new();
        for name in names {
            dag.add_vertex(name);
        }
        dag
    }

    /// Builds a graph from `(parent, child)` pairs, creating endpoints as they appear.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut dag = Self::new();
        for (parent, child) in edges {
            dag.add_edge(parent, child);
        }
        dag
    }

    /// Returns the vertex for `name`, inserting it if absent.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = name.into();
        if let Some(&ix) = self.index.get(&name) {
            return ix;
        }
        let ix = self.graph.add_node(name.clone());
        self.index.insert(name, ix);
        ix
    }

    /// Adds `parent -> child`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, parent: impl Into<String>, child: impl Into<String>) -> bool {
        let p = self.add_vertex(parent);
        let c = self.add_vertex(child);
        if self.graph.find_edge(p, c).is_some() {
            return false;
        }
        self.graph.add_edge(p, c, ());
        true
    }

    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        match (self.index.get(parent), self.index.get(child)) {
            (Some(&p), Some(&c)) => self.graph.find_edge(p, c).is_some(),
            _ => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn vertex_count(&self) -> usize { self.graph.node_count() }

    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |ix| self.graph[ix].as_str())
    }

    /// Edges as `(parent, child)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph
            .edge_references()
            .map(move |e| (self.graph[e.source()].as_str(), self.graph[e.target()].as_str()))
    }

    /// Order-independent view of the edges, for comparisons.
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.edges().map(|(p, c)| (p.to_string(), c.to_string())).collect()
    }

    /// Direct predecessors of `name` in the order their edges were added.
    /// Unknown names have no predecessors.
    pub fn predecessors(&self, name: &str) -> Vec<&str> {
        match self.index.get(name) {
            Some(&ix) => self
                .sorted_neighbors(ix, Direction::Incoming)
                .into_iter()
                .map(|p| self.graph[p].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Graph union. Vertices of `self` come first, then the ones only `other` has;
    /// edges are the union of both edge sets.
    pub fn compose(&self, other: &Dag) -> Dag {
        let mut out = self.clone();
        for v in other.vertices() {
            out.add_vertex(v);
        }
        for (p, c) in other.edges() {
            out.add_edge(p, c);
        }
        out
    }

    pub fn is_acyclic(&self) -> bool { !is_cyclic_directed(&self.graph) }

    /// Strict topological order. Fails on the first cycle found.
    pub fn topological_order(&self) -> Result<Vec<String>, StructureError> {
        topology::sort(self)
    }

    /// Graphviz DOT text for the graph. Rendering is left to the caller.
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    // --- Crate internals ---

    pub(crate) fn graph(&self) -> &DiGraph<String, ()> { &self.graph }

    pub(crate) fn name(&self, ix: NodeIndex) -> &str { self.graph[ix].as_str() }

    /// Neighbors ordered by edge insertion; petgraph itself yields them newest first.
    pub(crate) fn sorted_neighbors(&self, ix: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(ix, dir)
            .map(|e| {
                let other = if dir == Direction::Incoming { e.source() } else { e.target() };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|&(id, _)| id);
        edges.into_iter().map(|(_, n)| n).collect()
    }
}

/// Two graphs are equal when they hold the same vertices and edges, whatever the order.
impl PartialEq for Dag {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.vertices().all(|v| other.contains(v))
            && self.edge_set() == other.edge_set()
    }
}

impl Eq for Dag {}

/// Serialized form: `{ "vertices": [...], "edges": [[parent, child], ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DagSnapshot {
    vertices: Vec<String>,
    edges: Vec<(String, String)>,
}

impl From<DagSnapshot> for Dag {
    fn from(snapshot: DagSnapshot) -> Self {
        let mut dag = Dag::empty(snapshot.vertices);
        for (p, c) in snapshot.edges {
            dag.add_edge(p, c);
        }
        dag
    }
}

impl From<Dag> for DagSnapshot {
    fn from(dag: Dag) -> Self {
        Self {
            vertices: dag.vertices().map(str::to_string).collect(),
            edges: dag.edges().map(|(p, c)| (p.to_string(), c.to_string())).collect(),
        }
    }
}
