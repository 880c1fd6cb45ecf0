//! The causal structure: a graph over a fixed set of variables plus its derived properties.
use crate::config::StructureConfig;
use crate::error::StructureError;
use crate::graph::{Dag, GraphProperties, ParentList};
use crate::learning::{DataSource, LearnerAdapter, StructureLearner};
use crate::merge::{MergeEngine, MergeReport, MergeType, Priority};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct CausalStructure {
    variable_names: Vec<String>,
    dag: Dag,
    properties: GraphProperties,
    config: StructureConfig,
}

impl CausalStructure {
    /// Creates an edgeless graph over `variable_names`, composed with `initial_dag` when given.
    /// Repeated names collapse onto their first occurrence.
    pub fn new<I, S>(variable_names: I, initial_dag: Option<Dag>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let empty = Dag::empty(variable_names);
        let variable_names: Vec<String> = empty.vertices().map(str::to_string).collect();
        let dag = match initial_dag {
            Some(initial) => initial.compose(&empty),
            None => empty,
        };

        let mut structure = Self {
            variable_names,
            dag,
            properties: GraphProperties::default(),
            config: StructureConfig::default(),
        };
        structure.recompute_properties();
        structure
    }

    pub fn with_config(mut self, config: StructureConfig) -> Self {
        self.config = config;
        self
    }

    // --- Accessors ---
    pub fn config(&self) -> &StructureConfig { &self.config }
    pub fn variable_names(&self) -> &[String] { &self.variable_names }
    pub fn dag(&self) -> &Dag { &self.dag }
    pub fn properties(&self) -> &GraphProperties { &self.properties }
    pub fn topo_sorted(&self) -> &[String] { &self.properties.topo_sorted }
    pub fn parents(&self) -> &BTreeMap<String, ParentList> { &self.properties.parents }
    pub fn parents_of(&self, variable: &str) -> Option<&[String]> { self.properties.parents_of(variable) }
    pub fn roots(&self) -> &[String] { &self.properties.roots }
    pub fn non_roots(&self) -> &[String] { &self.properties.non_roots }
    pub fn is_acyclic(&self) -> bool { self.properties.acyclic }

    /// Rebuilds topological order, parent lists and the root partition from the current graph.
    pub fn recompute_properties(&mut self) {
        self.properties = GraphProperties::derive(&self.dag);
        if !self.properties.acyclic {
            tracing::debug!("Derived properties computed with a fallback order over a cyclic graph");
        }
    }

    /// String-keyed entry point: `merge_type` is one of `"replace"`, `"union"`, `"add"`;
    /// `priority` is `"self"` for the current graph, anything else for the candidate.
    ///
    /// An unknown merge type fails with `UnsupportedMergeType` and leaves the structure as it was.
    pub fn update_structure(
        &mut self,
        candidate: Dag,
        merge_type: &str,
        priority: &str,
    ) -> Result<MergeReport, StructureError> {
        let merge_type: MergeType = merge_type.parse()?;
        self.merge(candidate, merge_type, Priority::parse(priority))
    }

    /// Merges `candidate` into the current graph and recomputes the derived properties.
    /// On error nothing is modified.
    pub fn merge(
        &mut self,
        candidate: Dag,
        merge_type: MergeType,
        priority: Priority,
    ) -> Result<MergeReport, StructureError> {
        let outcome = MergeEngine::new(&self.variable_names, self.config.cycle_policy)
            .merge(&self.dag, candidate, merge_type, priority)?;

        self.dag = outcome.dag;
        self.recompute_properties();
        Ok(outcome.report)
    }

    /// Learns a candidate graph from `dataset` with `learner` and unions it into the structure,
    /// the current graph taking priority.
    pub fn learn_structure<L, D>(&mut self, learner: &L, dataset: &D) -> Result<MergeReport, StructureError>
    where
        L: StructureLearner + ?Sized,
        D: DataSource + ?Sized,
    {
        if let Some(unknown) = dataset
            .variable_names()
            .iter()
            .find(|v| !self.variable_names.contains(*v))
        {
            return Err(StructureError::InvalidInput(format!(
                "dataset variable '{}' is not part of the structure",
                unknown
            )));
        }

        let candidate = LearnerAdapter::new(learner, &self.config.learning).learn(dataset)?;
        let report = self.merge(candidate, MergeType::Union, Priority::Current)?;
        tracing::info!(
            edges = self.dag.edge_count(),
            edges_added = report.edges_added,
            acyclic = report.acyclic,
            "Installed learned structure"
        );
        Ok(report)
    }

    /// Graphviz DOT text for the current graph.
    pub fn to_dot(&self) -> String { self.dag.to_dot() }
}
