//! Prepares each table for the external learner and turns its output into one candidate graph.
use super::dataset::DataSource;
use super::learner::StructureLearner;
use super::table::Table;
use crate::config::{Aggregation, LearningConfig};
use crate::error::{LearningError, StructureError};
use crate::graph::Dag;
use std::collections::BTreeSet;

pub struct LearnerAdapter<'a, L: ?Sized> {
    learner: &'a L,
    config: &'a LearningConfig,
}

impl<'a, L: StructureLearner + ?Sized> LearnerAdapter<'a, L> {
    pub fn new(learner: &'a L, config: &'a LearningConfig) -> Self {
        Self { learner, config }
    }

    /// Row dropping (if enabled) followed by categorical tokenization.
    pub fn prepare(&self, table: &Table) -> Table {
        let table = if self.config.drop_missing_rows {
            table.drop_missing_rows()
        } else {
            table.clone()
        };
        table.tokenize_categories(&self.config.category_prefix)
    }

    /// Runs the learner over every table of `dataset` and returns the candidate graph,
    /// normalized so that every declared variable is a vertex. Each table must hold exactly
    /// the declared variables as columns.
    ///
    /// With `Aggregation::Last` only the graph of the last table is kept, though every
    /// table is still prepared and learned so that a failing table surfaces as an error.
    pub fn learn<D: DataSource + ?Sized>(&self, dataset: &D) -> Result<Dag, StructureError> {
        let variables = dataset.variable_names();
        let tables = dataset.raw_datasets();
        if tables.is_empty() {
            return Err(LearningError::NoData.into());
        }

        let expected: BTreeSet<&str> = variables.iter().map(String::as_str).collect();
        let mut combined: Option<Dag> = None;
        for (index, raw) in tables.iter().enumerate() {
            let found: BTreeSet<&str> = raw.column_names().collect();
            if found != expected {
                return Err(StructureError::InvalidInput(format!(
                    "table {} has columns {:?}, expected {:?}",
                    index, found, expected
                )));
            }

            let prepared = self.prepare(raw);
            if prepared.row_count() == 0 {
                return Err(LearningError::EmptyTable { index }.into());
            }

            let learned = self.learner.learn(&prepared)?;
            if let Some(unknown) = learned.vertices().find(|v| !variables.iter().any(|n| n == v)) {
                return Err(StructureError::InvalidInput(format!(
                    "learner returned unknown variable '{}' for table {}",
                    unknown, index
                )));
            }
            tracing::debug!(table = index, rows = prepared.row_count(), edges = learned.edge_count(), "Learned table structure");

            combined = Some(match (combined, self.config.aggregation) {
                (Some(acc), Aggregation::Union) => acc.compose(&learned),
                _ => learned,
            });
        }

        if self.config.aggregation == Aggregation::Last && tables.len() > 1 {
            tracing::warn!(
                discarded = tables.len() - 1,
                "Keeping only the structure learned from the last table"
            );
        }

        let learned = combined.unwrap_or_default();
        Ok(Dag::empty(variables).compose(&learned))
    }
}
