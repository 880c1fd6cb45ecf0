use super::table::Table;
use crate::error::LearningError;
use crate::graph::Dag;

/// An external causal-discovery routine (constraint-based search, score search, ...).
///
/// Implementations receive a prepared table whose columns are the variables and return a
/// directed graph over those columns.
pub trait StructureLearner {
    fn learn(&self, table: &Table) -> Result<Dag, LearningError>;
}

impl<F> StructureLearner for F
where
    F: Fn(&Table) -> Result<Dag, LearningError>,
{
    fn learn(&self, table: &Table) -> Result<Dag, LearningError> {
        self(table)
    }
}
