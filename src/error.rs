//! Error types shared across the crate.
use crate::validation::AcyclicityViolation;
use thiserror::Error;

/// Failures raised while producing a candidate graph from data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LearningError {
    /// The external discovery routine could not produce a graph
    /// (insufficient data, singular covariance, ...).
    #[error("Structure learner failed: {0}")]
    Learner(String),
    #[error("Dataset holds no tables to learn from")]
    NoData,
    #[error("Table {index} has no rows left after dropping missing values")]
    EmptyTable { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error(transparent)]
    Learning(#[from] LearningError),
    #[error("{0}")]
    Acyclicity(AcyclicityViolation),
    #[error("Merge type '{0}' is not supported (expected 'replace', 'union' or 'add')")]
    UnsupportedMergeType(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cycle detected involving variable '{vertex}'")]
    Cycle { vertex: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<AcyclicityViolation> for StructureError {
    fn from(violation: AcyclicityViolation) -> Self {
        StructureError::Acyclicity(violation)
    }
}
