//! Adapter around an external structure-learning routine.
pub mod adapter;
pub mod dataset;
pub mod learner;
pub mod table;

pub use adapter::LearnerAdapter;
pub use dataset::{DataSource, Dataset};
pub use learner::StructureLearner;
pub use table::{Cell, Column, ColumnKind, Table};
