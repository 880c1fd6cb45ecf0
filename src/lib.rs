//! # causal_structure_core
//!
//! Maintains a DAG of causal relationships among a fixed set of named variables and merges
//! graphs produced by an external structure-learning routine into it.
//!
//! ```text
//! DataSource → LearnerAdapter → candidate Dag → MergeEngine → CausalStructure
//!                    ↓                                              ↓
//!             StructureLearner                           GraphProperties (recomputed)
//! ```
//!
//! Three merge types are supported: `replace` installs the candidate as-is, `union` takes
//! both edge sets (and may introduce cycles), and `add` merges edge by edge with the priority
//! graph winning directional conflicts. Whether a cyclic result is installed or rejected is
//! decided by [`CyclePolicy`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod learning;
pub mod merge;
pub mod structure;
pub mod validation;

// Re-exports
pub use config::{Aggregation, CyclePolicy, LearningConfig, StructureConfig};
pub use error::{LearningError, StructureError};
pub use graph::{Dag, GraphProperties, ParentList};
pub use learning::{Cell, Column, ColumnKind, DataSource, Dataset, LearnerAdapter, StructureLearner, Table};
pub use merge::{MergeEngine, MergeReport, MergeType, Priority};
pub use structure::CausalStructure;
pub use validation::{AcyclicityViolation, Validator};
