//! Merges candidate graphs into the current structure.
pub mod engine;
pub mod policy;
mod report;

pub use engine::{add, MergeEngine, MergeOutcome};
pub use policy::{MergeType, Priority};
pub use report::MergeReport;
