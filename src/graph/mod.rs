//! Defines the core data structures for the causal graph.
pub mod dag;
pub mod properties;

// Re-export key types for convenient access
pub use dag::Dag;
pub use properties::{GraphProperties, ParentList};
