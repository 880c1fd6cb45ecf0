//! Order-dependent graph analyses.
pub mod topology;
