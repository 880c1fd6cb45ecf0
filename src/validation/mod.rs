//! Structural validation of causal graphs.
mod error;
mod validator;

pub use self::error::AcyclicityViolation;
pub use self::validator::{find_cycles, Validator};
