//! Topological consistency checks for finished cages.

pub mod validation;

pub use validation::{ValidationReport, check};
