//! # Workflows Module
//!
//! High-level entry points that take a configuration and return finished
//! results, reporting progress along the way.
//!
//! - **Enumeration Workflow** ([`enumerate`]) - Runs one search strategy to
//!   completion (or to its acceptance bound) and returns the distinct cages.
//! - **Build Workflow** ([`build`]) - Winds a single face sequence, checks
//!   the result and reports its symmetry, signature and mirror image.
//! - **Tube Workflow** ([`tube`]) - Rolls an open tube from the hexagonal
//!   lattice and checks it.

pub mod build;
pub mod enumerate;
pub mod tube;
