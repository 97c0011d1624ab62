//! # Symmetry Module
//!
//! Point-group assignment for finished cages.
//!
//! The search engine tags every accepted cage with its point group and uses
//! the group to decide whether a distinct mirror image exists. Detection is
//! consumed through the [`SymmetryDetector`] trait; the built-in
//! [`MapAutomorphismDetector`] derives the group from the automorphisms of
//! the oriented face map and therefore needs no regularized coordinates.

pub mod automorphism;
pub mod point_group;

pub use automorphism::{MapAutomorphismDetector, SymmetryAnalysis, SymmetryDetector, SymmetryError};
pub use point_group::PointGroup;
