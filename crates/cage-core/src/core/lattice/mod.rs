//! Tubes rolled from the hexagonal lattice, parameterized by chiral vector.

pub mod tube;

pub use tube::{LatticeError, Tube, tube};
