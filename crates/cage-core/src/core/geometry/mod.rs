//! Embedding of cage graphs in space.
//!
//! The canonical signature of a cage is computed from vertex positions, so
//! every candidate is relaxed by a [`Regularizer`] before it is compared.
//! [`SphericalRelaxation`] is the built-in implementation; any other
//! `Regularizer` can be supplied to the search engine instead.

pub mod regularize;

pub use regularize::{Convergence, Regularizer, SphericalRelaxation};
