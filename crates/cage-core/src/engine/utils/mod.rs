//! Utility functions for the engine module.
//!
//! This module provides the combinatorial helpers the candidate producers are
//! built on: a lazy distinct-permutation iterator over multisets and exact,
//! saturating arrangement counts used for search-size estimates.

pub mod permutations;
