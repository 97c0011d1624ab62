//! # Core Module
//!
//! This module provides the data model and the stateless algorithms for
//! building and analysing polyhedral cages from face-size sequences.
//!
//! ## Overview
//!
//! Everything in `core` operates on a single [`models::graph::Graph`] at a
//! time and keeps no state between calls. The search engine strings these
//! pieces together for every candidate sequence.
//!
//! ## Architecture
//!
//! - **Cage Representation** ([`models`]) - Arena-backed vertices, links, faces and vertex types
//! - **Face Sequences** ([`sequence`]) - Parsing and inspection of face-size strings
//! - **Spiral Winding** ([`spiral`]) - Incremental construction, one face per sequence element
//! - **Consistency Checks** ([`topology`]) - Euler characteristic, valence, closure and orientation
//! - **Embedding** ([`geometry`]) - Regularization of vertex positions
//! - **Symmetry** ([`symmetry`]) - Point-group assignment and chirality
//! - **Canonical Forms** ([`canonical`]) - Spectral signatures and the duplicate table
//! - **Mirror Images** ([`enantiomorph`]) - Reflection of chiral cages
//! - **Lattice Tubes** ([`lattice`]) - Open tubes rolled from the hexagonal lattice
//!
//! ## Key Invariants
//!
//! - A finished cage satisfies `V - E + F = 2` with every vertex at the target valence
//! - Every directed side of a finished cage belongs to exactly one face
//! - Links are unique per unordered vertex pair and never join a vertex to itself

pub mod canonical;
pub mod enantiomorph;
pub mod geometry;
pub mod lattice;
pub mod models;
pub mod sequence;
pub mod spiral;
pub mod symmetry;
pub mod topology;
