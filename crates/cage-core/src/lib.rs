//! # Spiral Cage Core Library
//!
//! A library for generating trivalent polyhedral cages (capsid-like cages and
//! fullerene analogues) from compact face-size sequences with the spiral
//! algorithm, checking them, removing duplicates and pairing chiral cages
//! with their mirror images.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Graph`, `FaceSequence`)
//!   and pure algorithms: spiral winding, consistency checks, regularization,
//!   symmetry detection, canonical signatures and reflection.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It owns the
//!   `SearchSession` with its signature table, drives each candidate through
//!   its life cycle and provides the candidate producers for the exhaustive,
//!   templated and jiggle searches.
//!
//! - **[`workflows`]: The Public API.** Entry points that run a complete
//!   enumeration or build a single cage from a configuration, reporting
//!   progress through a callback.

pub mod core;
pub mod engine;
pub mod workflows;
