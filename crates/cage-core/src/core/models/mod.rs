//! # Core Models Module
//!
//! This module contains the data structures used to represent polyhedral cages,
//! providing the shared model that every construction, validation and search
//! component operates on.
//!
//! ## Overview
//!
//! A cage is a [`graph::Graph`] owning three arenas (vertices, links and faces)
//! plus a small registry of named vertex types. Components refer to each other
//! through typed slot-map handles, never through references, so graphs can be
//! cloned, discarded or mirrored without dangling links.
//!
//! ## Key Components
//!
//! - [`vertex`] - Vertex with position, orientation, display attributes and link handles
//! - [`link`] - Undirected link between two vertices
//! - [`polygon`] - Face stored as an oriented cyclic vertex sequence
//! - [`registry`] - Named vertex types with component counts
//! - [`graph`] - The owning container and its mutation API
//! - [`ids`] - Handle types for vertices, links and faces
//!
//! ## Usage
//!
//! ```ignore
//! use spiralcage::core::models::graph::Graph;
//!
//! let mut graph = Graph::new(3);
//! let a = graph.add_vertex(1);
//! let b = graph.add_vertex(2);
//! graph.add_edge(a, b)?;
//! ```

pub mod graph;
pub mod ids;
pub mod link;
pub mod polygon;
pub mod registry;
pub mod vertex;
