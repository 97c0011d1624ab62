//! Face-spiral winding of trivalent cages.
//!
//! A cage is wound one face at a time: each face is glued onto the open
//! boundary of the partial cage, sharing sides with the face wound just
//! before it and with the oldest faces that still have open corners. The
//! boundary is recovered from the faces already in the graph on every call,
//! so the only state carried between calls is the spiral cursor stored on the
//! [`Graph`](crate::core::models::graph::Graph).

mod boundary;
pub mod builder;

pub use builder::{CageBuildError, FaceAddition, StructuralError, add_face, build_cage};
