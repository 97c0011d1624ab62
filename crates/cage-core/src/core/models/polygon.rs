use super::ids::VertexId;
use itertools::Itertools;
use nalgebra::Vector3;

/// A face of a cage, stored as a cyclic sequence of vertex handles.
///
/// The sequence is traversed in the face's orientation; consecutive vertices
/// (including the last and the first) are expected to be joined by links.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<VertexId>,
    /// The unit normal of the face, recomputed from vertex positions.
    pub normal: Vector3<f64>,
    /// Whether every consecutive pair, including last to first, is linked.
    pub closed: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self {
            vertices,
            normal: Vector3::zeros(),
            closed: false,
        }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns the number of vertices (and sides) of the face.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains(&self, vertex_id: VertexId) -> bool {
        self.vertices.contains(&vertex_id)
    }

    /// Iterates over the directed sides of the face, closing side included.
    pub fn sides(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.iter().copied().circular_tuple_windows()
    }

    pub(crate) fn reverse(&mut self) {
        self.vertices.reverse();
    }
}
