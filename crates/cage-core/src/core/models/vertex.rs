use super::ids::EdgeId;
use super::registry::VertexTypeId;
use nalgebra::{Point3, UnitQuaternion};

/// An RGBA color used for display attributes of vertices and links.
pub type Color = [f32; 4];

/// Default display color of newly created components (opaque white).
pub const DEFAULT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

/// Represents a vertex of a polyhedral cage with its display and bookkeeping attributes.
///
/// Vertices never own their links. They hold handles into the edge arena of the
/// [`Graph`](super::graph::Graph) that created them, in the order the links were
/// attached. The number of attached links is bounded by the graph's target valence.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The identity of the vertex, unique within its graph.
    pub number: usize,
    /// The 3D position of the vertex.
    pub position: Point3<f64>,
    /// The orientation of the vertex frame.
    pub orientation: UnitQuaternion<f64>,
    /// The display radius.
    pub radius: f64,
    /// The display color.
    pub color: Color,
    /// The figure-of-merit assigned by downstream processing.
    pub fom: f64,
    /// Whether the vertex is selected.
    pub selected: bool,
    /// The registered type of this vertex.
    pub type_id: VertexTypeId,
    edges: Vec<EdgeId>,
}

impl Vertex {
    /// Creates a new `Vertex` at the origin with default display attributes.
    ///
    /// # Arguments
    ///
    /// * `number` - The identity of the vertex.
    /// * `type_id` - The registered type of the vertex.
    pub fn new(number: usize, type_id: VertexTypeId) -> Self {
        Self {
            number,
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            radius: 1.0,
            color: DEFAULT_COLOR,
            fom: 0.0,
            selected: true,
            type_id,
            edges: Vec::new(),
        }
    }

    /// Returns the links attached to this vertex.
    ///
    /// # Return
    ///
    /// A slice of edge handles in the order the links were attached.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Returns the number of attached links.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Checks whether the vertex can take no further links.
    ///
    /// # Arguments
    ///
    /// * `valence` - The target number of links per vertex.
    ///
    /// # Return
    ///
    /// Returns `true` once the vertex carries `valence` links.
    pub fn is_saturated(&self, valence: usize) -> bool {
        self.edges.len() >= valence
    }

    pub(crate) fn attach(&mut self, edge_id: EdgeId) {
        if !self.edges.contains(&edge_id) {
            self.edges.push(edge_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_edge_id(n: u64) -> EdgeId {
        EdgeId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_vertex_has_expected_default_fields() {
        let vertex = Vertex::new(7, VertexTypeId::default());

        assert_eq!(vertex.number, 7);
        assert_eq!(vertex.position, Point3::origin());
        assert_eq!(vertex.orientation, UnitQuaternion::identity());
        assert_eq!(vertex.radius, 1.0);
        assert_eq!(vertex.color, DEFAULT_COLOR);
        assert_eq!(vertex.fom, 0.0);
        assert!(vertex.selected);
        assert_eq!(vertex.degree(), 0);
    }

    #[test]
    fn attach_is_idempotent_per_edge() {
        let mut vertex = Vertex::new(1, VertexTypeId::default());
        let e1 = dummy_edge_id(1);
        let e2 = dummy_edge_id(2);

        vertex.attach(e1);
        vertex.attach(e1);
        vertex.attach(e2);

        assert_eq!(vertex.edges(), &[e1, e2]);
    }

    #[test]
    fn saturation_follows_valence() {
        let mut vertex = Vertex::new(1, VertexTypeId::default());
        for n in 1..=3 {
            assert!(!vertex.is_saturated(3));
            vertex.attach(dummy_edge_id(n));
        }
        assert!(vertex.is_saturated(3));
        assert!(!vertex.is_saturated(4));
    }
}
