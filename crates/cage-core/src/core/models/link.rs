use super::ids::VertexId;
use super::vertex::{Color, DEFAULT_COLOR};

/// An undirected link between two vertices of a cage.
///
/// The endpoint order records which vertex the link was created from; every
/// query on the link treats both ends alike.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub vertex1: VertexId, // First endpoint
    pub vertex2: VertexId, // Second endpoint
    /// Euclidean distance between the endpoints, refreshed by `Graph::update_geometry`.
    pub length: f64,
    /// The display radius.
    pub radius: f64,
    /// The display color.
    pub color: Color,
    /// The figure-of-merit assigned by downstream processing.
    pub fom: f64,
}

impl Link {
    /// Creates a link of zero length with default display attributes.
    ///
    /// # Arguments
    ///
    /// * `vertex1` - The endpoint the link starts from.
    /// * `vertex2` - The opposite endpoint.
    pub fn new(vertex1: VertexId, vertex2: VertexId) -> Self {
        Self {
            vertex1,
            vertex2,
            length: 0.0,
            radius: 0.5,
            color: DEFAULT_COLOR,
            fom: 0.0,
        }
    }

    /// Checks whether the link touches a vertex.
    ///
    /// # Arguments
    ///
    /// * `vertex_id` - The vertex to look for.
    ///
    /// # Return
    ///
    /// Returns `true` if `vertex_id` is either endpoint.
    pub fn contains(&self, vertex_id: VertexId) -> bool {
        self.vertex1 == vertex_id || self.vertex2 == vertex_id
    }

    /// Returns the endpoint opposite to `vertex_id`.
    ///
    /// # Return
    ///
    /// Returns `None` if the link does not touch `vertex_id`.
    pub fn other(&self, vertex_id: VertexId) -> Option<VertexId> {
        if self.vertex1 == vertex_id {
            Some(self.vertex2)
        } else if self.vertex2 == vertex_id {
            Some(self.vertex1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_vertex_id(n: u64) -> VertexId {
        VertexId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn link_new_initializes_fields_correctly() {
        let v1 = dummy_vertex_id(1);
        let v2 = dummy_vertex_id(2);
        let link = Link::new(v1, v2);
        assert_eq!(link.vertex1, v1);
        assert_eq!(link.vertex2, v2);
        assert_eq!(link.length, 0.0);
        assert_eq!(link.color, DEFAULT_COLOR);
    }

    #[test]
    fn link_contains_returns_true_for_both_vertices() {
        let v1 = dummy_vertex_id(10);
        let v2 = dummy_vertex_id(20);
        let link = Link::new(v1, v2);
        assert!(link.contains(v1));
        assert!(link.contains(v2));
        assert!(!link.contains(dummy_vertex_id(30)));
    }

    #[test]
    fn link_other_returns_opposite_endpoint() {
        let v1 = dummy_vertex_id(100);
        let v2 = dummy_vertex_id(200);
        let link = Link::new(v1, v2);
        assert_eq!(link.other(v1), Some(v2));
        assert_eq!(link.other(v2), Some(v1));
        assert_eq!(link.other(dummy_vertex_id(300)), None);
    }
}
