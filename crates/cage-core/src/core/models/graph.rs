use super::ids::{EdgeId, FaceId, VertexId};
use super::link::Link;
use super::polygon::Polygon;
use super::registry::{DEFAULT_VERTEX_TYPE, VertexTypeRegistry};
use super::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

/// Target valence of the trivalent cages handled by this crate.
pub const DEFAULT_VALENCE: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Vertex {0:?} does not belong to this graph")]
    VertexNotFound(VertexId),

    #[error("Vertex {number} already carries {valence} links")]
    ValenceExceeded { number: usize, valence: usize },

    #[error("Cannot link vertex {0} to itself")]
    SelfLoop(usize),

    #[error("A face needs at least 3 vertices, got {0}")]
    DegenerateFace(usize),
}

/// A polyhedral cage: vertices, links and faces with a vertex-type registry.
///
/// All components live in slot-map arenas owned by the graph and refer to one
/// another through typed handles, so a [`Clone`] of the graph is a complete,
/// independent copy whose handles resolve against its own arenas.
///
/// The graph also remembers the spiral cursor: the boundary vertex where the
/// most recent face ended. The spiral builder uses it to continue the spiral.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Model identifier.
    id: String,
    /// Maximum number of links per vertex.
    valence: usize,
    /// Primary storage for vertices.
    vertices: SlotMap<VertexId, Vertex>,
    /// Primary storage for links.
    edges: SlotMap<EdgeId, Link>,
    /// Primary storage for faces.
    faces: SlotMap<FaceId, Polygon>,
    /// Vertex handles in creation order.
    vertex_order: Vec<VertexId>,
    /// Face handles in insertion order.
    face_order: Vec<FaceId>,
    /// Lookup map for finding vertices by their number.
    vertex_number_map: HashMap<usize, VertexId>,
    /// Lookup map for finding the link joining an unordered vertex pair.
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    types: VertexTypeRegistry,
    cursor: Option<VertexId>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(DEFAULT_VALENCE)
    }
}

impl Graph {
    /// Creates a new, empty graph whose vertices accept at most `valence` links.
    pub fn new(valence: usize) -> Self {
        Self::with_id("1", valence)
    }

    /// Creates a new, empty graph with the given model identifier.
    pub fn with_id(id: &str, valence: usize) -> Self {
        Self {
            id: id.to_string(),
            valence,
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            vertex_order: Vec::new(),
            face_order: Vec::new(),
            vertex_number_map: HashMap::new(),
            edge_lookup: HashMap::new(),
            types: VertexTypeRegistry::new(),
            cursor: None,
        }
    }

    /// Returns the model identifier, usually the sequence the cage was built from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replaces the model identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The new identifier.
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    /// Returns the maximum number of links any vertex may carry.
    pub fn valence(&self) -> usize {
        self.valence
    }

    /// Retrieves an immutable reference to a vertex by its handle.
    ///
    /// # Arguments
    ///
    /// * `id` - The handle to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Vertex)` if the vertex exists, otherwise `None`.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Retrieves a mutable reference to a vertex by its handle.
    ///
    /// # Arguments
    ///
    /// * `id` - The handle to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&mut Vertex)` if the vertex exists, otherwise `None`.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    /// Retrieves an immutable reference to a link by its handle.
    ///
    /// # Arguments
    ///
    /// * `id` - The handle to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Link)` if the link exists, otherwise `None`.
    pub fn edge(&self, id: EdgeId) -> Option<&Link> {
        self.edges.get(id)
    }

    /// Retrieves a mutable reference to a link by its handle.
    ///
    /// # Arguments
    ///
    /// * `id` - The handle to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&mut Link)` if the link exists, otherwise `None`.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Link> {
        self.edges.get_mut(id)
    }

    /// Retrieves an immutable reference to a face by its handle.
    ///
    /// # Arguments
    ///
    /// * `id` - The handle to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Polygon)` if the face exists, otherwise `None`.
    pub fn face(&self, id: FaceId) -> Option<&Polygon> {
        self.faces.get(id)
    }

    /// Returns an iterator over all vertices in creation order.
    pub fn vertices_iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertex_order
            .iter()
            .map(move |&id| (id, &self.vertices[id]))
    }

    /// Returns a mutable iterator over all vertices (arena order).
    pub fn vertices_iter_mut(&mut self) -> impl Iterator<Item = (VertexId, &mut Vertex)> {
        self.vertices.iter_mut()
    }

    /// Returns the vertex handles in creation order.
    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.vertex_order
    }

    /// Returns an iterator over all links.
    ///
    /// # Return
    ///
    /// An iterator yielding `(EdgeId, &Link)` pairs in arena order.
    pub fn edges_iter(&self) -> impl Iterator<Item = (EdgeId, &Link)> {
        self.edges.iter()
    }

    /// Returns an iterator over all faces in insertion order.
    pub fn faces_iter(&self) -> impl Iterator<Item = (FaceId, &Polygon)> {
        self.face_order.iter().map(move |&id| (id, &self.faces[id]))
    }

    /// Returns the registry of vertex types used by this graph.
    pub fn types(&self) -> &VertexTypeRegistry {
        &self.types
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Finds a vertex by its number.
    pub fn find_vertex(&self, number: usize) -> Option<VertexId> {
        self.vertex_number_map.get(&number).copied()
    }

    /// Returns the link joining `v1` and `v2`, in either direction.
    pub fn edge_between(&self, v1: VertexId, v2: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&ordered_pair(v1, v2)).copied()
    }

    /// Returns the number of links attached to a vertex, or 0 for unknown handles.
    pub fn degree(&self, id: VertexId) -> usize {
        self.vertices.get(id).map_or(0, Vertex::degree)
    }

    /// Returns `true` if the vertex already carries the graph's valence.
    ///
    /// Unknown handles have degree 0 and are never saturated.
    pub fn is_saturated(&self, id: VertexId) -> bool {
        self.degree(id) >= self.valence
    }

    /// Returns the neighbors of a vertex in link attachment order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(id)
            .map(|v| v.edges())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&e| self.edges.get(e).and_then(|link| link.other(id)))
    }

    /// Adds a vertex of the default type or returns the existing one.
    ///
    /// This method is idempotent; if a vertex with the given number already
    /// exists, its handle is returned and nothing is created.
    pub fn add_vertex(&mut self, number: usize) -> VertexId {
        self.add_vertex_of_type(number, DEFAULT_VERTEX_TYPE)
    }

    /// Adds a vertex of the named type, registering the type on first use.
    pub fn add_vertex_of_type(&mut self, number: usize, type_name: &str) -> VertexId {
        if let Some(&id) = self.vertex_number_map.get(&number) {
            return id;
        }
        let type_id = self.types.register(type_name);
        self.types.increment(type_id);
        let id = self.vertices.insert(Vertex::new(number, type_id));
        self.vertex_order.push(id);
        self.vertex_number_map.insert(number, id);
        id
    }

    /// Returns the smallest vertex number not yet in use above all existing ones.
    pub fn next_vertex_number(&self) -> usize {
        self.vertices.values().map(|v| v.number).max().unwrap_or(0) + 1
    }

    /// Links two vertices, or returns the existing link between them.
    ///
    /// The new link is recorded on both endpoints. It is idempotent; linking
    /// an already linked pair succeeds without touching either vertex.
    ///
    /// # Errors
    ///
    /// Fails if either handle is unknown, if both handles are the same vertex,
    /// or if an endpoint already carries the target valence.
    pub fn add_edge(&mut self, v1: VertexId, v2: VertexId) -> Result<EdgeId, ModelError> {
        let number1 = self
            .vertices
            .get(v1)
            .ok_or(ModelError::VertexNotFound(v1))?
            .number;
        if !self.vertices.contains_key(v2) {
            return Err(ModelError::VertexNotFound(v2));
        }
        if v1 == v2 {
            return Err(ModelError::SelfLoop(number1));
        }
        if let Some(existing) = self.edge_between(v1, v2) {
            return Ok(existing);
        }
        for v in [v1, v2] {
            if self.is_saturated(v) {
                return Err(ModelError::ValenceExceeded {
                    number: self.vertices[v].number,
                    valence: self.valence,
                });
            }
        }

        let edge_id = self.edges.insert(Link::new(v1, v2));
        self.edge_lookup.insert(ordered_pair(v1, v2), edge_id);
        self.vertices[v1].attach(edge_id);
        self.vertices[v2].attach(edge_id);
        Ok(edge_id)
    }

    /// Inserts a face over existing vertices and marks it closed when every
    /// side, including the closing one, is linked.
    pub fn insert_face(&mut self, vertices: Vec<VertexId>) -> Result<FaceId, ModelError> {
        if vertices.len() < 3 {
            return Err(ModelError::DegenerateFace(vertices.len()));
        }
        if let Some(&missing) = vertices.iter().find(|&&v| !self.vertices.contains_key(v)) {
            return Err(ModelError::VertexNotFound(missing));
        }
        let mut polygon = Polygon::new(vertices);
        polygon.closed = self.is_face_closed(&polygon);
        polygon.normal = self.face_normal(&polygon);
        let face_id = self.faces.insert(polygon);
        self.face_order.push(face_id);
        Ok(face_id)
    }

    /// Returns `true` if every side of the polygon is a link of this graph.
    pub fn is_face_closed(&self, polygon: &Polygon) -> bool {
        polygon
            .sides()
            .all(|(a, b)| self.edge_between(a, b).is_some())
    }

    /// Returns a fully independent copy of the graph.
    pub fn deep_copy(&self) -> Graph {
        self.clone()
    }

    /// Returns a fully independent copy of the graph under a new identifier.
    pub fn deep_copy_with_id(&self, id: &str) -> Graph {
        let mut copy = self.clone();
        copy.id = id.to_string();
        copy
    }

    /// Recomputes link lengths and face normals from the vertex positions.
    pub fn update_geometry(&mut self) {
        for link in self.edges.values_mut() {
            let p1 = self.vertices[link.vertex1].position;
            let p2 = self.vertices[link.vertex2].position;
            link.length = (p2 - p1).norm();
        }
        let normals: Vec<(FaceId, Vector3<f64>)> = self
            .faces
            .iter()
            .map(|(id, polygon)| (id, self.face_normal(polygon)))
            .collect();
        for (id, normal) in normals {
            self.faces[id].normal = normal;
        }
    }

    /// Returns the centroid of all vertex positions.
    pub fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum: Vector3<f64> = self.vertices.values().map(|v| v.position.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    pub(crate) fn cursor(&self) -> Option<VertexId> {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<VertexId>) {
        self.cursor = cursor;
    }

    pub(crate) fn faces_iter_mut(&mut self) -> impl Iterator<Item = &mut Polygon> {
        self.faces.values_mut()
    }

    // Newell's method; zero for collinear or coincident positions.
    fn face_normal(&self, polygon: &Polygon) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        for (a, b) in polygon.sides() {
            let p = self.vertices[a].position;
            let q = self.vertices[b].position;
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
    }
}

fn ordered_pair(v1: VertexId, v2: VertexId) -> (VertexId, VertexId) {
    if v1 <= v2 { (v1, v2) } else { (v2, v1) }
}
