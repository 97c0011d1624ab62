use super::builder::StructuralError;
use crate::core::models::graph::Graph;
use crate::core::models::ids::VertexId;
use std::collections::{HashMap, HashSet};

/// The open rim of a partially wound cage as one oriented cycle of vertices.
///
/// Boundary sides are the directed sides used by exactly one face; the cycle
/// follows them in the direction the faces traverse them.
#[derive(Debug, Clone, Default)]
pub(crate) struct Boundary {
    cycle: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
}

impl Boundary {
    pub fn trace(graph: &Graph) -> Result<Self, StructuralError> {
        let mut darts: HashSet<(VertexId, VertexId)> = HashSet::new();
        for (_, polygon) in graph.faces_iter() {
            for dart in polygon.sides() {
                if !darts.insert(dart) {
                    return Err(StructuralError::BrokenBoundary(
                        "a side is traversed twice in the same direction".to_string(),
                    ));
                }
            }
        }

        let mut next: HashMap<VertexId, VertexId> = HashMap::new();
        for &(u, v) in &darts {
            if darts.contains(&(v, u)) {
                continue;
            }
            if next.insert(u, v).is_some() {
                return Err(StructuralError::BrokenBoundary(
                    "a vertex is pinched between two boundary arcs".to_string(),
                ));
            }
        }
        if next.is_empty() {
            return Ok(Self::default());
        }

        let start = graph
            .vertex_ids()
            .iter()
            .copied()
            .find(|v| next.contains_key(v))
            .ok_or_else(|| {
                StructuralError::BrokenBoundary("boundary vertex not in graph".to_string())
            })?;

        let mut cycle = Vec::with_capacity(next.len());
        let mut current = start;
        loop {
            cycle.push(current);
            current = *next.get(&current).ok_or_else(|| {
                StructuralError::BrokenBoundary("boundary arc does not close".to_string())
            })?;
            if current == start {
                break;
            }
            if cycle.len() > next.len() {
                return Err(StructuralError::BrokenBoundary(
                    "boundary arc revisits a vertex".to_string(),
                ));
            }
        }
        if cycle.len() != next.len() {
            return Err(StructuralError::BrokenBoundary(format!(
                "boundary splits into several cycles ({} of {} sides traced)",
                cycle.len(),
                next.len()
            )));
        }

        let index = cycle.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        Ok(Self { cycle, index })
    }

    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    pub fn position(&self, vertex: VertexId) -> Option<usize> {
        self.index.get(&vertex).copied()
    }

    /// Returns the vertex `offset` steps from `position`, wrapping in either direction.
    pub fn at(&self, position: usize, offset: isize) -> VertexId {
        let n = self.cycle.len() as isize;
        let i = (position as isize + offset).rem_euclid(n);
        self.cycle[i as usize]
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_pentagon() -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new(3);
        let vertices: Vec<_> = (1..=5).map(|n| graph.add_vertex(n)).collect();
        for i in 0..5 {
            graph
                .add_edge(vertices[i], vertices[(i + 1) % 5])
                .unwrap();
        }
        graph.insert_face(vertices.clone()).unwrap();
        (graph, vertices)
    }

    #[test]
    fn empty_graph_has_empty_boundary() {
        let graph = Graph::new(3);
        assert!(Boundary::trace(&graph).unwrap().is_empty());
    }

    #[test]
    fn single_face_boundary_follows_face_order() {
        let (graph, vertices) = seeded_pentagon();
        let boundary = Boundary::trace(&graph).unwrap();
        assert_eq!(boundary.vertices(), vertices.as_slice());
        assert_eq!(boundary.position(vertices[3]), Some(3));
        assert_eq!(boundary.at(0, -1), vertices[4]);
        assert_eq!(boundary.at(4, 2), vertices[1]);
    }

    #[test]
    fn both_orientations_of_a_face_leave_no_boundary() {
        let (mut graph, mut vertices) = seeded_pentagon();
        vertices.reverse();
        graph.insert_face(vertices).unwrap();
        assert!(Boundary::trace(&graph).unwrap().is_empty());
    }

    #[test]
    fn duplicated_face_orientation_is_rejected() {
        let (mut graph, vertices) = seeded_pentagon();
        graph.insert_face(vertices).unwrap();
        assert!(matches!(
            Boundary::trace(&graph),
            Err(StructuralError::BrokenBoundary(_))
        ));
    }
}
