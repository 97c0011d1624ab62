use crate::core::models::graph::Graph;
use crate::core::models::ids::VertexId;
use std::collections::HashMap;

/// Euler characteristic of a closed sphere-like cage.
pub const SPHERE_EULER_CHARACTERISTIC: i64 = 2;

/// Outcome of checking a finished graph against the closed-cage invariants.
///
/// Each field counts violations of one kind; the report itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub euler_characteristic: i64,
    /// 1 when `V - E + F` differs from 2.
    pub euler_mismatch: u32,
    /// Vertices whose link count differs from the target valence.
    pub valence_mismatch: u32,
    /// Faces with at least one side that is not a link.
    pub unclosed_faces: u32,
    /// Directed sides traversed by more than one face.
    pub orientation_conflicts: u32,
}

impl ValidationReport {
    pub fn errors(&self) -> u32 {
        self.euler_mismatch + self.valence_mismatch + self.unclosed_faces + self.orientation_conflicts
    }

    pub fn euler_ok(&self) -> bool {
        self.euler_mismatch == 0
    }

    pub fn valence_ok(&self) -> bool {
        self.valence_mismatch == 0
    }

    pub fn faces_closed(&self) -> bool {
        self.unclosed_faces == 0
    }

    pub fn is_valid(&self) -> bool {
        self.errors() == 0
    }

    /// One-line description of the violations, empty when valid.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.euler_ok() {
            parts.push(format!(
                "Euler characteristic {} (V={}, E={}, F={})",
                self.euler_characteristic, self.vertices, self.edges, self.faces
            ));
        }
        if !self.valence_ok() {
            parts.push(format!("{} vertices off target valence", self.valence_mismatch));
        }
        if !self.faces_closed() {
            parts.push(format!("{} unclosed faces", self.unclosed_faces));
        }
        if self.orientation_conflicts > 0 {
            parts.push(format!(
                "{} sides with conflicting orientation",
                self.orientation_conflicts
            ));
        }
        parts.join("; ")
    }
}

/// Checks Euler's formula, vertex valence, face closure and face orientation.
pub fn check(graph: &Graph) -> ValidationReport {
    let vertices = graph.vertex_count();
    let edges = graph.edge_count();
    let faces = graph.face_count();
    let euler_characteristic = vertices as i64 - edges as i64 + faces as i64;

    let valence_mismatch = graph
        .vertex_ids()
        .iter()
        .filter(|&&v| graph.degree(v) != graph.valence())
        .count() as u32;

    let unclosed_faces = graph
        .faces_iter()
        .filter(|(_, polygon)| !graph.is_face_closed(polygon))
        .count() as u32;

    let mut dart_use: HashMap<(VertexId, VertexId), u32> = HashMap::new();
    for (_, polygon) in graph.faces_iter() {
        for dart in polygon.sides() {
            *dart_use.entry(dart).or_default() += 1;
        }
    }
    let orientation_conflicts = dart_use.values().filter(|&&n| n > 1).count() as u32;

    ValidationReport {
        vertices,
        edges,
        faces,
        euler_characteristic,
        euler_mismatch: u32::from(euler_characteristic != SPHERE_EULER_CHARACTERISTIC),
        valence_mismatch,
        unclosed_faces,
        orientation_conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spiral::{add_face, build_cage};

    #[test]
    fn closed_cages_pass_every_check() {
        for sequence in ["555555555555", "65555555555556"] {
            let graph = build_cage(&sequence.parse().unwrap(), 3).unwrap();
            let report = check(&graph);
            assert!(report.is_valid(), "{sequence}: {}", report.summary());
            assert_eq!(report.euler_characteristic, 2);
            assert!(report.summary().is_empty());
        }
    }

    #[test]
    fn open_cage_reports_euler_and_valence_mismatch() {
        let mut graph = Graph::new(3);
        for _ in 0..6 {
            add_face(&mut graph, 5).unwrap();
        }
        let report = check(&graph);
        assert!(!report.euler_ok());
        assert!(!report.valence_ok());
        assert!(report.faces_closed());
        assert_eq!(report.orientation_conflicts, 0);
        assert!(report.errors() >= 2);
    }

    #[test]
    fn unclosed_and_conflicting_faces_are_counted() {
        let mut graph = Graph::new(3);
        let a = graph.add_vertex(1);
        let b = graph.add_vertex(2);
        let c = graph.add_vertex(3);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.insert_face(vec![a, b, c]).unwrap();
        graph.insert_face(vec![a, b, c]).unwrap();

        let report = check(&graph);
        assert_eq!(report.unclosed_faces, 2);
        assert_eq!(report.orientation_conflicts, 3);
        assert_eq!(report.valence_mismatch, 3);
        assert!(!report.is_valid());
    }
}
