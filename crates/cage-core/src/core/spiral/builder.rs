use super::boundary::Boundary;
use crate::core::models::graph::{Graph, ModelError};
use crate::core::models::ids::{FaceId, VertexId};
use crate::core::sequence::FaceSequence;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("No open boundary run is available to continue the spiral")]
    NoBoundaryContinuation,

    #[error("A face of size {size} cannot span a boundary run of {required} vertices")]
    FaceSizeMismatch { size: usize, required: usize },

    #[error("Face size {0} is too small; faces need at least 3 vertices")]
    InvalidFaceSize(usize),

    #[error("The open boundary is not a single simple cycle: {0}")]
    BrokenBoundary(String),

    #[error("Graph model error: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Face {face_index} (size {size}) could not be wound: {source}")]
pub struct CageBuildError {
    /// 0-based position of the failing face in the sequence.
    pub face_index: usize,
    pub size: usize,
    #[source]
    pub source: StructuralError,
}

/// What a single call to [`add_face`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceAddition {
    pub face: FaceId,
    /// Vertices created for this face, in the order they appear along it.
    pub new_vertices: Vec<VertexId>,
    /// Number of vertices in the whole graph that reached the target valence.
    pub saturated: usize,
    /// `true` once no open boundary remains.
    pub cage_closed: bool,
}

/// Winds one more face of `size` vertices onto the spiral.
///
/// An empty graph is seeded with a single ring of `size` vertices. Otherwise
/// the face is anchored at the spiral cursor (or, without a usable cursor, at
/// the first unsaturated boundary vertex in creation order) and spans the
/// maximal run of saturated boundary vertices there, closed off by the
/// nearest unsaturated vertex on either side. When every boundary vertex is
/// already saturated, the face must cover the whole boundary and closes the
/// cage.
///
/// All preconditions are checked before the graph is touched, so an error
/// leaves the graph exactly as it was.
///
/// # Errors
///
/// Returns [`StructuralError`] when the face does not fit the current
/// boundary or the boundary itself is malformed.
pub fn add_face(graph: &mut Graph, size: usize) -> Result<FaceAddition, StructuralError> {
    if size < 3 {
        return Err(StructuralError::InvalidFaceSize(size));
    }
    if graph.is_empty() {
        return seed_ring(graph, size);
    }

    let boundary = Boundary::trace(graph)?;
    if boundary.is_empty() {
        return Err(StructuralError::NoBoundaryContinuation);
    }
    let n = boundary.len();
    let open = |v: VertexId| !graph.is_saturated(v);

    if !boundary.vertices().iter().any(|&v| open(v)) {
        return close_cage(graph, &boundary, size);
    }

    let anchor = graph
        .cursor()
        .filter(|&c| boundary.position(c).is_some())
        .or_else(|| {
            graph
                .vertex_ids()
                .iter()
                .copied()
                .find(|&v| open(v) && boundary.position(v).is_some())
        })
        .ok_or(StructuralError::NoBoundaryContinuation)?;
    let j = boundary
        .position(anchor)
        .ok_or(StructuralError::NoBoundaryContinuation)?;

    // `b` is the anchor itself when open, else the next open vertex ahead.
    let ib = (0..n as isize)
        .map(|k| (j as isize + k).rem_euclid(n as isize) as usize)
        .find(|&i| open(boundary.vertices()[i]))
        .ok_or(StructuralError::NoBoundaryContinuation)?;
    let ia = (1..=n as isize)
        .map(|k| (ib as isize - k).rem_euclid(n as isize) as usize)
        .find(|&i| open(boundary.vertices()[i]))
        .ok_or(StructuralError::NoBoundaryContinuation)?;
    if ia == ib {
        return Err(StructuralError::NoBoundaryContinuation);
    }

    let run = (ib + n - ia) % n + 1;
    if run > size {
        return Err(StructuralError::FaceSizeMismatch {
            size,
            required: run,
        });
    }
    let fresh = size - run;
    let a = boundary.vertices()[ia];
    let b = boundary.vertices()[ib];
    let covers_boundary = run == n;
    if fresh == 0 && !covers_boundary && graph.edge_between(a, b).is_some() {
        return Err(StructuralError::NoBoundaryContinuation);
    }

    let mut new_vertices = Vec::with_capacity(fresh);
    let mut path = Vec::with_capacity(fresh + 2);
    path.push(a);
    for _ in 0..fresh {
        let number = graph.next_vertex_number();
        let v = graph.add_vertex(number);
        new_vertices.push(v);
        path.push(v);
    }
    path.push(b);
    for pair in path.windows(2) {
        graph.add_edge(pair[0], pair[1])?;
    }

    let mut face_vertices = path;
    face_vertices.extend((1..run as isize - 1).map(|k| boundary.at(ib, -k)));
    let face = graph.insert_face(face_vertices)?;

    let cage_closed = fresh == 0 && covers_boundary;
    graph.set_cursor(if cage_closed { None } else { Some(b) });
    let saturated = count_saturated(graph);
    trace!(
        size,
        run,
        fresh,
        saturated,
        cage_closed,
        "Wound face onto boundary"
    );
    Ok(FaceAddition {
        face,
        new_vertices,
        saturated,
        cage_closed,
    })
}

/// Winds every face of `sequence` onto a fresh graph.
pub fn build_cage(sequence: &FaceSequence, valence: usize) -> Result<Graph, CageBuildError> {
    let mut graph = Graph::new(valence);
    for (face_index, &size) in sequence.sizes().iter().enumerate() {
        add_face(&mut graph, size as usize).map_err(|source| CageBuildError {
            face_index,
            size: size as usize,
            source,
        })?;
    }
    Ok(graph)
}

fn seed_ring(graph: &mut Graph, size: usize) -> Result<FaceAddition, StructuralError> {
    let first = graph.next_vertex_number();
    let ring: Vec<VertexId> = (first..first + size).map(|n| graph.add_vertex(n)).collect();
    for i in 0..size {
        graph.add_edge(ring[i], ring[(i + 1) % size])?;
    }
    let face = graph.insert_face(ring.clone())?;
    graph.set_cursor(ring.first().copied());
    trace!(size, "Seeded spiral with first face");
    Ok(FaceAddition {
        face,
        new_vertices: ring,
        saturated: count_saturated(graph),
        cage_closed: false,
    })
}

fn close_cage(
    graph: &mut Graph,
    boundary: &Boundary,
    size: usize,
) -> Result<FaceAddition, StructuralError> {
    if size != boundary.len() {
        return Err(StructuralError::FaceSizeMismatch {
            size,
            required: boundary.len(),
        });
    }
    let face_vertices: Vec<VertexId> = boundary.vertices().iter().rev().copied().collect();
    let face = graph.insert_face(face_vertices)?;
    graph.set_cursor(None);
    trace!(size, "Closed cage with final face");
    Ok(FaceAddition {
        face,
        new_vertices: Vec::new(),
        saturated: count_saturated(graph),
        cage_closed: true,
    })
}

fn count_saturated(graph: &Graph) -> usize {
    graph
        .vertex_ids()
        .iter()
        .filter(|&&v| graph.is_saturated(v))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(sequence: &str) -> Graph {
        build_cage(&sequence.parse().unwrap(), 3).unwrap()
    }

    fn assert_closed_trivalent(graph: &Graph) {
        for &v in graph.vertex_ids() {
            assert_eq!(graph.degree(v), 3);
        }
        for (_, face) in graph.faces_iter() {
            assert!(face.closed);
        }
        assert!(Boundary::trace(graph).unwrap().is_empty());
    }

    #[test]
    fn first_face_seeds_a_ring() {
        let mut graph = Graph::new(3);
        let added = add_face(&mut graph, 5).unwrap();
        assert_eq!(added.new_vertices.len(), 5);
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(added.saturated, 0);
        assert!(!added.cage_closed);
        assert_eq!(graph.cursor(), Some(added.new_vertices[0]));
    }

    #[test]
    fn second_face_shares_one_side_with_the_seed() {
        let mut graph = Graph::new(3);
        add_face(&mut graph, 5).unwrap();
        let added = add_face(&mut graph, 6).unwrap();
        assert_eq!(added.new_vertices.len(), 4);
        assert_eq!(graph.vertex_count(), 9);
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(added.saturated, 2);
        assert!(graph.face(added.face).unwrap().closed);
    }

    #[test]
    fn dodecahedron_closes() {
        let graph = build("555555555555");
        assert_eq!(graph.vertex_count(), 20);
        assert_eq!(graph.edge_count(), 30);
        assert_eq!(graph.face_count(), 12);
        assert_closed_trivalent(&graph);
        assert_eq!(graph.cursor(), None);
    }

    #[test]
    fn c24_closes() {
        let graph = build("65555555555556");
        assert_eq!(graph.vertex_count(), 24);
        assert_eq!(graph.edge_count(), 36);
        assert_eq!(graph.face_count(), 14);
        assert_closed_trivalent(&graph);
    }

    #[test]
    fn buckminsterfullerene_closes() {
        let positions: Vec<usize> = [1, 7, 9, 11, 13, 15, 18, 20, 22, 24, 26, 32]
            .iter()
            .map(|p| p - 1)
            .collect();
        let sequence = FaceSequence::from_pentagon_positions(32, &positions);
        let graph = build_cage(&sequence, 3).unwrap();
        assert_eq!(graph.vertex_count(), 60);
        assert_eq!(graph.edge_count(), 90);
        assert_eq!(graph.face_count(), 32);
        assert_closed_trivalent(&graph);
    }

    #[test]
    fn adding_to_a_finished_cage_fails_without_changes() {
        let mut graph = build("555555555555");
        let result = add_face(&mut graph, 5);
        assert_eq!(result, Err(StructuralError::NoBoundaryContinuation));
        assert_eq!(graph.face_count(), 12);
        assert_eq!(graph.vertex_count(), 20);
    }

    #[test]
    fn oversized_run_reports_mismatch_and_leaves_graph_untouched() {
        let mut graph = Graph::new(3);
        for _ in 0..11 {
            add_face(&mut graph, 5).unwrap();
        }
        let before = (graph.vertex_count(), graph.edge_count(), graph.face_count());
        let result = add_face(&mut graph, 6);
        assert_eq!(
            result,
            Err(StructuralError::FaceSizeMismatch {
                size: 6,
                required: 5
            })
        );
        assert_eq!(
            (graph.vertex_count(), graph.edge_count(), graph.face_count()),
            before
        );
    }

    #[test]
    fn build_cage_reports_failing_face_index() {
        let err = build_cage(&"5555555555555".parse().unwrap(), 3).unwrap_err();
        assert_eq!(err.face_index, 12);
        assert_eq!(err.source, StructuralError::NoBoundaryContinuation);
    }

    #[test]
    fn tiny_faces_are_rejected() {
        let mut graph = Graph::new(3);
        assert_eq!(
            add_face(&mut graph, 2),
            Err(StructuralError::InvalidFaceSize(2))
        );
        assert!(graph.is_empty());
    }
}
