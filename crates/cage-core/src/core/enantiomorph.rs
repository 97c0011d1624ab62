use crate::core::models::graph::Graph;
use crate::core::symmetry::PointGroup;
use nalgebra::{Quaternion, UnitQuaternion};

/// Suffix appended to the model id of a mirror image.
pub const MIRROR_SUFFIX: &str = "_mirror";

/// Returns the mirror image of `graph`, or `None` when `point_group` has an
/// improper element and the cage is therefore its own mirror image.
///
/// The copy is reflected through the plane `x = 0`. Face cycles are reversed
/// so the mirror keeps outward-facing orientation, and vertex orientations
/// are reflected along with the positions.
pub fn generate(graph: &Graph, point_group: &PointGroup) -> Option<Graph> {
    if !point_group.is_chiral() {
        return None;
    }
    Some(reflect(graph))
}

/// Reflects a copy of `graph` through the plane `x = 0` unconditionally.
pub fn reflect(graph: &Graph) -> Graph {
    let mut mirror = graph.deep_copy_with_id(&format!("{}{}", graph.id(), MIRROR_SUFFIX));
    for (_, vertex) in mirror.vertices_iter_mut() {
        vertex.position.x = -vertex.position.x;
        let q = vertex.orientation;
        vertex.orientation = UnitQuaternion::new_normalize(Quaternion::new(q.w, q.i, -q.j, -q.k));
    }
    for polygon in mirror.faces_iter_mut() {
        polygon.reverse();
    }
    mirror.update_geometry();
    mirror
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canonical::{DEFAULT_SIGNATURE_TOLERANCE, SignatureKind, signature};
    use crate::core::geometry::{Regularizer, SphericalRelaxation};
    use crate::core::spiral::build_cage;
    use crate::core::topology::check;
    use nalgebra::{Point3, Vector3};

    fn relaxed_c24() -> Graph {
        let mut graph = build_cage(&"65555555555556".parse().unwrap(), 3).unwrap();
        SphericalRelaxation::default().regularize(&mut graph);
        graph
    }

    #[test]
    fn achiral_groups_have_no_enantiomorph() {
        let graph = relaxed_c24();
        assert!(generate(&graph, &PointGroup::from("D6d")).is_none());
        assert!(generate(&graph, &PointGroup::from("Cs")).is_none());
    }

    #[test]
    fn chiral_group_yields_reflected_copy() {
        let graph = relaxed_c24();
        let mirror = generate(&graph, &PointGroup::from("D6")).unwrap();

        assert_eq!(mirror.id(), "1_mirror");
        assert_eq!(mirror.vertex_count(), graph.vertex_count());
        assert_eq!(mirror.edge_count(), graph.edge_count());
        assert_eq!(mirror.face_count(), graph.face_count());
        for ((_, a), (_, b)) in graph.vertices_iter().zip(mirror.vertices_iter()) {
            assert_eq!(b.position, Point3::new(-a.position.x, a.position.y, a.position.z));
        }
        assert!(check(&mirror).is_valid());
    }

    #[test]
    fn reflecting_twice_restores_the_signature() {
        let graph = relaxed_c24();
        let twice = reflect(&reflect(&graph));
        let a = signature(&graph, SignatureKind::Geometric);
        let b = signature(&twice, SignatureKind::Geometric);
        assert!(a.matches(&b, DEFAULT_SIGNATURE_TOLERANCE));
        assert_eq!(twice.id(), "1_mirror_mirror");
    }

    #[test]
    fn reflection_flips_orientations() {
        let graph = relaxed_c24();
        let mirror = reflect(&graph);
        for ((_, a), (_, b)) in graph.vertices_iter().zip(mirror.vertices_iter()) {
            let up = a.orientation * Vector3::z();
            let mirrored_up = b.orientation * Vector3::z();
            assert!((mirrored_up - Vector3::new(-up.x, up.y, up.z)).norm() < 1e-9);
        }
    }
}
