use crate::core::models::graph::{DEFAULT_VALENCE, Graph, ModelError};
use crate::core::models::ids::VertexId;
use nalgebra::{Point3, Vector2};
use std::collections::HashMap;
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

/// Largest accepted chiral index; keeps the lattice arithmetic within `i64`.
pub const MAX_CHIRAL_INDEX: u32 = 1000;
pub const MAX_CELLS: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("Chiral vector ({n}, {m}) is too short; n + m must be at least 2")]
    ChiralVectorTooShort { n: u32, m: u32 },

    #[error("Chiral vector ({n}, {m}) is too long; n and m must not exceed {max}")]
    ChiralVectorTooLong { n: u32, m: u32, max: u32 },

    #[error("Tube length must be at least one unit cell")]
    ZeroLength,

    #[error("Tube length of {cells} unit cells exceeds the limit of {max}")]
    TooManyCells { cells: usize, max: usize },

    #[error("Graph model error: {0}")]
    Model(#[from] ModelError),
}

/// An open tube rolled from the hexagonal lattice.
#[derive(Debug, Clone)]
pub struct Tube {
    pub graph: Graph,
    pub n: u32,
    pub m: u32,
    /// Number of translational unit cells along the axis.
    pub cells: usize,
    pub hexagons_per_cell: usize,
    pub radius: f64,
    /// Axial length of one translational unit cell.
    pub cell_length: f64,
    /// Angle between the chiral vector and the zigzag direction, in degrees.
    pub chiral_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Site {
    A,
    B,
}

// Lattice with unit link length: hexagon centres at i*a1 + j*a2.
fn a1() -> Vector2<f64> {
    Vector2::new(3f64.sqrt(), 0.0)
}

fn a2() -> Vector2<f64> {
    Vector2::new(3f64.sqrt() / 2.0, 1.5)
}

fn planar(i: i64, j: i64) -> Vector2<f64> {
    a1() * i as f64 + a2() * j as f64
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Builds `cells` translational unit cells of the `(n, m)` tube.
///
/// Hexagons are taken from the strip of the lattice whose centres lie within
/// one circumference along the chiral vector `C = n*a1 + m*a2` and within
/// `cells` translation vectors along the axis. Lattice points that differ by
/// a multiple of `C` are identified, which closes the strip into a cylinder;
/// both ends stay open, so the Euler characteristic of the result is 0.
pub fn tube(n: u32, m: u32, cells: usize) -> Result<Tube, LatticeError> {
    if n.saturating_add(m) < 2 {
        return Err(LatticeError::ChiralVectorTooShort { n, m });
    }
    if n > MAX_CHIRAL_INDEX || m > MAX_CHIRAL_INDEX {
        return Err(LatticeError::ChiralVectorTooLong {
            n,
            m,
            max: MAX_CHIRAL_INDEX,
        });
    }
    if cells == 0 {
        return Err(LatticeError::ZeroLength);
    }
    if cells > MAX_CELLS {
        return Err(LatticeError::TooManyCells {
            cells,
            max: MAX_CELLS,
        });
    }
    let (ni, mi) = (n as i64, m as i64);
    let d_r = gcd(2 * mi + ni, 2 * ni + mi);
    let (t1, t2) = ((2 * mi + ni) / d_r, -(2 * ni + mi) / d_r);
    let c_norm = 2 * (ni * ni + ni * mi + mi * mi);
    let t_norm = 2 * (t1 * t1 + t1 * t2 + t2 * t2);
    let hexagons_per_cell = (c_norm / d_r) as usize;
    let length = cells as i64;

    // Twice the lattice dot products, divided by 3.
    let along_c = |i: i64, j: i64| i * (2 * ni + mi) + j * (2 * mi + ni);
    let along_t = |i: i64, j: i64| i * (2 * t1 + t2) + j * (2 * t2 + t1);
    let reduce = |i: i64, j: i64| {
        let k = along_c(i, j).div_euclid(c_norm);
        (i - k * ni, j - k * mi)
    };

    let corners = [(0, 0), (ni, mi), (length * t1, length * t2), (ni + length * t1, mi + length * t2)];
    let (i_min, i_max) = minmax(corners.iter().map(|c| c.0));
    let (j_min, j_max) = minmax(corners.iter().map(|c| c.1));

    let circumference = planar(ni, mi);
    let axis = planar(t1, t2);
    let radius = circumference.norm() / (2.0 * PI);
    let roll = |p: Vector2<f64>| {
        let s = p.dot(&circumference) / circumference.norm_squared();
        let z = p.dot(&axis) / axis.norm();
        let theta = 2.0 * PI * s;
        Point3::new(radius * theta.cos(), radius * theta.sin(), z)
    };

    let mut graph = Graph::with_id(&format!("tube_{n}_{m}"), DEFAULT_VALENCE);
    let mut sites: HashMap<(Site, i64, i64), VertexId> = HashMap::new();
    let delta = (a1() + a2()) / 3.0;

    for i in i_min..=i_max {
        for j in j_min..=j_max {
            let s = along_c(i, j);
            let u = along_t(i, j);
            if s < 0 || s >= c_norm || u < 0 || u >= length * t_norm {
                continue;
            }
            let ring = [
                (Site::A, i, j),
                (Site::B, i - 1, j),
                (Site::A, i - 1, j),
                (Site::B, i - 1, j - 1),
                (Site::A, i, j - 1),
                (Site::B, i, j - 1),
            ];
            let mut face = Vec::with_capacity(ring.len());
            for (site, pi, pj) in ring {
                let (ri, rj) = reduce(pi, pj);
                let key = (site, ri, rj);
                let vertex = match sites.get(&key) {
                    Some(&v) => v,
                    None => {
                        let number = graph.next_vertex_number();
                        let v = graph.add_vertex(number);
                        let offset = match site {
                            Site::A => delta,
                            Site::B => delta * 2.0,
                        };
                        if let Some(vertex) = graph.vertex_mut(v) {
                            vertex.position = roll(planar(ri, rj) + offset);
                        }
                        sites.insert(key, v);
                        v
                    }
                };
                face.push(vertex);
            }
            for k in 0..face.len() {
                graph.add_edge(face[k], face[(k + 1) % face.len()])?;
            }
            graph.insert_face(face)?;
        }
    }
    graph.update_geometry();

    let tube = Tube {
        graph,
        n,
        m,
        cells,
        hexagons_per_cell,
        radius,
        cell_length: axis.norm(),
        chiral_angle: (3f64.sqrt() * m as f64).atan2(2.0 * n as f64 + m as f64).to_degrees(),
    };
    debug!(
        n,
        m,
        cells,
        hexagons = tube.graph.face_count(),
        radius = tube.radius,
        "Rolled lattice tube"
    );
    Ok(tube)
}

fn minmax(values: impl Iterator<Item = i64>) -> (i64, i64) {
    values.fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn euler(graph: &Graph) -> i64 {
        graph.vertex_count() as i64 - graph.edge_count() as i64 + graph.face_count() as i64
    }

    #[test]
    fn armchair_tube_is_an_open_cylinder() {
        let tube = tube(5, 5, 2).unwrap();
        assert_eq!(tube.hexagons_per_cell, 10);
        assert_eq!(tube.graph.face_count(), 20);
        assert_eq!(euler(&tube.graph), 0);
        assert!((tube.chiral_angle - 30.0).abs() < TOLERANCE);
    }

    #[test]
    fn zigzag_tube_is_an_open_cylinder() {
        let tube = tube(6, 0, 2).unwrap();
        assert_eq!(tube.hexagons_per_cell, 12);
        assert_eq!(tube.graph.face_count(), 24);
        assert_eq!(euler(&tube.graph), 0);
        assert!(tube.chiral_angle.abs() < TOLERANCE);
    }

    #[test]
    fn chiral_tube_has_expected_cell() {
        let tube = tube(4, 2, 1).unwrap();
        assert_eq!(tube.hexagons_per_cell, 28);
        assert_eq!(tube.graph.face_count(), 28);
        assert_eq!(euler(&tube.graph), 0);
    }

    #[test]
    fn vertices_lie_on_the_cylinder_with_unit_links() {
        let tube = tube(6, 0, 2).unwrap();
        for (_, vertex) in tube.graph.vertices_iter() {
            let p = vertex.position;
            assert!(((p.x * p.x + p.y * p.y).sqrt() - tube.radius).abs() < TOLERANCE);
            assert!(tube.graph.degree(tube.graph.find_vertex(vertex.number).unwrap()) >= 2);
        }
        for (_, link) in tube.graph.edges_iter() {
            assert!(link.length <= 1.0 + TOLERANCE);
            assert!(link.length > 0.5);
        }
        for (_, face) in tube.graph.faces_iter() {
            assert!(face.closed);
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        assert_eq!(
            tube(1, 0, 1).unwrap_err(),
            LatticeError::ChiralVectorTooShort { n: 1, m: 0 }
        );
        assert_eq!(tube(5, 5, 0).unwrap_err(), LatticeError::ZeroLength);
    }

    #[test]
    fn oversized_parameters_are_rejected_without_overflow() {
        assert_eq!(
            tube(u32::MAX, 1, 1).unwrap_err(),
            LatticeError::ChiralVectorTooLong {
                n: u32::MAX,
                m: 1,
                max: MAX_CHIRAL_INDEX
            }
        );
        assert_eq!(
            tube(u32::MAX, u32::MAX, 1).unwrap_err(),
            LatticeError::ChiralVectorTooLong {
                n: u32::MAX,
                m: u32::MAX,
                max: MAX_CHIRAL_INDEX
            }
        );
        assert_eq!(
            tube(5, 5, usize::MAX).unwrap_err(),
            LatticeError::TooManyCells {
                cells: usize::MAX,
                max: MAX_CELLS
            }
        );
    }
}
