use crate::core::models::graph::Graph;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::debug;

// Closest approach used when two vertices coincide.
const MIN_DISTANCE_SQ: f64 = 1e-12;

/// Result of one regularization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub iterations: usize,
    /// Largest single-vertex displacement in the final iteration.
    pub displacement: f64,
    pub converged: bool,
}

/// Moves vertex positions in place toward an even embedding of the graph.
///
/// Implementations may be invoked repeatedly on the same graph and are not
/// required to converge; callers inspect the returned [`Convergence`].
pub trait Regularizer: Send + Sync {
    fn regularize(&self, graph: &mut Graph) -> Convergence;
}

/// Spring and repulsion relaxation of the vertices on the unit sphere.
///
/// Every vertex repels every other with an inverse-square force, and each
/// link pulls its endpoints together with a linear spring. Only the
/// tangential part of the net force moves a vertex, which is then projected
/// back onto the sphere. Graphs whose vertices all sit at the origin are
/// first spread over a Fibonacci spiral in creation order, so the result is
/// deterministic for a given graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRelaxation {
    pub max_iterations: usize,
    /// Stop once no vertex moves farther than this in one iteration.
    pub tolerance: f64,
    /// Step length, divided by the vertex count on every move.
    pub step_size: f64,
    pub spring_weight: f64,
}

impl Default for SphericalRelaxation {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            tolerance: 1e-10,
            step_size: 0.5,
            spring_weight: 1.0,
        }
    }
}

impl SphericalRelaxation {
    fn initial_positions(graph: &Graph) -> Vec<Vector3<f64>> {
        let n = graph.vertex_count();
        let current: Vec<Vector3<f64>> = graph
            .vertices_iter()
            .map(|(_, v)| v.position.coords)
            .collect();
        let unplaced = current.iter().all(|p| p.norm_squared() < MIN_DISTANCE_SQ);
        current
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                if unplaced {
                    fibonacci_point(i, n)
                } else {
                    p.try_normalize(f64::EPSILON)
                        .unwrap_or_else(|| fibonacci_point(i, n))
                }
            })
            .collect()
    }
}

impl Regularizer for SphericalRelaxation {
    fn regularize(&self, graph: &mut Graph) -> Convergence {
        let n = graph.vertex_count();
        if n == 0 {
            return Convergence {
                iterations: 0,
                displacement: 0.0,
                converged: true,
            };
        }

        let index: HashMap<_, _> = graph
            .vertex_ids()
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();
        let springs: Vec<(usize, usize)> = graph
            .edges_iter()
            .filter_map(|(_, link)| Some((*index.get(&link.vertex1)?, *index.get(&link.vertex2)?)))
            .collect();

        let mut positions = Self::initial_positions(graph);
        let step = self.step_size / n as f64;
        let mut forces = vec![Vector3::zeros(); n];
        let mut convergence = Convergence {
            iterations: 0,
            displacement: f64::INFINITY,
            converged: false,
        };

        while convergence.iterations < self.max_iterations {
            forces.iter_mut().for_each(|f| *f = Vector3::zeros());
            for i in 0..n {
                for j in (i + 1)..n {
                    let d = positions[i] - positions[j];
                    let dist_sq = d.norm_squared().max(MIN_DISTANCE_SQ);
                    let push = d / (dist_sq * dist_sq.sqrt());
                    forces[i] += push;
                    forces[j] -= push;
                }
            }
            for &(i, j) in &springs {
                let pull = (positions[j] - positions[i]) * self.spring_weight;
                forces[i] += pull;
                forces[j] -= pull;
            }

            let mut max_move: f64 = 0.0;
            for (p, f) in positions.iter_mut().zip(&forces) {
                let tangential = f - *p * f.dot(p);
                let moved = (*p + tangential * step)
                    .try_normalize(f64::EPSILON)
                    .unwrap_or(*p);
                max_move = max_move.max((moved - *p).norm());
                *p = moved;
            }

            convergence.iterations += 1;
            convergence.displacement = max_move;
            if max_move < self.tolerance {
                convergence.converged = true;
                break;
            }
        }

        let ids = graph.vertex_ids().to_vec();
        for (id, p) in ids.into_iter().zip(positions) {
            if let Some(vertex) = graph.vertex_mut(id) {
                vertex.position = Point3::from(p);
                vertex.orientation = UnitQuaternion::rotation_between(&Vector3::z(), &p)
                    .unwrap_or_else(|| {
                        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI)
                    });
            }
        }
        graph.update_geometry();

        debug!(
            iterations = convergence.iterations,
            displacement = convergence.displacement,
            converged = convergence.converged,
            "Spherical relaxation finished"
        );
        convergence
    }
}

fn fibonacci_point(i: usize, n: usize) -> Vector3<f64> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f64;
    Vector3::new(r * theta.cos(), y, r * theta.sin())
}
