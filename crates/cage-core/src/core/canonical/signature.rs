use crate::core::models::graph::Graph;
use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Per-eigenvalue tolerance used when comparing signatures.
pub const DEFAULT_SIGNATURE_TOLERANCE: f64 = 1e-6;

/// Which pairwise distance the signature matrix is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureKind {
    /// Euclidean distances between regularized vertex positions.
    ///
    /// Only reproducible when relaxation reaches the same embedding from
    /// every winding of an isomer.
    Geometric,
    /// Shortest-path link counts; independent of vertex positions.
    #[default]
    Topological,
}

/// Sorted eigen-spectrum of a cage's pairwise-distance matrix.
///
/// The spectrum does not depend on vertex labels, rigid motions or
/// reflections, so isomorphic cages (and mirror images) share a signature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Signature(Vec<f64>);

impl Signature {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when both spectra have the same length and every pair
    /// of eigenvalues differs by less than `tolerance`.
    pub fn matches(&self, other: &Signature, tolerance: f64) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

impl From<Vec<f64>> for Signature {
    fn from(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self(values)
    }
}

/// Computes the signature of `graph` from the distances selected by `kind`.
///
/// Vertices enter the matrix in creation order; the result has one value per
/// vertex.
pub fn signature(graph: &Graph, kind: SignatureKind) -> Signature {
    let n = graph.vertex_count();
    if n == 0 {
        return Signature::default();
    }
    let matrix = match kind {
        SignatureKind::Geometric => geometric_distances(graph),
        SignatureKind::Topological => path_distances(graph),
    };
    let eigen = SymmetricEigen::new(matrix);
    Signature::from(eigen.eigenvalues.iter().copied().collect::<Vec<_>>())
}

fn geometric_distances(graph: &Graph) -> DMatrix<f64> {
    let positions: Vec<_> = graph.vertices_iter().map(|(_, v)| v.position).collect();
    let n = positions.len();
    DMatrix::from_fn(n, n, |i, j| (positions[i] - positions[j]).norm())
}

// Unreachable pairs are placed one step beyond the longest possible path.
fn path_distances(graph: &Graph) -> DMatrix<f64> {
    let ids = graph.vertex_ids();
    let n = ids.len();
    let index: HashMap<_, _> = ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut matrix = DMatrix::from_element(n, n, n as f64);

    for (source, &start) in ids.iter().enumerate() {
        let mut depth = vec![usize::MAX; n];
        depth[source] = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            let d = depth[index[&v]];
            for w in graph.neighbors(v) {
                let Some(&k) = index.get(&w) else { continue };
                if depth[k] == usize::MAX {
                    depth[k] = d + 1;
                    queue.push_back(w);
                }
            }
        }
        for (target, &d) in depth.iter().enumerate() {
            if d != usize::MAX {
                matrix[(source, target)] = d as f64;
            }
        }
    }
    matrix
}
