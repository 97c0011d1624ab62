use super::point_group::PointGroup;
use crate::core::models::graph::Graph;
use crate::core::models::ids::VertexId;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymmetryError {
    #[error("Graph has no links to analyse")]
    Empty,

    #[error("{0} directed sides belong to no face; the cage is not closed")]
    OpenSurface(usize),

    #[error("A directed side is traversed by more than one face")]
    NonManifold,

    #[error("A face side is not a link of the graph")]
    UnclosedFace,

    #[error("Automorphism group of order {order} (largest element order {max_order}) matches no point group")]
    UnknownGroup { order: usize, max_order: usize },
}

/// Assigns a point group to a finished cage.
pub trait SymmetryDetector: Send + Sync {
    fn find_symmetry(&self, graph: &Graph) -> Result<PointGroup, SymmetryError>;
}

/// Counts of the symmetry operations found on a cage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryAnalysis {
    pub point_group: PointGroup,
    /// Number of orientation-preserving automorphisms.
    pub rotations: usize,
    /// Number of orientation-reversing automorphisms.
    pub improper: usize,
    /// Orientation-reversing involutions that fix a link (mirror planes).
    pub reflections: usize,
    /// Largest order of a rotation.
    pub max_order: usize,
}

/// Point-group detection from the automorphisms of the oriented face map.
///
/// Every link contributes two darts; the faces define a successor permutation
/// on darts. An automorphism is a dart permutation commuting with reversal
/// and with the successor map (a rotation) or with its mirror (an improper
/// operation). For polyhedral cages these are exactly the symmetries of an
/// ideal embedding, so no coordinates are consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapAutomorphismDetector;

impl MapAutomorphismDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, graph: &Graph) -> Result<SymmetryAnalysis, SymmetryError> {
        let map = DartMap::from_graph(graph)?;
        let mirror = map.mirrored_successor();

        let rotations = map.automorphisms(&map.successor);
        let improper = map.automorphisms(&mirror);

        let max_order = rotations.iter().map(|f| order(f)).max().unwrap_or(1);
        let reflections = improper
            .iter()
            .filter(|f| is_involution(f) && fixes_some_link(f))
            .count();

        let point_group = classify(rotations.len(), max_order, !improper.is_empty(), reflections)?;
        debug!(
            group = %point_group,
            rotations = rotations.len(),
            improper = improper.len(),
            reflections,
            "Classified cage symmetry"
        );
        Ok(SymmetryAnalysis {
            point_group,
            rotations: rotations.len(),
            improper: improper.len(),
            reflections,
            max_order,
        })
    }
}

impl SymmetryDetector for MapAutomorphismDetector {
    fn find_symmetry(&self, graph: &Graph) -> Result<PointGroup, SymmetryError> {
        self.analyze(graph).map(|a| a.point_group)
    }
}

// Dart 2i runs vertex1 -> vertex2 of link i, dart 2i+1 runs back.
struct DartMap {
    successor: Vec<usize>,
}

impl DartMap {
    fn from_graph(graph: &Graph) -> Result<Self, SymmetryError> {
        let mut darts: HashMap<(VertexId, VertexId), usize> = HashMap::new();
        for (i, (_, link)) in graph.edges_iter().enumerate() {
            darts.insert((link.vertex1, link.vertex2), 2 * i);
            darts.insert((link.vertex2, link.vertex1), 2 * i + 1);
        }
        if darts.is_empty() {
            return Err(SymmetryError::Empty);
        }

        let mut successor = vec![usize::MAX; darts.len()];
        for (_, polygon) in graph.faces_iter() {
            let sides: Vec<usize> = polygon
                .sides()
                .map(|side| darts.get(&side).copied())
                .collect::<Option<_>>()
                .ok_or(SymmetryError::UnclosedFace)?;
            for (k, &d) in sides.iter().enumerate() {
                if successor[d] != usize::MAX {
                    return Err(SymmetryError::NonManifold);
                }
                successor[d] = sides[(k + 1) % sides.len()];
            }
        }
        let unassigned = successor.iter().filter(|&&s| s == usize::MAX).count();
        if unassigned > 0 {
            return Err(SymmetryError::OpenSurface(unassigned));
        }
        Ok(Self { successor })
    }

    fn len(&self) -> usize {
        self.successor.len()
    }

    // Successor map of the same faces traversed the other way round.
    fn mirrored_successor(&self) -> Vec<usize> {
        let mut predecessor = vec![0; self.len()];
        for (d, &s) in self.successor.iter().enumerate() {
            predecessor[s] = d;
        }
        (0..self.len()).map(|d| predecessor[d ^ 1] ^ 1).collect()
    }

    fn automorphisms(&self, target: &[usize]) -> Vec<Vec<usize>> {
        (0..self.len())
            .filter_map(|image| self.extend(image, target))
            .collect()
    }

    // Grows the unique map sending dart 0 to `image`, if one exists.
    fn extend(&self, image: usize, target: &[usize]) -> Option<Vec<usize>> {
        let n = self.len();
        let mut forward = vec![usize::MAX; n];
        let mut used = vec![false; n];
        forward[0] = image;
        used[image] = true;
        let mut queue = VecDeque::from([0]);

        while let Some(d) = queue.pop_front() {
            let fd = forward[d];
            for (next, next_image) in [(self.successor[d], target[fd]), (d ^ 1, fd ^ 1)] {
                if forward[next] == usize::MAX {
                    if used[next_image] {
                        return None;
                    }
                    forward[next] = next_image;
                    used[next_image] = true;
                    queue.push_back(next);
                } else if forward[next] != next_image {
                    return None;
                }
            }
        }
        forward.iter().all(|&f| f != usize::MAX).then_some(forward)
    }
}

fn order(permutation: &[usize]) -> usize {
    let mut seen = vec![false; permutation.len()];
    let mut result = 1;
    for start in 0..permutation.len() {
        if seen[start] {
            continue;
        }
        let mut length = 0;
        let mut d = start;
        while !seen[d] {
            seen[d] = true;
            d = permutation[d];
            length += 1;
        }
        result = lcm(result, length);
    }
    result
}

fn is_involution(permutation: &[usize]) -> bool {
    permutation
        .iter()
        .enumerate()
        .all(|(d, &f)| permutation[f] == d)
}

fn fixes_some_link(permutation: &[usize]) -> bool {
    (0..permutation.len())
        .step_by(2)
        .any(|d| permutation[d] >> 1 == d >> 1)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

fn classify(
    rotations: usize,
    max_order: usize,
    has_improper: bool,
    reflections: usize,
) -> Result<PointGroup, SymmetryError> {
    let unknown = SymmetryError::UnknownGroup {
        order: rotations,
        max_order,
    };
    let symbol = match (rotations, max_order) {
        (1, _) if !has_improper => "C1".to_string(),
        (1, _) if reflections > 0 => "Cs".to_string(),
        (1, _) => "Ci".to_string(),
        (n, m) if n == m => {
            if !has_improper {
                format!("C{n}")
            } else if reflections == n {
                format!("C{n}v")
            } else if reflections == 1 {
                format!("C{n}h")
            } else if reflections == 0 {
                format!("S{}", 2 * n)
            } else {
                return Err(unknown);
            }
        }
        (r, m) if r == 2 * m => {
            if !has_improper {
                format!("D{m}")
            } else if reflections == m + 1 {
                format!("D{m}h")
            } else if reflections == m {
                format!("D{m}d")
            } else {
                return Err(unknown);
            }
        }
        (12, 3) => match (has_improper, reflections) {
            (false, _) => "T".to_string(),
            (true, 6) => "Td".to_string(),
            (true, 3) => "Th".to_string(),
            _ => return Err(unknown),
        },
        (24, 4) => (if has_improper { "Oh" } else { "O" }).to_string(),
        (60, 5) => (if has_improper { "Ih" } else { "I" }).to_string(),
        _ => return Err(unknown),
    };
    Ok(PointGroup::new(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spiral::{add_face, build_cage};

    fn group_of(sequence: &str) -> SymmetryAnalysis {
        let graph = build_cage(&sequence.parse().unwrap(), 3).unwrap();
        MapAutomorphismDetector::new().analyze(&graph).unwrap()
    }

    #[test]
    fn tetrahedron_is_td() {
        let analysis = group_of("3333");
        assert_eq!(analysis.point_group.symbol(), "Td");
        assert_eq!(analysis.rotations, 12);
        assert_eq!(analysis.reflections, 6);
    }

    #[test]
    fn cube_is_oh() {
        let analysis = group_of("444444");
        assert_eq!(analysis.point_group.symbol(), "Oh");
        assert_eq!(analysis.rotations, 24);
        assert_eq!(analysis.improper, 24);
        assert_eq!(analysis.reflections, 9);
    }

    #[test]
    fn triangular_prism_is_d3h() {
        let analysis = group_of("34443");
        assert_eq!(analysis.point_group.symbol(), "D3h");
        assert_eq!(analysis.reflections, 4);
    }

    #[test]
    fn dodecahedron_is_ih() {
        let analysis = group_of("555555555555");
        assert_eq!(analysis.point_group.symbol(), "Ih");
        assert_eq!(analysis.rotations, 60);
        assert_eq!(analysis.max_order, 5);
        assert_eq!(analysis.reflections, 15);
    }

    #[test]
    fn c24_is_d6d() {
        let analysis = group_of("65555555555556");
        assert_eq!(analysis.point_group.symbol(), "D6d");
        assert!(!analysis.point_group.is_chiral());
    }

    #[test]
    fn open_cage_is_rejected() {
        let mut graph = Graph::new(3);
        add_face(&mut graph, 5).unwrap();
        add_face(&mut graph, 5).unwrap();
        assert!(matches!(
            MapAutomorphismDetector::new().find_symmetry(&graph),
            Err(SymmetryError::OpenSurface(_))
        ));
        assert_eq!(
            MapAutomorphismDetector::new().find_symmetry(&Graph::new(3)),
            Err(SymmetryError::Empty)
        );
    }

    #[test]
    fn permutation_order_is_lcm_of_cycle_lengths() {
        assert_eq!(order(&[1, 0, 3, 4, 2]), 6);
        assert_eq!(order(&[0, 1, 2]), 1);
    }
}
