use crate::core::sequence::{FaceSequence, HEXAGON, PENTAGON};
use crate::engine::utils::permutations::{DistinctPermutations, multinomial};

/// All distinct orderings of `pentagons` fives and `hexagons` sixes in
/// lexicographic order, optionally skipping orderings with a run of adjacent
/// pentagons longer than `max_adjacent_pentagons`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustiveSearch {
    pub pentagons: usize,
    pub hexagons: usize,
    pub max_adjacent_pentagons: Option<usize>,
}

impl ExhaustiveSearch {
    /// Number of orderings before pruning.
    pub fn estimate(&self) -> u64 {
        multinomial(&[self.pentagons, self.hexagons])
    }

    pub fn candidates(&self) -> impl Iterator<Item = FaceSequence> + Send + 'static {
        let mut faces = vec![PENTAGON; self.pentagons];
        faces.extend(std::iter::repeat_n(HEXAGON, self.hexagons));
        let limit = self.max_adjacent_pentagons;
        DistinctPermutations::new(faces)
            .map(FaceSequence::new)
            .filter(move |s| limit.is_none_or(|max| s.longest_pentagon_run() <= max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(search: &ExhaustiveSearch) -> Vec<String> {
        search.candidates().map(|s| s.to_string()).collect()
    }

    #[test]
    fn enumerates_every_arrangement_once() {
        let search = ExhaustiveSearch {
            pentagons: 2,
            hexagons: 2,
            max_adjacent_pentagons: None,
        };
        assert_eq!(
            strings(&search),
            vec!["5566", "5656", "5665", "6556", "6565", "6655"]
        );
        assert_eq!(search.estimate(), 6);
    }

    #[test]
    fn prunes_long_pentagon_runs() {
        let search = ExhaustiveSearch {
            pentagons: 2,
            hexagons: 2,
            max_adjacent_pentagons: Some(1),
        };
        assert_eq!(strings(&search), vec!["5656", "5665", "6565"]);
    }

    #[test]
    fn dodecahedron_is_the_only_all_pentagon_candidate() {
        let search = ExhaustiveSearch {
            pentagons: 12,
            hexagons: 0,
            max_adjacent_pentagons: None,
        };
        assert_eq!(strings(&search), vec!["555555555555"]);
    }
}
