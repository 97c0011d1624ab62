use crate::core::sequence::FaceSequence;

/// Pentagon placements within one position of a baseline.
///
/// Each pentagon of the baseline independently stays put or moves one
/// position left or right; placements that run off either end or let two
/// pentagons collide or swap are skipped. The first pentagon varies slowest,
/// so placements come out in depth-first order, starting with the leftmost
/// shift of every pentagon. This is a heuristic neighbourhood search: it
/// does not cover every placement reachable by repeated moves, and an empty
/// result says nothing about cages further from the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiggleSearch {
    pub baseline: FaceSequence,
}

impl JiggleSearch {
    /// Upper bound on the number of placements, `3^pentagons`.
    pub fn estimate(&self) -> u64 {
        let pentagons = self.baseline.pentagon_positions().len();
        u32::try_from(pentagons)
            .ok()
            .and_then(|p| 3u64.checked_pow(p))
            .unwrap_or(u64::MAX)
    }

    pub fn candidates(&self) -> impl Iterator<Item = FaceSequence> + Send + 'static {
        Offsets::new(self.baseline.len(), self.baseline.pentagon_positions())
    }
}

// Odometer over {-1, 0, +1}^p with the last digit turning fastest.
struct Offsets {
    length: usize,
    base: Vec<usize>,
    digits: Vec<i8>,
    exhausted: bool,
}

impl Offsets {
    fn new(length: usize, base: Vec<usize>) -> Self {
        Self {
            length,
            digits: vec![-1; base.len()],
            base,
            exhausted: false,
        }
    }

    fn placement(&self) -> Option<Vec<usize>> {
        let mut positions = Vec::with_capacity(self.base.len());
        for (&p, &d) in self.base.iter().zip(&self.digits) {
            let moved = p.checked_add_signed(d as isize)?;
            if moved >= self.length || positions.last().is_some_and(|&prev| prev >= moved) {
                return None;
            }
            positions.push(moved);
        }
        Some(positions)
    }

    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            if *digit < 1 {
                *digit += 1;
                return;
            }
            *digit = -1;
        }
        self.exhausted = true;
    }
}

impl Iterator for Offsets {
    type Item = FaceSequence;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let placement = self.placement();
            self.advance();
            if let Some(positions) = placement {
                return Some(FaceSequence::from_pentagon_positions(self.length, &positions));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jiggle(baseline: &str) -> Vec<String> {
        JiggleSearch {
            baseline: baseline.parse().unwrap(),
        }
        .candidates()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn single_pentagon_moves_left_stays_and_moves_right() {
        assert_eq!(jiggle("656"), vec!["566", "656", "665"]);
    }

    #[test]
    fn placements_off_the_ends_are_skipped() {
        assert_eq!(jiggle("566"), vec!["566", "656"]);
    }

    #[test]
    fn colliding_pentagons_are_skipped() {
        let all = jiggle("6556");
        assert_eq!(all, vec!["5566", "5656", "5665", "6556", "6565", "6655"]);
        assert!(all.iter().all(|s| s.matches('5').count() == 2));
    }

    #[test]
    fn includes_the_baseline_and_respects_the_estimate() {
        let baseline = "6565656";
        let search = JiggleSearch {
            baseline: baseline.parse().unwrap(),
        };
        let all: Vec<String> = search.candidates().map(|s| s.to_string()).collect();
        assert!(all.iter().any(|s| s == baseline));
        assert!(all.len() as u64 <= search.estimate());
        assert_eq!(search.estimate(), 27);
    }
}
