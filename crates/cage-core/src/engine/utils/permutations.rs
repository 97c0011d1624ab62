/// Lazily yields every distinct permutation of a multiset in lexicographic order.
///
/// The first item is the sorted input; each following item is the next
/// permutation in lexicographic order, so repeated elements never produce
/// repeated permutations. The iterator is finite and is not restartable.
#[derive(Debug, Clone)]
pub struct DistinctPermutations<T> {
    current: Option<Vec<T>>,
}

impl<T: Ord + Clone> DistinctPermutations<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            current: Some(items),
        }
    }
}

impl<T: Ord + Clone> Iterator for DistinctPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.current = Some(successor);
        }
        Some(current)
    }
}

/// Rearranges `items` into the next permutation in lexicographic order.
///
/// Returns `false`, leaving `items` untouched, when it is already the last one.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let swap_with = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, swap_with);
    items[pivot + 1..].reverse();
    true
}

/// Number of distinct arrangements of a multiset with the given multiplicities,
/// saturating at `u64::MAX`.
pub fn multinomial(counts: &[usize]) -> u64 {
    let mut result: u128 = 1;
    let mut placed: u128 = 0;
    for &count in counts {
        for k in 1..=count as u128 {
            placed += 1;
            // C(placed, k) builds up exactly; the division is always whole.
            result = match result.checked_mul(placed) {
                Some(product) => product / k,
                None => return u64::MAX,
            };
        }
    }
    u64::try_from(result).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_distinct_permutations_in_lexicographic_order() {
        let all: Vec<String> = DistinctPermutations::new(vec![6u8, 5, 5])
            .map(|p| p.iter().map(|d| d.to_string()).collect())
            .collect();
        assert_eq!(all, vec!["556", "565", "655"]);
    }

    #[test]
    fn single_and_empty_inputs_yield_once() {
        assert_eq!(DistinctPermutations::new(vec![1]).count(), 1);
        assert_eq!(DistinctPermutations::<u8>::new(Vec::new()).count(), 1);
    }

    #[test]
    fn count_matches_multinomial() {
        let items = vec![5u8, 5, 5, 6, 6, 6, 6];
        assert_eq!(DistinctPermutations::new(items).count() as u64, multinomial(&[3, 4]));
        assert_eq!(multinomial(&[3, 4]), 35);
        assert_eq!(multinomial(&[12, 20]), 225_792_840);
    }

    #[test]
    fn multinomial_saturates() {
        assert_eq!(multinomial(&[500, 500]), u64::MAX);
    }

    #[test]
    fn next_permutation_stops_at_the_last_arrangement() {
        let mut items = [3, 2, 1];
        assert!(!next_permutation(&mut items));
        assert_eq!(items, [3, 2, 1]);
        let mut items = [1, 3, 2];
        assert!(next_permutation(&mut items));
        assert_eq!(items, [2, 1, 3]);
    }
}
