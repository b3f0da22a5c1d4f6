//! Unbiased participant shuffle

use rand::seq::SliceRandom;
use rand::Rng;

/// Return `items` in a uniformly random order.
///
/// Uses `SliceRandom::shuffle` (Fisher-Yates), so every permutation is
/// equally likely for an unbiased `rng`.
pub fn shuffle<T, R>(mut items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(12345);
        let items: Vec<u64> = (0..50).collect();

        let mut shuffled = shuffle(items.clone(), &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_same_seed_same_order() {
        let items: Vec<u64> = (0..20).collect();
        let a = shuffle(items.clone(), &mut StdRng::seed_from_u64(7));
        let b = shuffle(items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_permutation_is_roughly_equally_likely() {
        let mut rng = StdRng::seed_from_u64(12345);
        let trials = 60_000;
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..trials {
            *counts.entry(shuffle(vec![1, 2, 3], &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "all permutations of three should appear");
        let expected = trials / 6;
        for (perm, count) in &counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 20,
                "permutation {perm:?} seen {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_first_position_is_not_biased() {
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 40_000;
        let mut firsts = [0usize; 8];

        for _ in 0..trials {
            let order = shuffle((0..8).collect::<Vec<usize>>(), &mut rng);
            firsts[order[0]] += 1;
        }

        let expected = trials / 8;
        for (item, count) in firsts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "item {item} led {count} times, expected about {expected}"
            );
        }
    }
}
