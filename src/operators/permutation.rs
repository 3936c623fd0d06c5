use super::{Crossover, Mutation};
use crate::tour::PinnedTour;
use rand::seq::index::sample;
use rand::Rng;

/// 交换变异：随机交换两个非起点位置
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

/// 翻转变异：随机翻转一段连续的非起点位置
#[derive(Debug, Clone, Copy, Default)]
pub struct InversionMutation;

/// 顺序杂交（OX）：从第一个父代复制一段，其余位置按第二个父代的相对顺序填充
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

/// 在 `[0, length)` 中不放回地抽取两个位置，按升序返回
fn two_positions<R: Rng + ?Sized>(length: usize, rng: &mut R) -> (usize, usize) {
    let picked = sample(rng, length, 2);
    let (i, j) = (picked.index(0), picked.index(1));
    (i.min(j), i.max(j))
}

impl Mutation for SwapMutation {
    fn mutate<R: Rng + ?Sized>(&self, tour: &PinnedTour, rng: &mut R) -> PinnedTour {
        let mut next = tour.clone();
        let rest = next.rest_mut();
        if rest.len() < 2 {
            return next;
        }
        let (i, j) = two_positions(rest.len(), rng);
        rest.swap(i, j);
        next
    }
}

impl Mutation for InversionMutation {
    fn mutate<R: Rng + ?Sized>(&self, tour: &PinnedTour, rng: &mut R) -> PinnedTour {
        let mut next = tour.clone();
        let rest = next.rest_mut();
        if rest.len() < 2 {
            return next;
        }
        let (i, j) = two_positions(rest.len(), rng);
        rest[i..=j].reverse();
        next
    }
}

impl Crossover for OrderCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &PinnedTour,
        second: &PinnedTour,
        rng: &mut R,
    ) -> PinnedTour {
        let (donor, filler) = (first.rest(), second.rest());
        let size = donor.len();
        if size < 2 || filler.len() != size || first.start() != second.start() {
            return first.clone();
        }
        let (begin, end) = two_positions(size, rng);
        let mut child: Vec<Option<usize>> = vec![None; size];
        let mut placed = vec![false; first.len()];
        for position in begin..=end {
            child[position] = Some(donor[position]);
            placed[donor[position]] = true;
        }
        // 从片段之后开始环绕填充
        let mut pointer = (end + 1) % size;
        for &city in filler {
            if placed[city] {
                continue;
            }
            child[pointer] = Some(city);
            placed[city] = true;
            pointer = (pointer + 1) % size;
        }
        match child.into_iter().collect::<Option<Vec<_>>>() {
            Some(rest) => PinnedTour::new(first.start(), rest),
            None => first.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_permutation(tour: &PinnedTour, size: usize) {
        assert_eq!(tour.start(), 0);
        let mut order = tour.open();
        order.sort_unstable();
        assert_eq!(order, (0..size).collect::<Vec<_>>());
    }

    #[test]
    fn mutations_preserve_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for size in 2..10 {
            let mut tour = PinnedTour::random(size, &mut rng);
            for _ in 0..50 {
                tour = SwapMutation.mutate(&tour, &mut rng);
                assert_permutation(&tour, size);
                tour = InversionMutation.mutate(&tour, &mut rng);
                assert_permutation(&tour, size);
            }
        }
    }

    #[test]
    fn swap_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        let tour = PinnedTour::identity(8);
        let next = SwapMutation.mutate(&tour, &mut rng);
        let changed = tour
            .rest()
            .iter()
            .zip(next.rest())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn short_sequences_are_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(0);
        let tour = PinnedTour::identity(2);
        assert_eq!(SwapMutation.mutate(&tour, &mut rng), tour);
        assert_eq!(InversionMutation.mutate(&tour, &mut rng), tour);
        assert_eq!(OrderCrossover.crossover(&tour, &tour, &mut rng), tour);
    }

    #[test]
    fn crossover_keeps_a_segment_of_the_first_parent() {
        let mut rng = StdRng::seed_from_u64(11);
        let size = 12;
        for _ in 0..100 {
            let first = PinnedTour::random(size, &mut rng);
            let second = PinnedTour::random(size, &mut rng);
            let child = OrderCrossover.crossover(&first, &second, &mut rng);
            assert_permutation(&child, size);
            let common = first
                .rest()
                .iter()
                .zip(child.rest())
                .filter(|(a, b)| a == b)
                .count();
            assert!(common >= 2);
        }
    }
}
