//! Lazy enumeration of board completions as strictly increasing index
//! combinations over the remaining deck.
//!
//! `Completions::new(n, k)` walks every k-subset of `0..n` in lexicographic
//! order. `Completions::shard(n, k, first)` walks only the subsets whose
//! smallest index is `first`; the shards for `first in 0..n` partition the
//! full sequence, which is what the parallel exact strategy splits on.

/// Number of k-subsets of an n-set.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i as u64 + 1))
}

#[derive(Debug, Clone)]
pub struct Completions {
    n: usize,
    start: usize,
    indices: Vec<usize>,
    /// Exclusive upper bound for `indices[0]`.
    first_end: usize,
    exhausted_at_start: bool,
    done: bool,
}

impl Completions {
    pub fn new(n: usize, k: usize) -> Self {
        Self::build(n, k, 0, n, k > n)
    }

    fn build(n: usize, k: usize, start: usize, first_end: usize, empty: bool) -> Self {
        Completions {
            n,
            start,
            indices: (start..start + k).collect(),
            first_end,
            exhausted_at_start: empty,
            done: empty,
        }
    }

    /// Only the combinations whose first index is `first`. With `k == 0`
    /// the single empty completion belongs to shard 0.
    pub fn shard(n: usize, k: usize, first: usize) -> Self {
        if k == 0 {
            return Self::build(n, 0, 0, 1, first != 0);
        }
        Self::build(n, k, first, first + 1, first + k > n)
    }

    /// Restart from the first combination of this sequence.
    pub fn reset(&mut self) {
        let k = self.indices.len();
        self.indices = (self.start..self.start + k).collect();
        self.done = self.exhausted_at_start;
    }

    fn advance(&mut self) {
        let k = self.indices.len();
        // Rightmost position that can still move up.
        let pos = (0..k).rev().find(|&i| {
            let limit = if i == 0 {
                self.first_end.min(self.n - k + 1)
            } else {
                self.n - k + i + 1
            };
            self.indices[i] + 1 < limit
        });
        match pos {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
    }
}

impl Iterator for Completions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(48, 5), 1_712_304);
        assert_eq!(binomial(45, 2), 990);
        assert_eq!(binomial(44, 1), 44);
        assert_eq!(binomial(43, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(52, 5), 2_598_960);
    }

    #[test]
    fn small_enumeration_in_order() {
        let all: Vec<Vec<usize>> = Completions::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn counts_match_binomial() {
        for n in 0..10 {
            for k in 0..=5 {
                assert_eq!(
                    Completions::new(n, k).count() as u64,
                    binomial(n, k),
                    "n={} k={}",
                    n,
                    k
                );
            }
        }
    }

    #[test]
    fn zero_cards_yields_one_empty_completion() {
        let all: Vec<Vec<usize>> = Completions::new(44, 0).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn shards_partition_the_sequence() {
        let (n, k) = (12, 3);
        let full: Vec<Vec<usize>> = Completions::new(n, k).collect();
        let sharded: Vec<Vec<usize>> = (0..n).flat_map(|f| Completions::shard(n, k, f)).collect();
        assert_eq!(full, sharded);

        let empty: Vec<Vec<usize>> = (0..n).flat_map(|f| Completions::shard(n, 0, f)).collect();
        assert_eq!(empty, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn strictly_increasing() {
        for combo in Completions::new(9, 4) {
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn restartable() {
        let mut it = Completions::new(6, 2);
        let first: Vec<Vec<usize>> = it.by_ref().collect();
        it.reset();
        let second: Vec<Vec<usize>> = it.collect();
        assert_eq!(first, second);

        let mut shard = Completions::shard(6, 2, 3);
        let a: Vec<Vec<usize>> = shard.by_ref().collect();
        shard.reset();
        let b: Vec<Vec<usize>> = shard.collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![vec![3, 4], vec![3, 5]]);
    }
}
