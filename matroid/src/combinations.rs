//! Lazy enumeration of the fixed-size subsets of `{0, ..., n-1}`.
//!
//! A combination is represented as a strictly increasing sequence of positions.
//! Combinations are produced in lexicographic order of these sequences, starting from `[0, 1, ..., k-1]`,
//! with constant additional memory: the power set is never built.
//!
//! ```
//! use matroid::combinations::Combinations;
//! use streaming_iterator::StreamingIterator;
//!
//! let mut combs = Combinations::new(4, 2);
//! let mut all = Vec::new();
//! while let Some(c) = combs.next() {
//!     all.push(c.to_vec());
//! }
//! assert_eq!(all, vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
//! ```

use streaming_iterator::StreamingIterator;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Status {
    /// `advance` was never called
    Fresh,
    /// `slots` holds a valid combination
    Active,
    Exhausted,
}

/// Streaming enumeration of all size-`k` combinations of `n` positions.
///
/// Besides the standard successor step, the enumeration can be told to skip every remaining combination
/// that shares a given prefix with the current one (see [`Combinations::skip_from`]).
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    slots: Vec<usize>,
    status: Status,
    /// Slot from which the next successor step starts scanning, if different from the last one.
    pivot: Option<usize>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            slots: (0..k).collect(),
            status: Status::Fresh,
            pivot: None,
        }
    }

    /// Size of the produced combinations.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Requests that the next step keeps the content of slots `0..pivot` and advances slot `pivot` (or an earlier one
    /// if slot `pivot` is already at its maximum).
    ///
    /// This skips all combinations whose first `pivot + 1` slots are identical to the current ones.
    /// When several calls are made before advancing, the smallest pivot wins.
    pub fn skip_from(&mut self, pivot: usize) {
        debug_assert!(pivot < self.size());
        self.pivot = Some(self.pivot.map_or(pivot, |p| p.min(pivot)));
    }

    /// Moves to the next combination in which the prefix `slots[0..=pivot]` differs from the current one.
    /// Returns false if there is no such combination.
    fn step(&mut self, pivot: usize) -> bool {
        let k = self.slots.len();
        let n = self.n;
        // the highest value slot `i` can take while leaving room for the `k - i - 1` slots after it
        let max_at = |i: usize| n - k + i;

        let mut i = pivot + 1;
        while i > 0 {
            i -= 1;
            if self.slots[i] < max_at(i) {
                self.slots[i] += 1;
                for j in (i + 1)..k {
                    self.slots[j] = self.slots[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl StreamingIterator for Combinations {
    type Item = [usize];

    fn advance(&mut self) {
        self.status = match self.status {
            Status::Fresh if self.slots.len() <= self.n => Status::Active,
            Status::Fresh => Status::Exhausted,
            Status::Active if self.slots.is_empty() => Status::Exhausted,
            Status::Active => {
                let last = self.slots.len() - 1;
                let pivot = self.pivot.take().unwrap_or(last);
                if self.step(pivot) {
                    Status::Active
                } else {
                    Status::Exhausted
                }
            }
            Status::Exhausted => Status::Exhausted,
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        match self.status {
            Status::Active => Some(&self.slots),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(mut combs: Combinations) -> Vec<Vec<usize>> {
        let mut res = Vec::new();
        while let Some(c) = combs.next() {
            res.push(c.to_vec());
        }
        res
    }

    /// Number of size-`k` subsets of a set of size `n`, saturating at `u64::MAX`.
    fn binomial(n: usize, k: usize) -> u64 {
        if k > n {
            return 0;
        }
        let k = k.min(n - k) as u64;
        let n = n as u64;
        let mut acc: u64 = 1;
        for i in 0..k {
            // exact at each step: acc * (n - i) is divisible by (i + 1)
            acc = match acc.checked_mul(n - i) {
                Some(v) => v / (i + 1),
                None => return u64::MAX,
            };
        }
        acc
    }

    #[test]
    fn counts_match_binomials() {
        for n in 0..8 {
            for k in 0..=(n + 1) {
                let all = collect(Combinations::new(n, k));
                assert_eq!(all.len() as u64, binomial(n, k), "n={n} k={k}");
                for c in &all {
                    assert_eq!(c.len(), k);
                    assert!(c.windows(2).all(|w| w[0] < w[1]));
                    assert!(c.iter().all(|&p| p < n));
                }
                // strictly increasing in lexicographic order, hence no duplicates
                assert!(all.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn empty_combination() {
        assert_eq!(collect(Combinations::new(0, 0)), vec![Vec::<usize>::new()]);
        assert_eq!(collect(Combinations::new(3, 0)), vec![Vec::<usize>::new()]);
        assert!(collect(Combinations::new(2, 3)).is_empty());
    }

    #[test]
    fn skipping_a_prefix() {
        let mut combs = Combinations::new(5, 3);
        assert_eq!(combs.next(), Some(&[0, 1, 2][..]));
        // skip everything starting with [0, 1]
        combs.skip_from(1);
        assert_eq!(combs.next(), Some(&[0, 2, 3][..]));
        // skip everything starting with [0]
        combs.skip_from(0);
        assert_eq!(combs.next(), Some(&[1, 2, 3][..]));
        assert_eq!(combs.next(), Some(&[1, 2, 4][..]));
        // last slot at maximum: behaves as a normal step
        combs.skip_from(2);
        assert_eq!(combs.next(), Some(&[1, 3, 4][..]));
        combs.skip_from(0);
        assert_eq!(combs.next(), Some(&[2, 3, 4][..]));
        combs.skip_from(0);
        assert_eq!(combs.next(), None);
        assert_eq!(combs.next(), None);
    }

    #[test]
    fn binomials() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(10, 10), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(52, 5), 2_598_960);
    }
}
