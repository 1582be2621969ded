//! Lexicographic enumeration of k-subsets of `0..n`.
//!
//! Registration and retrieval must visit subsets in the same order, so the
//! enumeration is fully deterministic: `[0,1,2] → [0,1,3] → … → [n-k..n)`.

/// Number of ways to choose `k` items out of `n`.
pub fn total_combinations(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut total = 1u64;
    for i in 0..k {
        // exact at every step: the running product is C(n, i + 1)
        total = total * (n - i) as u64 / (i + 1) as u64;
    }
    total
}

/// Cursor over all k-subsets of `0..n`, expressed as ascending index lists.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    /// Starts at the first subset. When `k > n` or `k == 0` there is nothing to visit.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            exhausted: k == 0 || k > n,
        }
    }

    /// Current subset, or `None` once the enumeration is finished.
    pub fn current(&self) -> Option<&[usize]> {
        if self.exhausted {
            None
        } else {
            Some(&self.indices)
        }
    }

    /// Moves to the next subset. Returns `false` when there is none.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let k = self.indices.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return true;
            }
        }
        self.exhausted = true;
        false
    }

    /// Collects every subset. Intended for small, precomputed tables.
    pub fn collect_all(n: usize, k: usize) -> Vec<Vec<usize>> {
        let mut cursor = Self::new(n, k);
        let mut out = Vec::new();
        while let Some(subset) = cursor.current() {
            out.push(subset.to_vec());
            cursor.advance();
        }
        out
    }
}
