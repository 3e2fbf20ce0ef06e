//! Triangular packing of unordered state pairs `{i,j}, i<j` (spec §3
//! "State pair index"), used to key separating-sequence tables.

use crate::model::StateId;

/// `idx(i,j) = i*n + j - 1 - i*(i+3)/2`, valid for `i < j < n`.
pub fn pair_index(n: usize, i: StateId, j: StateId) -> usize {
    debug_assert!(i < j && j < n);
    i * n + j - 1 - i * (i + 3) / 2
}

/// Number of unordered pairs over `n` states.
pub fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Inverse of [`pair_index`]: recovers `(i, j)` from a packed index.
pub fn unpack_pair(n: usize, mut idx: usize) -> (StateId, StateId) {
    let mut i = 0usize;
    loop {
        let row_len = n - i - 1;
        if idx < row_len {
            return (i, i + 1 + idx);
        }
        idx -= row_len;
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_index_round_trips() {
        let n = 6;
        for i in 0..n {
            for j in (i + 1)..n {
                let idx = pair_index(n, i, j);
                assert_eq!(unpack_pair(n, idx), (i, j));
            }
        }
    }

    #[test]
    fn pair_index_covers_contiguous_range() {
        let n = 5;
        let mut seen: Vec<usize> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| pair_index(n, i, j)))
            .collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..pair_count(n)).collect();
        assert_eq!(seen, expected);
    }
}
