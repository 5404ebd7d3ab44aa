//! Binary indexed tree over access positions.

/// Fenwick tree of signed counts with O(log n) point update and prefix sum
#[derive(Debug, Clone)]
pub(crate) struct FenwickTree {
    tree: Vec<i64>,
}

impl FenwickTree {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    pub(crate) fn add(&mut self, position: usize, delta: i64) {
        let mut i = position + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Sum over positions `0..end`
    pub(crate) fn prefix_sum(&self, end: usize) -> i64 {
        let mut i = end.min(self.tree.len() - 1);
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Sum over positions `start..end`
    pub(crate) fn range_sum(&self, start: usize, end: usize) -> i64 {
        self.prefix_sum(end) - self.prefix_sum(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_sums() {
        let mut tree = FenwickTree::new(8);
        for (position, value) in [(0, 1), (3, 2), (7, 5)] {
            tree.add(position, value);
        }

        assert_eq!(tree.prefix_sum(0), 0);
        assert_eq!(tree.prefix_sum(4), 3);
        assert_eq!(tree.range_sum(1, 8), 7);
        assert_eq!(tree.range_sum(3, 4), 2);

        tree.add(3, -2);
        assert_eq!(tree.range_sum(0, 8), 6);
    }
}
