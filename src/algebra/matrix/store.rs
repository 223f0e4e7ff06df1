use crate::algebra::{Scalar, ScalarValue};
use std::collections::HashMap;

/// Dictionary backed storage of the nonzero entries of a matrix.
///
/// Absent keys denote the zero of the owning context.  The store never
/// holds an explicit zero: writing one removes the key.  No bounds are
/// checked here, the owning [`Matrix`](crate::algebra::Matrix) does that.
#[derive(Debug, Clone, Default)]
pub struct SparseStore {
    entries: HashMap<(usize, usize), Scalar>,
}

impl SparseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Scalar> {
        self.entries.get(&(i, j))
    }

    /// Insert `v` at `(i, j)`, or remove the entry if `v` is zero.
    pub fn set(&mut self, i: usize, j: usize, v: Scalar) {
        if v.is_zero() {
            self.entries.remove(&(i, j));
        } else {
            self.entries.insert((i, j), v);
        }
    }

    pub fn remove(&mut self, i: usize, j: usize) -> Option<Scalar> {
        self.entries.remove(&(i, j))
    }

    /// number of explicit entries, including any outside the current window
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Scalar)> {
        self.entries.iter().map(|(&k, v)| (k, v))
    }

    /// Entries with `i < rows` and `j < cols`, in no particular order.
    pub fn iter_window(
        &self,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = ((usize, usize), &Scalar)> {
        self.iter().filter(move |&((i, j), _)| i < rows && j < cols)
    }

    /// Window entries sorted by `(row, col)`.  Kernels iterate in this
    /// order so that results do not depend on hash ordering.
    pub fn sorted_window(&self, rows: usize, cols: usize) -> Vec<((usize, usize), &Scalar)> {
        let mut v: Vec<_> = self.iter_window(rows, cols).collect();
        v.sort_unstable_by_key(|&(k, _)| k);
        v
    }

    /// Drop every entry outside the window.
    pub fn retain_window(&mut self, rows: usize, cols: usize) {
        self.entries.retain(|&(i, j), _| i < rows && j < cols);
    }

    /// Move every entry through `f`, which maps old to new coordinates.
    pub fn remap(&mut self, f: impl Fn(usize, usize) -> (usize, usize)) {
        self.entries = self
            .entries
            .drain()
            .map(|((i, j), v)| (f(i, j), v))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_drops_zeros() {
        let mut s = SparseStore::new();
        s.set(0, 0, Scalar::from(1));
        s.set(1, 2, Scalar::from(2.5));
        assert_eq!(s.count(), 2);
        s.set(0, 0, Scalar::from(0));
        assert_eq!(s.count(), 1);
        assert!(s.get(0, 0).is_none());
        s.set(3, 3, Scalar::from(0.0));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_store_window() {
        let mut s = SparseStore::new();
        for (i, j) in [(0, 0), (0, 2), (2, 0), (1, 1)] {
            s.set(i, j, Scalar::from(1));
        }
        let keys: Vec<_> = s.sorted_window(2, 2).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(0, 0), (1, 1)]);
        s.retain_window(2, 2);
        assert_eq!(s.count(), 2);

        assert_eq!(s.remove(1, 1), Some(Scalar::from(1)));
        assert_eq!(s.remove(1, 1), None);
        assert_eq!(s.count(), 1);
    }
}
