// Core Layer: Accessors over stored entries
//
// Iteration order is ascending index for vectors and row-major for matrices.
// Both iterators borrow the container, so it cannot change mid-iteration, and
// every call to `iter()` starts again from the first entry.

use crate::types::GraphBLASType;
use std::iter::FusedIterator;

/// Iterator over the `(index, value)` entries of a vector
#[derive(Debug, Clone)]
pub struct VectorIter<'a, T> {
    indices: &'a [usize],
    values: &'a [T],
    pos: usize,
}

impl<'a, T> VectorIter<'a, T> {
    pub(crate) fn new(indices: &'a [usize], values: &'a [T]) -> Self {
        Self {
            indices,
            values,
            pos: 0,
        }
    }
}

impl<'a, T: GraphBLASType> Iterator for VectorIter<'a, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.indices.get(self.pos)?;
        let value = self.values[self.pos];
        self.pos += 1;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indices.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a, T: GraphBLASType> ExactSizeIterator for VectorIter<'a, T> {}

impl<'a, T: GraphBLASType> FusedIterator for VectorIter<'a, T> {}

/// Iterator over the `(row, col, value)` entries of a CSR matrix
#[derive(Debug, Clone)]
pub struct MatrixIter<'a, T> {
    row_ptrs: &'a [usize],
    col_indices: &'a [usize],
    values: &'a [T],
    row: usize,
    pos: usize,
}

impl<'a, T> MatrixIter<'a, T> {
    pub(crate) fn new(row_ptrs: &'a [usize], col_indices: &'a [usize], values: &'a [T]) -> Self {
        Self {
            row_ptrs,
            col_indices,
            values,
            row: 0,
            pos: 0,
        }
    }
}

impl<'a, T: GraphBLASType> Iterator for MatrixIter<'a, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.values.len() {
            return None;
        }
        // Skip empty rows
        while self.row_ptrs[self.row + 1] <= self.pos {
            self.row += 1;
        }
        let item = (self.row, self.col_indices[self.pos], self.values[self.pos]);
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a, T: GraphBLASType> ExactSizeIterator for MatrixIter<'a, T> {}

impl<'a, T: GraphBLASType> FusedIterator for MatrixIter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_iter() {
        let indices = [1, 4, 7];
        let values = [1.5, 0.0, -2.0];
        let items: Vec<_> = VectorIter::new(&indices, &values).collect();
        assert_eq!(items, vec![(1, 1.5), (4, 0.0), (7, -2.0)]);
    }

    #[test]
    fn test_matrix_iter_skips_empty_rows() {
        // Rows 0 and 2 are empty
        let row_ptrs = [0, 0, 2, 2, 3];
        let cols = [0, 3, 1];
        let values = [10, 20, 30];
        let iter = MatrixIter::new(&row_ptrs, &cols, &values);
        assert_eq!(iter.len(), 3);
        let items: Vec<_> = iter.collect();
        assert_eq!(items, vec![(1, 0, 10), (1, 3, 20), (3, 1, 30)]);
    }

    #[test]
    fn test_empty_matrix_iter() {
        let row_ptrs = [0, 0, 0];
        let mut iter = MatrixIter::<f64>::new(&row_ptrs, &[], &[]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
