// Core Layer: Matrix implementation
//
// Matrices are stored in Compressed Sparse Row form with column indices
// strictly increasing inside each row. That canonical layout is what makes
// iteration order stable and kernel results independent of how the entries
// were supplied.

use crate::core::container::{try_reserve, ContainerState, IOMode, Phase, Stamp};
use crate::core::error::{GraphBlasError, Result};
use crate::core::iter::MatrixIter;
use crate::core::source::{CooTriples, TripleSource};
use crate::parallel;
use crate::types::{GraphBLASType, TypeCode};

/// Sparse matrix in CSR form
#[derive(Debug)]
pub struct Matrix<T: GraphBLASType> {
    nrows: usize,
    ncols: usize,
    /// Row pointer array (length = nrows + 1)
    row_ptrs: Vec<usize>,
    /// Column index of each stored entry
    col_indices: Vec<usize>,
    /// Value of each stored entry
    values: Vec<T>,
    state: ContainerState,
}

/// Number of addressable positions, saturating on overflow
fn positions(nrows: usize, ncols: usize) -> usize {
    nrows.checked_mul(ncols).unwrap_or(usize::MAX)
}

impl<T: GraphBLASType> Matrix<T> {
    /// Create a new empty matrix
    ///
    /// The default capacity is `max(nrows, ncols)`, capped at the number of
    /// positions.
    pub fn new(nrows: usize, ncols: usize) -> Result<Self> {
        let capacity = nrows.max(ncols).min(positions(nrows, ncols));
        Self::with_capacity(nrows, ncols, capacity)
    }

    /// Create a new empty matrix with an explicit capacity
    pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Result<Self> {
        Ok(Self {
            nrows,
            ncols,
            row_ptrs: vec![0; nrows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
            state: ContainerState::new(capacity, positions(nrows, ncols))?,
        })
    }

    /// Get number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Get shape as (nrows, ncols)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Get number of stored entries, explicit zeros included
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Get reserved capacity; always at least `nnz()`
    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    /// Get type code
    pub fn type_code(&self) -> TypeCode {
        T::TYPE_CODE
    }

    pub fn row_ptrs(&self) -> &[usize] {
        &self.row_ptrs
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Column indices and values stored in row `i`; `i` must be below `nrows`
    pub(crate) fn row(&self, i: usize) -> (&[usize], &[T]) {
        let range = self.row_ptrs[i]..self.row_ptrs[i + 1];
        (&self.col_indices[range.clone()], &self.values[range])
    }

    /// Reserve room for `capacity` entries
    ///
    /// Fails with `CapacityExceeded` above `nrows * ncols` or below `nnz()`.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        self.state.check_resize(capacity, self.nnz())?;
        try_reserve(&mut self.col_indices, capacity)?;
        try_reserve(&mut self.values, capacity)?;
        self.state.set_capacity(capacity);
        log::debug!(
            "Matrix {}x{} resized to capacity {}",
            self.nrows,
            self.ncols,
            capacity
        );
        Ok(())
    }

    /// Replace all entries with the given triples
    ///
    /// Checks run in order: slice lengths (`InvalidValue`), index range
    /// (`IndexOutOfBounds`), capacity (`CapacityExceeded`), uniqueness
    /// (`DuplicateCoordinate`). Nothing changes on failure. The result does not
    /// depend on `mode` or on the order of the triples.
    pub fn build_unique(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[T],
        mode: IOMode,
    ) -> Result<()> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(GraphBlasError::InvalidValue);
        }
        let triples: Vec<(usize, usize, T)> = rows
            .iter()
            .zip(cols)
            .zip(values)
            .map(|((&i, &j), &v)| (i, j, v))
            .collect();
        self.build_from_triples(triples, mode)
    }

    /// Replace all entries with the triples of a source
    ///
    /// The source must have this matrix's dimensions and yield exactly
    /// `source.nnz()` triples.
    pub fn build_from_source<S: TripleSource<T>>(&mut self, source: &S, mode: IOMode) -> Result<()> {
        if source.nrows() != self.nrows || source.ncols() != self.ncols {
            return Err(GraphBlasError::DimensionMismatch);
        }
        let triples: Vec<(usize, usize, T)> = source.triples().collect();
        if triples.len() != source.nnz() {
            log::debug!(
                "Source announced {} triples but yielded {}",
                source.nnz(),
                triples.len()
            );
            return Err(GraphBlasError::InvalidValue);
        }
        self.build_from_triples(triples, mode)
    }

    fn build_from_triples(&mut self, mut triples: Vec<(usize, usize, T)>, mode: IOMode) -> Result<()> {
        if triples
            .iter()
            .any(|&(i, j, _)| i >= self.nrows || j >= self.ncols)
        {
            return Err(GraphBlasError::IndexOutOfBounds);
        }
        self.state.ensure_fits(triples.len())?;

        match mode {
            IOMode::Sequential => triples.sort_unstable_by_key(|t| (t.0, t.1)),
            IOMode::Parallel => parallel::sort_unstable_by_key(&mut triples, |t| (t.0, t.1)),
        }
        if triples
            .windows(2)
            .any(|w| (w[0].0, w[0].1) == (w[1].0, w[1].1))
        {
            return Err(GraphBlasError::DuplicateCoordinate);
        }

        let mut row_ptrs = vec![0usize; self.nrows + 1];
        for &(i, _, _) in &triples {
            row_ptrs[i + 1] += 1;
        }
        for i in 0..self.nrows {
            row_ptrs[i + 1] += row_ptrs[i];
        }
        let (col_indices, values) = triples.into_iter().map(|(_, j, v)| (j, v)).unzip();

        log::debug!(
            "Built {}x{} matrix with {} entries ({:?})",
            self.nrows,
            self.ncols,
            row_ptrs[self.nrows],
            mode
        );
        self.replace(row_ptrs, col_indices, values);
        Ok(())
    }

    /// Set or overwrite a single entry
    pub fn set_element(&mut self, value: T, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(GraphBlasError::IndexOutOfBounds);
        }
        let start = self.row_ptrs[row];
        let end = self.row_ptrs[row + 1];
        match self.col_indices[start..end].binary_search(&col) {
            Ok(offset) => self.values[start + offset] = value,
            Err(offset) => {
                self.state.ensure_fits(self.nnz() + 1)?;
                self.col_indices.insert(start + offset, col);
                self.values.insert(start + offset, value);
                for ptr in &mut self.row_ptrs[row + 1..] {
                    *ptr += 1;
                }
            }
        }
        self.state.touch();
        Ok(())
    }

    /// Get the entry at `(row, col)`, `None` if nothing is stored there
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows {
            return None;
        }
        let (cols, values) = self.row(row);
        cols.binary_search(&col).ok().map(|pos| values[pos])
    }

    /// Fill every position with `value`, or clear every entry for `None`
    pub fn fill(&mut self, value: Option<T>) -> Result<()> {
        match value {
            Some(v) => {
                let total = positions(self.nrows, self.ncols);
                self.state.ensure_fits(total)?;
                let row_ptrs = (0..=self.nrows).map(|i| i * self.ncols).collect();
                let col_indices = (0..self.nrows).flat_map(|_| 0..self.ncols).collect();
                self.replace(row_ptrs, col_indices, vec![v; total]);
            }
            None => self.clear(),
        }
        Ok(())
    }

    /// Remove every entry; capacity is kept
    pub fn clear(&mut self) {
        self.row_ptrs.iter_mut().for_each(|p| *p = 0);
        self.col_indices.clear();
        self.values.clear();
        self.state.touch();
    }

    /// Iterate over stored `(row, col, value)` triples in row-major order
    pub fn iter(&self) -> MatrixIter<'_, T> {
        MatrixIter::new(&self.row_ptrs, &self.col_indices, &self.values)
    }

    /// Copy out the stored entries as row, column and value arrays
    pub fn extract_tuples(&self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        let mut rows = Vec::with_capacity(self.nnz());
        for i in 0..self.nrows {
            rows.extend(std::iter::repeat(i).take(self.row_ptrs[i + 1] - self.row_ptrs[i]));
        }
        (rows, self.col_indices.clone(), self.values.clone())
    }

    /// Copy out the stored entries as a triple source
    pub fn to_coo(&self) -> CooTriples<T> {
        let (rows, cols, values) = self.extract_tuples();
        CooTriples::from_parts(self.nrows, self.ncols, rows, cols, values)
    }

    /// Build the transpose as a new matrix
    ///
    /// Its capacity is the larger of its default capacity and `nnz()`.
    pub fn transpose(&self) -> Result<Matrix<T>> {
        let mut counts = vec![0usize; self.ncols + 1];
        for &j in &self.col_indices {
            counts[j + 1] += 1;
        }
        for j in 0..self.ncols {
            counts[j + 1] += counts[j];
        }
        let row_ptrs = counts.clone();

        // Scatter in row order, so each output row stays sorted
        let mut next = counts;
        let mut col_indices = vec![0usize; self.nnz()];
        let mut values = self.values.clone();
        for (i, j, v) in self.iter() {
            let slot = next[j];
            col_indices[slot] = i;
            values[slot] = v;
            next[j] += 1;
        }

        let mut t = Matrix::new(self.ncols, self.nrows)?;
        t.state.grow_to(self.nnz())?;
        t.replace(row_ptrs, col_indices, values);
        Ok(t)
    }

    pub(crate) fn stamp(&self) -> Stamp {
        self.state.stamp()
    }

    pub(crate) fn state(&self) -> &ContainerState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ContainerState {
        &mut self.state
    }

    /// Write an operation's output, one sorted entry list per row
    ///
    /// `Resize` only grows capacity to fit; `Execute` requires the output to
    /// fit and then replaces the entries.
    pub(crate) fn commit_rows(&mut self, rows: Vec<Vec<(usize, T)>>, phase: Phase) -> Result<()> {
        debug_assert_eq!(rows.len(), self.nrows);
        let nnz: usize = rows.iter().map(Vec::len).sum();
        match phase {
            Phase::Resize => self.state.grow_to(nnz),
            Phase::Execute => {
                self.state.ensure_fits(nnz)?;
                let mut row_ptrs = Vec::with_capacity(self.nrows + 1);
                let mut col_indices = Vec::with_capacity(nnz);
                let mut values = Vec::with_capacity(nnz);
                row_ptrs.push(0);
                for row in rows {
                    for (j, v) in row {
                        col_indices.push(j);
                        values.push(v);
                    }
                    row_ptrs.push(col_indices.len());
                }
                self.replace(row_ptrs, col_indices, values);
                Ok(())
            }
        }
    }

    fn replace(&mut self, row_ptrs: Vec<usize>, col_indices: Vec<usize>, values: Vec<T>) {
        debug_assert_eq!(row_ptrs.len(), self.nrows + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        self.row_ptrs = row_ptrs;
        self.col_indices = col_indices;
        self.values = values;
        self.state.touch();
    }
}

impl<T: GraphBLASType> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self {
            nrows: self.nrows,
            ncols: self.ncols,
            row_ptrs: self.row_ptrs.clone(),
            col_indices: self.col_indices.clone(),
            values: self.values.clone(),
            state: self.state.duplicate(),
        }
    }
}

impl<'a, T: GraphBLASType> IntoIterator for &'a Matrix<T> {
    type Item = (usize, usize, T);
    type IntoIter = MatrixIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Matrix<f64> {
        let mut a = Matrix::new(3, 3).unwrap();
        a.resize(6).unwrap();
        a.build_unique(
            &[0, 0, 1, 1, 2, 2],
            &[0, 2, 1, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            IOMode::Sequential,
        )
        .unwrap();
        a
    }

    #[test]
    fn test_default_capacity() {
        let a = Matrix::<f64>::new(3, 3).unwrap();
        assert_eq!(a.capacity(), 3);
        let b = Matrix::<f64>::new(0, 7).unwrap();
        assert_eq!(b.capacity(), 0);
        let c = Matrix::<f64>::with_capacity(497, 497, 1727).unwrap();
        assert_eq!(c.capacity(), 1727);
    }

    #[test]
    fn test_build_needs_capacity() {
        let mut a = Matrix::<f64>::new(3, 3).unwrap();
        let err = a
            .build_unique(
                &[0, 0, 1, 1, 2, 2],
                &[0, 2, 1, 2, 0, 1],
                &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
                IOMode::Sequential,
            )
            .unwrap_err();
        assert_eq!(err, GraphBlasError::CapacityExceeded);
        assert_eq!(a.nnz(), 0);
    }

    #[test]
    fn test_build_layout() {
        let a = example();
        assert_eq!(a.nnz(), 6);
        assert_eq!(a.row_ptrs(), &[0, 2, 4, 6]);
        assert_eq!(a.col_indices(), &[0, 2, 1, 2, 0, 1]);
        assert_eq!(a.get(1, 2), Some(4.0));
        assert_eq!(a.get(0, 1), None);
        assert_eq!(a.get(5, 0), None);
    }

    #[test]
    fn test_build_rejects_duplicates_and_out_of_range() {
        let mut a = example();
        assert_eq!(
            a.build_unique(&[0, 0], &[1, 1], &[1.0, 2.0], IOMode::Parallel),
            Err(GraphBlasError::DuplicateCoordinate)
        );
        assert_eq!(
            a.build_unique(&[3], &[0], &[1.0], IOMode::Sequential),
            Err(GraphBlasError::IndexOutOfBounds)
        );
        assert_eq!(
            a.build_unique(&[0], &[0, 1], &[1.0], IOMode::Sequential),
            Err(GraphBlasError::InvalidValue)
        );
        assert_eq!(a.nnz(), 6);
    }

    #[test]
    fn test_set_element_inserts_in_place() {
        let mut a = Matrix::<i32>::with_capacity(2, 3, 3).unwrap();
        a.set_element(5, 1, 2).unwrap();
        a.set_element(7, 0, 1).unwrap();
        a.set_element(9, 1, 0).unwrap();
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![(0, 1, 7), (1, 0, 9), (1, 2, 5)]
        );
        assert_eq!(
            a.set_element(1, 0, 0).unwrap_err(),
            GraphBlasError::CapacityExceeded
        );
        a.set_element(0, 1, 2).unwrap();
        assert_eq!(a.get(1, 2), Some(0));
        assert_eq!(
            a.set_element(1, 2, 0).unwrap_err(),
            GraphBlasError::IndexOutOfBounds
        );
    }

    #[test]
    fn test_fill_and_clear() {
        let mut a = Matrix::<u8>::with_capacity(2, 2, 4).unwrap();
        a.fill(Some(3)).unwrap();
        assert_eq!(a.nnz(), 4);
        assert_eq!(a.get(1, 1), Some(3));
        a.fill(None).unwrap();
        assert_eq!(a.nnz(), 0);
        assert_eq!(a.row_ptrs(), &[0, 0, 0]);

        let mut b = Matrix::<u8>::new(2, 2).unwrap();
        assert_eq!(b.fill(Some(1)), Err(GraphBlasError::CapacityExceeded));
    }

    #[test]
    fn test_transpose() {
        let a = example();
        let t = a.transpose().unwrap();
        assert_eq!(t.shape(), (3, 3));
        assert_eq!(t.nnz(), 6);
        for (i, j, v) in a.iter() {
            assert_eq!(t.get(j, i), Some(v));
        }
        assert!(t.capacity() >= t.nnz());
    }

    #[test]
    fn test_extract_tuples() {
        let a = example();
        let (rows, cols, values) = a.extract_tuples();
        assert_eq!(rows, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(cols, vec![0, 2, 1, 2, 0, 1]);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_build_from_source() {
        let a = example();
        let mut b = Matrix::<f64>::with_capacity(3, 3, 6).unwrap();
        b.build_from_source(&a, IOMode::Parallel).unwrap();
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            b.iter().collect::<Vec<_>>()
        );

        let mut wrong = Matrix::<f64>::with_capacity(3, 4, 6).unwrap();
        assert_eq!(
            wrong.build_from_source(&a, IOMode::Sequential),
            Err(GraphBlasError::DimensionMismatch)
        );
    }
}
