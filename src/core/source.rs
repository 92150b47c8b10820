// Core Layer: Triple sources for bulk matrix builds
//
// A triple source reports its dimensions and entry count up front and can
// replay its (row, col, value) sequence any number of times. File readers,
// generators and existing matrices all feed `Matrix::build_from_source`
// through this trait.

use crate::core::error::{GraphBlasError, Result};
use crate::core::iter::MatrixIter;
use crate::core::matrix::Matrix;
use crate::types::GraphBLASType;

/// Restartable provider of `(row, col, value)` triples
pub trait TripleSource<T: GraphBLASType> {
    type Iter<'a>: Iterator<Item = (usize, usize, T)>
    where
        Self: 'a;

    /// Number of rows of the described matrix
    fn nrows(&self) -> usize;

    /// Number of columns of the described matrix
    fn ncols(&self) -> usize;

    /// Number of triples `triples()` yields
    fn nnz(&self) -> usize;

    /// Start a fresh pass over the triples
    fn triples(&self) -> Self::Iter<'_>;
}

/// Owned coordinate-format triples
#[derive(Debug, Clone, PartialEq)]
pub struct CooTriples<T> {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
}

impl<T: GraphBLASType> CooTriples<T> {
    /// Create from parallel arrays
    ///
    /// Fails with `InvalidValue` if the arrays differ in length. Indices are
    /// checked when the triples are loaded into a matrix.
    pub fn new(
        nrows: usize,
        ncols: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(GraphBlasError::InvalidValue);
        }
        Ok(Self::from_parts(nrows, ncols, rows, cols, values))
    }

    pub(crate) fn from_parts(
        nrows: usize,
        ncols: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        Self {
            nrows,
            ncols,
            rows,
            cols,
            values,
        }
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

/// Iterator over owned coordinate triples
#[derive(Debug, Clone)]
pub struct CooIter<'a, T> {
    source: &'a CooTriples<T>,
    pos: usize,
}

impl<'a, T: GraphBLASType> Iterator for CooIter<'a, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.pos;
        let value = *self.source.values.get(pos)?;
        self.pos += 1;
        Some((self.source.rows[pos], self.source.cols[pos], value))
    }
}

impl<T: GraphBLASType> TripleSource<T> for CooTriples<T> {
    type Iter<'a> = CooIter<'a, T> where Self: 'a;

    fn nrows(&self) -> usize {
        self.nrows
    }

    fn ncols(&self) -> usize {
        self.ncols
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn triples(&self) -> Self::Iter<'_> {
        CooIter {
            source: self,
            pos: 0,
        }
    }
}

impl<T: GraphBLASType> TripleSource<T> for Matrix<T> {
    type Iter<'a> = MatrixIter<'a, T> where Self: 'a;

    fn nrows(&self) -> usize {
        Matrix::nrows(self)
    }

    fn ncols(&self) -> usize {
        Matrix::ncols(self)
    }

    fn nnz(&self) -> usize {
        Matrix::nnz(self)
    }

    fn triples(&self) -> Self::Iter<'_> {
        self.iter()
    }
}
