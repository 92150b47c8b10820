// Matrix factories

use crate::core::container::IOMode;
use crate::core::error::Result;
use crate::core::matrix::Matrix;
use crate::types::{GraphBLASType, NumericType};

/// Matrix holding `value` on one diagonal and nothing elsewhere
///
/// `offset > 0` selects a superdiagonal, `offset < 0` a subdiagonal. A
/// diagonal lying entirely outside the matrix gives an empty matrix. The
/// capacity equals the number of entries.
pub fn eye<T: GraphBLASType>(nrows: usize, ncols: usize, value: T, offset: isize) -> Result<Matrix<T>> {
    let shift = offset.unsigned_abs();
    let (row_start, col_start) = if offset >= 0 { (0, shift) } else { (shift, 0) };
    let len = nrows
        .saturating_sub(row_start)
        .min(ncols.saturating_sub(col_start));

    let rows: Vec<usize> = (0..len).map(|k| row_start + k).collect();
    let cols: Vec<usize> = (0..len).map(|k| col_start + k).collect();

    let mut m = Matrix::with_capacity(nrows, ncols, len)?;
    m.build_unique(&rows, &cols, &vec![value; len], IOMode::Sequential)?;
    log::trace!("eye {}x{} offset {} with {} entries", nrows, ncols, offset, len);
    Ok(m)
}

/// Square identity matrix
pub fn identity<T: NumericType>(n: usize) -> Result<Matrix<T>> {
    eye(n, n, T::ONE, 0)
}
