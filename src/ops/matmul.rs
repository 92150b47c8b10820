// Matrix-Vector Multiplication
//
// Operations:
// - mxv: w = A ⊕.⊗ u
// - mxv_masked: w<m> = A ⊕.⊗ u
// - vxm: w = u ⊕.⊗ A, computed as A^T ⊕.⊗ u
//
// Output rows are independent, so the kernel maps over rows on the worker
// pool. Each row folds its products in ascending column order, which keeps
// results identical for any number of workers.

use crate::core::container::Phase;
use crate::core::error::{GraphBlasError, Result};
use crate::core::matrix::Matrix;
use crate::core::semiring::Semiring;
use crate::core::vector::Vector;
use crate::ops::descriptor::{resolve, Descriptor, Kernel};
use crate::ops::mask::{write_vector, VectorMask};
use crate::parallel;
use crate::types::GraphBLASType;

/// ⊕ over `a[j] ⊗ u[j]` for the columns `j` stored in both; `None` if no
/// column contributes
fn row_product<T: GraphBLASType>(
    cols: &[usize],
    vals: &[T],
    u: &Vector<T>,
    semiring: &Semiring<T>,
) -> Option<T> {
    let u_indices = u.indices();
    let u_values = u.values();
    let mut acc: Option<T> = None;
    for (&j, &a) in cols.iter().zip(vals) {
        if let Ok(p) = u_indices.binary_search(&j) {
            let prod = semiring.multiply(a, u_values[p]);
            acc = Some(match acc {
                Some(sum) => semiring.add(sum, prod),
                None => prod,
            });
        }
    }
    acc
}

fn mxv_impl<T: GraphBLASType, M: GraphBLASType>(
    w: &mut Vector<T>,
    mask: Option<&Vector<M>>,
    a: &Matrix<T>,
    u: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    let desc = resolve(desc, Kernel::MatVec)?;

    let (out_len, in_len) = if desc.transpose_first {
        (a.ncols(), a.nrows())
    } else {
        (a.nrows(), a.ncols())
    };
    if u.size() != in_len || w.size() != out_len {
        log::debug!(
            "mxv shape mismatch: A is {}x{} (transpose={}), u has {}, w has {}",
            a.nrows(),
            a.ncols(),
            desc.transpose_first,
            u.size(),
            w.size()
        );
        return Err(GraphBlasError::DimensionMismatch);
    }
    let mask = VectorMask::checked(mask, out_len, &desc)?;

    log::debug!(
        "mxv: A {}x{} nnz={}, u nnz={}, semiring={}, phase={:?}",
        a.nrows(),
        a.ncols(),
        a.nnz(),
        u.nnz(),
        semiring.name(),
        phase
    );

    let transposed;
    let a = if desc.transpose_first {
        transposed = a.transpose()?;
        &transposed
    } else {
        a
    };

    let rows = parallel::map_indexed(a.nrows(), |i| {
        if let Some(m) = &mask {
            if !m.allows(i) {
                return None;
            }
        }
        let (cols, vals) = a.row(i);
        row_product(cols, vals, u, semiring)
    });
    let computed: Vec<(usize, T)> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    log::trace!("mxv produced {} entries", computed.len());

    let (indices, values) = write_vector(w, computed, mask.as_ref(), desc.output_replace);
    w.commit(indices, values, phase)
}

/// Matrix-vector multiply: w = A ⊕.⊗ u
///
/// Every entry of `w` is replaced; rows of `A` with no column matching an
/// entry of `u` produce no entry.
pub fn mxv<T: GraphBLASType>(
    w: &mut Vector<T>,
    a: &Matrix<T>,
    u: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    mxv_impl::<T, bool>(w, None, a, u, semiring, desc, phase)
}

/// Masked matrix-vector multiply: w<mask> = A ⊕.⊗ u
///
/// Only positions the mask allows are written; the others keep their entry
/// unless the descriptor asks for output replacement.
pub fn mxv_masked<T: GraphBLASType, M: GraphBLASType>(
    w: &mut Vector<T>,
    mask: &Vector<M>,
    a: &Matrix<T>,
    u: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    mxv_impl(w, Some(mask), a, u, semiring, desc, phase)
}

/// Vector-matrix multiply: w = u ⊕.⊗ A
pub fn vxm<T: GraphBLASType>(
    w: &mut Vector<T>,
    u: &Vector<T>,
    a: &Matrix<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    let mut desc = resolve(desc, Kernel::MatVec)?;
    desc.transpose_first = !desc.transpose_first;
    mxv_impl::<T, bool>(w, None, a, u, semiring, Some(&desc), phase)
}
