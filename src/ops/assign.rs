// Container Assignment
//
// Operations:
// - set_vector / set_matrix: C = A
// - set_vector_masked / set_matrix_masked: C<M> = A
//
// A masked assignment replaces the destination with the source entries at
// mask-selected positions; nothing else survives, so the result never holds
// more entries than the source. It is two-phase. A `Resize` call computes the
// output pattern, grows the destination to hold it and leaves a reservation
// naming the mask, source and descriptor. The `Execute` call must find that
// reservation untouched; otherwise it fails with `NotResized`. Writing the
// values consumes the reservation.

use crate::core::container::{Phase, Reservation, ReservedOp};
use crate::core::error::{GraphBlasError, Result};
use crate::core::matrix::Matrix;
use crate::core::vector::Vector;
use crate::ops::descriptor::{resolve, Descriptor, Kernel};
use crate::ops::mask::{MatrixMask, VectorMask};
use crate::parallel;
use crate::types::GraphBLASType;

fn row_entries<T: GraphBLASType>(m: &Matrix<T>, i: usize) -> Vec<(usize, T)> {
    let (cols, vals) = m.row(i);
    cols.iter().copied().zip(vals.iter().copied()).collect()
}

fn check_shapes<A, B>(dest: &Matrix<A>, source: &Matrix<B>) -> Result<()>
where
    A: GraphBLASType,
    B: GraphBLASType,
{
    if dest.shape() != source.shape() {
        log::debug!(
            "set shape mismatch: {:?} vs {:?}",
            dest.shape(),
            source.shape()
        );
        return Err(GraphBlasError::DimensionMismatch);
    }
    Ok(())
}

/// Copy every entry of `source` into `dest`: dest = source
pub fn set_vector<T: GraphBLASType>(
    dest: &mut Vector<T>,
    source: &Vector<T>,
    phase: Phase,
) -> Result<()> {
    if dest.size() != source.size() {
        return Err(GraphBlasError::DimensionMismatch);
    }
    log::debug!("set_vector: size={}, nnz={}, phase={:?}", source.size(), source.nnz(), phase);
    let (indices, values) = source.extract_tuples();
    dest.commit(indices, values, phase)
}

/// Masked vector assignment: dest<mask> = source
///
/// Call once with `Phase::Resize` and then with `Phase::Execute` using the
/// same mask, source and descriptor.
pub fn set_vector_masked<T: GraphBLASType, M: GraphBLASType>(
    dest: &mut Vector<T>,
    mask: &Vector<M>,
    source: &Vector<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    let desc = resolve(desc, Kernel::Set)?;
    if dest.size() != source.size() || mask.size() != dest.size() {
        return Err(GraphBlasError::DimensionMismatch);
    }

    let inputs = vec![mask.stamp(), source.stamp()];
    if phase == Phase::Execute {
        dest.state().check_reservation(ReservedOp::MaskedSet, &inputs, &desc)?;
    }

    let vmask = VectorMask::new(mask, &desc);
    let (indices, values): (Vec<usize>, Vec<T>) =
        source.iter().filter(|&(i, _)| vmask.allows(i)).unzip();
    let nnz = indices.len();
    log::debug!(
        "set_vector_masked: size={}, output nnz={}, phase={:?}",
        dest.size(),
        nnz,
        phase
    );

    dest.commit(indices, values, phase)?;
    if phase == Phase::Resize {
        dest.state_mut()
            .reserve(Reservation::new(ReservedOp::MaskedSet, inputs, desc, nnz));
    }
    Ok(())
}

/// Copy every entry of `source` into `dest`: dest = source
pub fn set_matrix<T: GraphBLASType>(
    dest: &mut Matrix<T>,
    source: &Matrix<T>,
    phase: Phase,
) -> Result<()> {
    check_shapes(dest, source)?;
    log::debug!(
        "set_matrix: {}x{}, nnz={}, phase={:?}",
        source.nrows(),
        source.ncols(),
        source.nnz(),
        phase
    );
    let rows = parallel::map_indexed(source.nrows(), |i| row_entries(source, i));
    dest.commit_rows(rows, phase)
}

/// Masked matrix assignment: dest<mask> = source
///
/// Call once with `Phase::Resize` and then with `Phase::Execute` using the
/// same mask, source and descriptor.
pub fn set_matrix_masked<T: GraphBLASType, M: GraphBLASType>(
    dest: &mut Matrix<T>,
    mask: &Matrix<M>,
    source: &Matrix<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    let desc = resolve(desc, Kernel::Set)?;
    check_shapes(dest, source)?;
    check_shapes(dest, mask)?;

    let inputs = vec![mask.stamp(), source.stamp()];
    if phase == Phase::Execute {
        dest.state().check_reservation(ReservedOp::MaskedSet, &inputs, &desc)?;
    }

    let mmask = MatrixMask::new(mask, &desc);
    let rows = parallel::map_indexed(source.nrows(), |i| {
        let mut entries = row_entries(source, i);
        entries.retain(|&(j, _)| mmask.allows(i, j));
        entries
    });
    let nnz: usize = rows.iter().map(Vec::len).sum();
    log::debug!(
        "set_matrix_masked: {}x{}, output nnz={}, phase={:?}",
        dest.nrows(),
        dest.ncols(),
        nnz,
        phase
    );

    dest.commit_rows(rows, phase)?;
    if phase == Phase::Resize {
        dest.state_mut()
            .reserve(Reservation::new(ReservedOp::MaskedSet, inputs, desc, nnz));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::container::IOMode;

    fn example() -> Matrix<f64> {
        let mut a = Matrix::with_capacity(3, 3, 6).unwrap();
        a.build_unique(
            &[0, 0, 1, 1, 2, 2],
            &[0, 2, 1, 2, 0, 1],
            &[1.0, 2.0, 0.0, 4.0, 5.0, 0.0],
            IOMode::Sequential,
        )
        .unwrap();
        a
    }

    #[test]
    fn test_set_matrix_resize_then_execute() {
        let a = example();
        let mut b = Matrix::<f64>::new(3, 3).unwrap();
        assert_eq!(b.capacity(), 3);
        assert_eq!(
            set_matrix(&mut b, &a, Phase::Execute),
            Err(GraphBlasError::CapacityExceeded)
        );

        set_matrix(&mut b, &a, Phase::Resize).unwrap();
        assert_eq!(b.nnz(), 0);
        assert!(b.capacity() >= 6);

        set_matrix(&mut b, &a, Phase::Execute).unwrap();
        assert_eq!(b.extract_tuples(), a.extract_tuples());
    }

    #[test]
    fn test_value_mask_counts_explicit_zeros() {
        let a = example();
        let mut ones = Matrix::<f64>::with_capacity(3, 3, 9).unwrap();
        ones.fill(Some(1.0)).unwrap();

        // C<A> = 1 keeps only positions where A holds a nonzero value
        let mut c = Matrix::<f64>::new(3, 3).unwrap();
        set_matrix_masked(&mut c, &a, &ones, None, Phase::Resize).unwrap();
        set_matrix_masked(&mut c, &a, &ones, None, Phase::Execute).unwrap();
        assert_eq!(c.nnz(), 4);
        assert_eq!(a.nnz() - c.nnz(), 2);
        assert_eq!(c.get(1, 1), None);
        assert_eq!(c.get(1, 2), Some(1.0));
    }

    #[test]
    fn test_diagonal_mask_extracts_diagonal_into_populated_dest() {
        use crate::algorithms::matrices::eye;

        let a = example();
        let mut b = Matrix::<f64>::new(3, 3).unwrap();
        set_matrix(&mut b, &a, Phase::Resize).unwrap();
        set_matrix(&mut b, &a, Phase::Execute).unwrap();
        assert_eq!(b.nnz(), 6);

        // B<I> = A with B still holding all of A
        let diag = eye(3, 3, true, 0).unwrap();
        set_matrix_masked(&mut b, &diag, &a, None, Phase::Resize).unwrap();
        set_matrix_masked(&mut b, &diag, &a, None, Phase::Execute).unwrap();
        assert_eq!(
            b.extract_tuples(),
            (vec![0, 1], vec![0, 1], vec![1.0, 0.0])
        );

        // C<B> = A then counts the explicit zeros on the diagonal
        let mut c = Matrix::<f64>::new(3, 3).unwrap();
        set_matrix_masked(&mut c, &b, &a, None, Phase::Resize).unwrap();
        set_matrix_masked(&mut c, &b, &a, None, Phase::Execute).unwrap();
        assert_eq!(b.nnz() - c.nnz(), 1);
    }

    #[test]
    fn test_masked_set_never_exceeds_source() {
        let mut source = Matrix::<f64>::with_capacity(3, 3, 1).unwrap();
        source.set_element(1.0, 0, 0).unwrap();
        let mut everywhere = Matrix::<bool>::with_capacity(3, 3, 9).unwrap();
        everywhere.fill(Some(true)).unwrap();

        for desc in [Descriptor::new(), Descriptor::new().structural()] {
            let mut dest = Matrix::<f64>::with_capacity(3, 3, 3).unwrap();
            dest.set_element(7.0, 0, 1).unwrap();
            dest.set_element(8.0, 1, 0).unwrap();

            set_matrix_masked(&mut dest, &everywhere, &source, Some(&desc), Phase::Resize).unwrap();
            set_matrix_masked(&mut dest, &everywhere, &source, Some(&desc), Phase::Execute)
                .unwrap();
            assert!(dest.nnz() <= source.nnz());
            assert_eq!(dest.extract_tuples(), (vec![0], vec![0], vec![1.0]));
        }

        // A complemented full mask selects nothing
        let mut dest = Matrix::<f64>::with_capacity(3, 3, 3).unwrap();
        dest.set_element(7.0, 0, 1).unwrap();
        let complement = Descriptor::new().complement();
        set_matrix_masked(&mut dest, &everywhere, &source, Some(&complement), Phase::Resize)
            .unwrap();
        set_matrix_masked(&mut dest, &everywhere, &source, Some(&complement), Phase::Execute)
            .unwrap();
        assert_eq!(dest.nnz(), 0);
    }

    #[test]
    fn test_masked_execute_without_resize_fails() {
        let a = example();
        let mut c = Matrix::<f64>::with_capacity(3, 3, 9).unwrap();
        c.set_element(7.0, 0, 1).unwrap();

        assert_eq!(
            set_matrix_masked(&mut c, &a, &a, None, Phase::Execute),
            Err(GraphBlasError::NotResized)
        );
        assert_eq!(c.extract_tuples(), (vec![0], vec![1], vec![7.0]));
    }

    #[test]
    fn test_reservation_invalidated_by_source_change() {
        let mut a = example();
        let mut c = Matrix::<f64>::with_capacity(3, 3, 9).unwrap();
        set_matrix_masked(&mut c, &a, &a, None, Phase::Resize).unwrap();

        a.resize(7).unwrap();
        a.set_element(9.0, 1, 0).unwrap();
        assert_eq!(
            set_matrix_masked(&mut c, &a, &a, None, Phase::Execute),
            Err(GraphBlasError::NotResized)
        );
    }

    #[test]
    fn test_reservation_consumed_by_execute() {
        let a = example();
        let mut c = Matrix::<f64>::with_capacity(3, 3, 9).unwrap();
        set_matrix_masked(&mut c, &a, &a, None, Phase::Resize).unwrap();
        set_matrix_masked(&mut c, &a, &a, None, Phase::Execute).unwrap();
        // Truthy entries of `a` only
        assert_eq!(c.nnz(), 4);
        assert_eq!(c.get(1, 1), None);

        assert_eq!(
            set_matrix_masked(&mut c, &a, &a, None, Phase::Execute),
            Err(GraphBlasError::NotResized)
        );
    }

    #[test]
    fn test_descriptor_must_match_reservation() {
        let a = example();
        let mut c = Matrix::<f64>::with_capacity(3, 3, 9).unwrap();
        set_matrix_masked(&mut c, &a, &a, None, Phase::Resize).unwrap();
        assert_eq!(
            set_matrix_masked(
                &mut c,
                &a,
                &a,
                Some(&Descriptor::new().structural()),
                Phase::Execute
            ),
            Err(GraphBlasError::NotResized)
        );
    }

    #[test]
    fn test_set_vector_masked() {
        let mut src = Vector::<i32>::new(5).unwrap();
        src.build_unique(&[0, 1, 2, 3], &[10, 11, 12, 13], IOMode::Sequential)
            .unwrap();
        let mut mask = Vector::<bool>::new(5).unwrap();
        mask.build_unique(&[1, 3, 4], &[true, false, true], IOMode::Sequential)
            .unwrap();
        let mut dest = Vector::<i32>::new(5).unwrap();
        dest.build_unique(&[0, 4], &[-1, -1], IOMode::Sequential)
            .unwrap();

        set_vector_masked(&mut dest, &mask, &src, None, Phase::Resize).unwrap();
        assert_eq!(dest.values(), &[-1, -1]);
        set_vector_masked(&mut dest, &mask, &src, None, Phase::Execute).unwrap();
        // Only 1 is both selected and stored in the source
        assert_eq!(dest.iter().collect::<Vec<_>>(), vec![(1, 11)]);
    }

    #[test]
    fn test_set_vector_errors() {
        let src = Vector::<i32>::new(5).unwrap();
        let mut dest = Vector::<i32>::new(4).unwrap();
        assert_eq!(
            set_vector(&mut dest, &src, Phase::Execute),
            Err(GraphBlasError::DimensionMismatch)
        );

        let mut dest = Vector::<i32>::new(5).unwrap();
        let mask = Vector::<bool>::new(5).unwrap();
        assert_eq!(
            set_vector_masked(
                &mut dest,
                &mask,
                &src,
                Some(&Descriptor::new().transposed()),
                Phase::Resize
            ),
            Err(GraphBlasError::InvalidValue)
        );
    }
}
