// Apply Operations
//
// Operations:
// - apply_vector: w = f(u), entry by entry
// - apply_binary_left_vector: w = op(s, u)
// - apply_binary_right_vector: w = op(u, s)
//
// The output pattern equals the input pattern.

use crate::core::binary_op::BinaryOp;
use crate::core::container::Phase;
use crate::core::error::{GraphBlasError, Result};
use crate::core::vector::Vector;
use crate::ops::descriptor::{resolve, Descriptor, Kernel};
use crate::ops::mask::write_vector;
use crate::parallel;
use crate::types::GraphBLASType;

/// Apply a unary function to every stored entry: w = f(u)
pub fn apply_vector<T, F>(
    w: &mut Vector<T>,
    u: &Vector<T>,
    f: F,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()>
where
    T: GraphBLASType,
    F: Fn(T) -> T + Sync,
{
    let desc = resolve(desc, Kernel::Apply)?;
    if w.size() != u.size() {
        return Err(GraphBlasError::DimensionMismatch);
    }
    log::debug!("apply: size={}, nnz={}, phase={:?}", u.size(), u.nnz(), phase);

    let (indices, values) = (u.indices(), u.values());
    let computed = parallel::map_indexed(indices.len(), |k| (indices[k], f(values[k])));
    let (indices, values) = write_vector(w, computed, None, desc.output_replace);
    w.commit(indices, values, phase)
}

/// Bind a scalar as the left operand: w = op(s, u)
pub fn apply_binary_left_vector<T: GraphBLASType>(
    w: &mut Vector<T>,
    op: &BinaryOp<T>,
    scalar: T,
    u: &Vector<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    apply_vector(w, u, |x| op.apply(scalar, x), desc, phase)
}

/// Bind a scalar as the right operand: w = op(u, s)
pub fn apply_binary_right_vector<T: GraphBLASType>(
    w: &mut Vector<T>,
    u: &Vector<T>,
    op: &BinaryOp<T>,
    scalar: T,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    apply_vector(w, u, |x| op.apply(x, scalar), desc, phase)
}
