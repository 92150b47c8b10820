// Element-wise Operations
//
// Operations:
// - ewmult_vector: w = u ⊗ v over the intersection of stored indices
// - ewadd_vector: w = u ⊕ v over the union of stored indices
//
// Both have masked variants. Inputs and output share one size.

use crate::core::container::Phase;
use crate::core::error::{GraphBlasError, Result};
use crate::core::semiring::Semiring;
use crate::core::vector::Vector;
use crate::ops::descriptor::{resolve, Descriptor, Kernel};
use crate::ops::mask::{write_vector, VectorMask};
use crate::parallel;
use crate::types::GraphBLASType;

fn check_sizes<T: GraphBLASType>(w: &Vector<T>, u: &Vector<T>, v: &Vector<T>) -> Result<()> {
    if u.size() != v.size() || w.size() != u.size() {
        log::debug!(
            "element-wise size mismatch: w={}, u={}, v={}",
            w.size(),
            u.size(),
            v.size()
        );
        return Err(GraphBlasError::DimensionMismatch);
    }
    Ok(())
}

/// `u[i] ⊗ v[i]` for every index stored in both, in index order
pub(crate) fn intersect<T: GraphBLASType>(
    u: &Vector<T>,
    v: &Vector<T>,
    op: impl Fn(T, T) -> T + Sync,
) -> Vec<(usize, T)> {
    // Look up each entry of the smaller operand in the larger one
    let (small, large, swapped) = if u.nnz() <= v.nnz() {
        (u, v, false)
    } else {
        (v, u, true)
    };
    let (s_idx, s_val) = (small.indices(), small.values());
    let (l_idx, l_val) = (large.indices(), large.values());

    let hits = parallel::map_indexed(s_idx.len(), |k| {
        let i = s_idx[k];
        l_idx.binary_search(&i).ok().map(|p| {
            let value = if swapped {
                op(l_val[p], s_val[k])
            } else {
                op(s_val[k], l_val[p])
            };
            (i, value)
        })
    });
    hits.into_iter().flatten().collect()
}

/// `u[i] ⊕ v[i]` where both store `i`, otherwise whichever entry exists
fn union<T: GraphBLASType>(u: &Vector<T>, v: &Vector<T>, op: impl Fn(T, T) -> T) -> Vec<(usize, T)> {
    let (u_idx, u_val) = (u.indices(), u.values());
    let (v_idx, v_val) = (v.indices(), v.values());
    let mut out = Vec::with_capacity(u_idx.len() + v_idx.len());
    let (mut a, mut b) = (0, 0);

    while a < u_idx.len() && b < v_idx.len() {
        if u_idx[a] < v_idx[b] {
            out.push((u_idx[a], u_val[a]));
            a += 1;
        } else if v_idx[b] < u_idx[a] {
            out.push((v_idx[b], v_val[b]));
            b += 1;
        } else {
            out.push((u_idx[a], op(u_val[a], v_val[b])));
            a += 1;
            b += 1;
        }
    }
    out.extend(u_idx[a..].iter().copied().zip(u_val[a..].iter().copied()));
    out.extend(v_idx[b..].iter().copied().zip(v_val[b..].iter().copied()));
    out
}

#[allow(clippy::too_many_arguments)]
fn ewise_impl<T, M, K>(
    name: &str,
    w: &mut Vector<T>,
    mask: Option<&Vector<M>>,
    u: &Vector<T>,
    v: &Vector<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
    kernel: K,
) -> Result<()>
where
    T: GraphBLASType,
    M: GraphBLASType,
    K: FnOnce(&Vector<T>, &Vector<T>) -> Vec<(usize, T)>,
{
    let desc = resolve(desc, Kernel::ElementWise)?;
    check_sizes(w, u, v)?;
    let mask = VectorMask::checked(mask, w.size(), &desc)?;

    log::debug!(
        "{}: size={}, u nnz={}, v nnz={}, phase={:?}",
        name,
        w.size(),
        u.nnz(),
        v.nnz(),
        phase
    );

    let computed = kernel(u, v);
    let (indices, values) = write_vector(w, computed, mask.as_ref(), desc.output_replace);
    w.commit(indices, values, phase)
}

/// Element-wise multiplication (intersection semantics): w = u ⊗ v
///
/// Only indices stored in both `u` and `v` appear in `w`.
pub fn ewmult_vector<T: GraphBLASType>(
    w: &mut Vector<T>,
    u: &Vector<T>,
    v: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    ewise_impl::<T, bool, _>("ewmult", w, None, u, v, desc, phase, |u, v| {
        intersect(u, v, |a, b| semiring.multiply(a, b))
    })
}

/// Masked element-wise multiplication: w<mask> = u ⊗ v
pub fn ewmult_vector_masked<T: GraphBLASType, M: GraphBLASType>(
    w: &mut Vector<T>,
    mask: &Vector<M>,
    u: &Vector<T>,
    v: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    ewise_impl("ewmult", w, Some(mask), u, v, desc, phase, |u, v| {
        intersect(u, v, |a, b| semiring.multiply(a, b))
    })
}

/// Element-wise addition (union semantics): w = u ⊕ v
pub fn ewadd_vector<T: GraphBLASType>(
    w: &mut Vector<T>,
    u: &Vector<T>,
    v: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    ewise_impl::<T, bool, _>("ewadd", w, None, u, v, desc, phase, |u, v| {
        union(u, v, |a, b| semiring.add(a, b))
    })
}

/// Masked element-wise addition: w<mask> = u ⊕ v
pub fn ewadd_vector_masked<T: GraphBLASType, M: GraphBLASType>(
    w: &mut Vector<T>,
    mask: &Vector<M>,
    u: &Vector<T>,
    v: &Vector<T>,
    semiring: &Semiring<T>,
    desc: Option<&Descriptor>,
    phase: Phase,
) -> Result<()> {
    ewise_impl("ewadd", w, Some(mask), u, v, desc, phase, |u, v| {
        union(u, v, |a, b| semiring.add(a, b))
    })
}
