// Mask evaluation and masked output writes
//
// A mask position is set when the mask stores an entry there and, unless the
// descriptor asks for structure only, that entry is truthy. Complementing the
// mask flips the test. Masked mxv, eWise and apply write through
// `write_vector`, which applies the rule C<M> = T:
// - allowed positions take T's entry, or lose C's entry when T has none
// - other positions keep C's entry unless output_replace is set
// Masked set does not merge; it keeps only the selected source entries.

use crate::core::error::{GraphBlasError, Result};
use crate::core::matrix::Matrix;
use crate::core::vector::Vector;
use crate::ops::descriptor::Descriptor;
use crate::types::GraphBLASType;

/// Set positions of a vector mask
#[derive(Debug, Clone)]
pub(crate) struct VectorMask {
    set: Vec<usize>,
    complement: bool,
}

impl VectorMask {
    pub fn new<M: GraphBLASType>(mask: &Vector<M>, desc: &Descriptor) -> Self {
        let set = mask
            .iter()
            .filter(|&(_, v)| desc.mask_structure || v.truthy())
            .map(|(i, _)| i)
            .collect();
        Self {
            set,
            complement: desc.mask_complement,
        }
    }

    /// Build the mask after checking it addresses `size` positions
    pub fn checked<M: GraphBLASType>(
        mask: Option<&Vector<M>>,
        size: usize,
        desc: &Descriptor,
    ) -> Result<Option<Self>> {
        match mask {
            Some(m) if m.size() != size => Err(GraphBlasError::DimensionMismatch),
            Some(m) => Ok(Some(Self::new(m, desc))),
            None => Ok(None),
        }
    }

    pub fn allows(&self, i: usize) -> bool {
        self.set.binary_search(&i).is_ok() != self.complement
    }
}

/// Set positions of a matrix mask, kept in CSR form
#[derive(Debug, Clone)]
pub(crate) struct MatrixMask {
    row_ptrs: Vec<usize>,
    cols: Vec<usize>,
    complement: bool,
}

impl MatrixMask {
    pub fn new<M: GraphBLASType>(mask: &Matrix<M>, desc: &Descriptor) -> Self {
        let mut row_ptrs = Vec::with_capacity(mask.nrows() + 1);
        let mut cols = Vec::new();
        row_ptrs.push(0);
        for i in 0..mask.nrows() {
            let (mcols, mvals) = mask.row(i);
            cols.extend(
                mcols
                    .iter()
                    .zip(mvals)
                    .filter(|&(_, v)| desc.mask_structure || v.truthy())
                    .map(|(&j, _)| j),
            );
            row_ptrs.push(cols.len());
        }
        Self {
            row_ptrs,
            cols,
            complement: desc.mask_complement,
        }
    }

    pub fn allows(&self, i: usize, j: usize) -> bool {
        let row = &self.cols[self.row_ptrs[i]..self.row_ptrs[i + 1]];
        row.binary_search(&j).is_ok() != self.complement
    }
}

/// Combine the current entries of an output with a computed result
///
/// Both inputs are sorted by index; so is the output.
fn merge_masked<T: Copy, F: Fn(usize) -> bool>(
    current_indices: &[usize],
    current_values: &[T],
    computed: Vec<(usize, T)>,
    allows: F,
    replace: bool,
) -> Vec<(usize, T)> {
    let mut out = Vec::with_capacity(computed.len().max(current_indices.len()));
    let (mut c, mut k) = (0, 0);

    while c < current_indices.len() || k < computed.len() {
        let ci = current_indices.get(c).copied().unwrap_or(usize::MAX);
        let ti = computed.get(k).map_or(usize::MAX, |p| p.0);

        if ci < ti || k == computed.len() {
            // Only the output holds this position
            if !replace && !allows(ci) {
                out.push((ci, current_values[c]));
            }
            c += 1;
        } else if ti < ci || c == current_indices.len() {
            // Only the result holds this position
            if allows(ti) {
                out.push(computed[k]);
            }
            k += 1;
        } else {
            if allows(ci) {
                out.push(computed[k]);
            } else if !replace {
                out.push((ci, current_values[c]));
            }
            c += 1;
            k += 1;
        }
    }
    out
}

/// Write a computed vector result into `current` under an optional mask
pub(crate) fn write_vector<T: GraphBLASType>(
    current: &Vector<T>,
    computed: Vec<(usize, T)>,
    mask: Option<&VectorMask>,
    replace: bool,
) -> (Vec<usize>, Vec<T>) {
    let merged = match mask {
        None => computed,
        Some(m) => merge_masked(
            current.indices(),
            current.values(),
            computed,
            |i| m.allows(i),
            replace,
        ),
    };
    merged.into_iter().unzip()
}
