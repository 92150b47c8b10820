// Dot Product
//
// s = ⊕_i (x[i] ⊗ y[i]) over the indices stored in both vectors.
// Products are formed on the worker pool; the fold runs in index order
// starting from the ⊕ identity.

use crate::core::error::{GraphBlasError, Result};
use crate::core::semiring::Semiring;
use crate::core::vector::Vector;
use crate::ops::ewise::intersect;
use crate::types::GraphBLASType;

/// Dot product of two vectors of equal size
///
/// Returns the ⊕ identity when no index is stored in both.
pub fn dot<T: GraphBLASType>(x: &Vector<T>, y: &Vector<T>, semiring: &Semiring<T>) -> Result<T> {
    if x.size() != y.size() {
        log::debug!("dot size mismatch: {} vs {}", x.size(), y.size());
        return Err(GraphBlasError::DimensionMismatch);
    }

    let products = intersect(x, y, |a, b| semiring.multiply(a, b));
    log::debug!(
        "dot: size={}, {} overlapping entries, semiring={}",
        x.size(),
        products.len(),
        semiring.name()
    );

    Ok(semiring
        .additive()
        .reduce(products.into_iter().map(|(_, p)| p)))
}
