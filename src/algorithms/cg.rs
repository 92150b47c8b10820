//! CG (Conjugate Gradient) solver
//!
//! Solves `A x = b` for symmetric positive definite `A` using only the
//! operation kernels under the plus-times semiring: `mxv` for the operator,
//! `dot` for inner products and `ewadd`/`apply` for vector updates.

use crate::core::container::Phase;
use crate::core::error::{GraphBlasError, Result};
use crate::core::matrix::Matrix;
use crate::core::semiring::Semiring;
use crate::core::vector::Vector;
use crate::ops::{apply_vector, dot, ewadd_vector, mxv, set_vector};
use crate::types::FloatType;

/// CG solver configuration
#[derive(Debug, Clone)]
pub struct CgConfig<T> {
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Relative residual below which the solve counts as converged
    pub tolerance: T,
    /// Log progress every N iterations (0 = no output)
    pub print_interval: usize,
}

impl<T: FloatType> Default for CgConfig<T> {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: T::from_f64(1e-6),
            print_interval: 0,
        }
    }
}

/// CG solver result; the solution itself is written to `x`
#[derive(Debug, Clone, PartialEq)]
pub struct CgSolution<T> {
    /// Number of iterations
    pub iterations: usize,
    /// Final relative residual ||b - A x|| / ||b||
    pub residual: T,
    /// Whether convergence was achieved
    pub converged: bool,
}

/// Scratch vectors reused across iterations
struct Workspace<T: FloatType> {
    semiring: Semiring<T>,
    scaled: Vector<T>,
    sum: Vector<T>,
}

impl<T: FloatType> Workspace<T> {
    fn new(n: usize) -> Result<Self> {
        Ok(Self {
            semiring: Semiring::plus_times(),
            scaled: Vector::new(n)?,
            sum: Vector::new(n)?,
        })
    }

    /// y = alpha * x + y
    fn axpy(&mut self, alpha: T, x: &Vector<T>, y: &mut Vector<T>) -> Result<()> {
        apply_vector(&mut self.scaled, x, |v| T::times(alpha, v), None, Phase::Execute)?;
        ewadd_vector(&mut self.sum, &self.scaled, y, &self.semiring, None, Phase::Execute)?;
        std::mem::swap(y, &mut self.sum);
        Ok(())
    }

    /// y = x + beta * y
    fn xpby(&mut self, x: &Vector<T>, beta: T, y: &mut Vector<T>) -> Result<()> {
        apply_vector(&mut self.scaled, y, |v| T::times(beta, v), None, Phase::Execute)?;
        ewadd_vector(&mut self.sum, x, &self.scaled, &self.semiring, None, Phase::Execute)?;
        std::mem::swap(y, &mut self.sum);
        Ok(())
    }

    fn dot(&self, x: &Vector<T>, y: &Vector<T>) -> Result<T> {
        dot(x, y, &self.semiring)
    }

    fn norm(&self, x: &Vector<T>) -> Result<T> {
        Ok(self.dot(x, x)?.sqrt())
    }
}

/// Solve `A x = b` with the Conjugate Gradient method
///
/// `x` holds the initial guess on entry (absent entries count as zero) and the
/// approximate solution on return. Only correct for symmetric positive
/// definite `A`.
pub fn conjugate_gradient<T: FloatType>(
    x: &mut Vector<T>,
    a: &Matrix<T>,
    b: &Vector<T>,
    config: &CgConfig<T>,
) -> Result<CgSolution<T>> {
    let n = b.size();
    if a.nrows() != n || a.ncols() != n || x.size() != n {
        log::debug!(
            "CG shape mismatch: A is {}x{}, x has {}, b has {}",
            a.nrows(),
            a.ncols(),
            x.size(),
            n
        );
        return Err(GraphBlasError::DimensionMismatch);
    }

    let mut ws = Workspace::new(n)?;
    let b_norm = ws.norm(b)?;
    if b_norm.to_f64() < 1e-15 {
        x.clear();
        return Ok(CgSolution {
            iterations: 0,
            residual: T::ZERO,
            converged: true,
        });
    }

    // Every vector in the rotation must hold n entries
    if x.capacity() < n {
        x.resize(n)?;
    }

    // r = b - A x
    let mut ax = Vector::new(n)?;
    mxv(&mut ax, a, x, &ws.semiring, None, Phase::Execute)?;
    let mut r = Vector::new(n)?;
    set_vector(&mut r, b, Phase::Execute)?;
    ws.axpy(T::ONE.negate(), &ax, &mut r)?;

    let mut p = r.clone();
    let mut q = Vector::new(n)?;
    let mut rho = ws.dot(&r, &r)?;

    for iter in 0..config.max_iterations {
        // q = A p
        mxv(&mut q, a, &p, &ws.semiring, None, Phase::Execute)?;

        let pq = ws.dot(&p, &q)?;
        if pq.abs().to_f64() < 1e-30 {
            return Ok(CgSolution {
                iterations: iter,
                residual: ws.norm(&r)?.divide(b_norm),
                converged: false,
            });
        }
        let alpha = rho.divide(pq);

        // x = x + alpha p, r = r - alpha q
        ws.axpy(alpha, &p, x)?;
        ws.axpy(alpha.negate(), &q, &mut r)?;

        let rho_new = ws.dot(&r, &r)?;
        let rel_residual = rho_new.sqrt().divide(b_norm);

        if config.print_interval > 0 && (iter + 1) % config.print_interval == 0 {
            log::info!(
                "CG iteration {}: relative residual = {:.6e}",
                iter + 1,
                rel_residual.to_f64()
            );
        }

        if rel_residual.to_f64() < config.tolerance.to_f64() {
            return Ok(CgSolution {
                iterations: iter + 1,
                residual: rel_residual,
                converged: true,
            });
        }

        let beta = rho_new.divide(rho);
        rho = rho_new;

        // p = r + beta p
        ws.xpby(&r, beta, &mut p)?;
    }

    Ok(CgSolution {
        iterations: config.max_iterations,
        residual: ws.norm(&r)?.divide(b_norm),
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::matrices::identity;
    use crate::core::container::IOMode;

    fn spd_2x2() -> Matrix<f64> {
        let mut a = Matrix::with_capacity(2, 2, 4).unwrap();
        a.build_unique(&[0, 0, 1, 1], &[0, 1, 0, 1], &[4.0, 1.0, 1.0, 3.0], IOMode::Sequential)
            .unwrap();
        a
    }

    #[test]
    fn test_cg_spd() {
        let a = spd_2x2();
        let b = Vector::from_dense(&[1.0, 2.0]).unwrap();
        let mut x = Vector::new(2).unwrap();
        let config = CgConfig {
            max_iterations: 100,
            tolerance: 1e-10,
            print_interval: 0,
        };

        let solution = conjugate_gradient(&mut x, &a, &b, &config).unwrap();
        assert!(solution.converged, "CG should converge for SPD matrix");
        assert!(solution.iterations <= 2);

        // Exact solution is [1/11, 7/11]
        assert!((x.get(0).unwrap() - 1.0 / 11.0).abs() < 1e-8);
        assert!((x.get(1).unwrap() - 7.0 / 11.0).abs() < 1e-8);
    }

    #[test]
    fn test_cg_identity() {
        let a = identity::<f64>(5).unwrap();
        let b = Vector::from_dense(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mut x = Vector::new(5).unwrap();

        let solution = conjugate_gradient(&mut x, &a, &b, &CgConfig::default()).unwrap();
        assert!(solution.converged);
        assert_eq!(solution.iterations, 1);
        assert_eq!(x.values(), b.values());
    }

    #[test]
    fn test_cg_zero_rhs() {
        let a = spd_2x2();
        let b = Vector::<f64>::new(2).unwrap();
        let mut x = Vector::from_dense(&[3.0, 4.0]).unwrap();

        let solution = conjugate_gradient(&mut x, &a, &b, &CgConfig::default()).unwrap();
        assert!(solution.converged);
        assert_eq!(solution.iterations, 0);
        assert_eq!(x.nnz(), 0);
    }

    #[test]
    fn test_cg_initial_guess_is_used() {
        let a = spd_2x2();
        let b = Vector::from_dense(&[1.0, 2.0]).unwrap();
        let mut x = Vector::from_dense(&[1.0 / 11.0, 7.0 / 11.0]).unwrap();
        let config = CgConfig {
            max_iterations: 0,
            tolerance: 1e-10,
            print_interval: 0,
        };

        let solution = conjugate_gradient(&mut x, &a, &b, &config).unwrap();
        assert!(!solution.converged);
        assert!(solution.residual < 1e-12);
    }

    #[test]
    fn test_cg_dimension_mismatch() {
        let a = spd_2x2();
        let b = Vector::from_dense(&[1.0, 2.0, 3.0]).unwrap();
        let mut x = Vector::new(3).unwrap();
        assert_eq!(
            conjugate_gradient(&mut x, &a, &b, &CgConfig::default()),
            Err(GraphBlasError::DimensionMismatch)
        );
    }
}
