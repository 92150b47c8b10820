// SemiSparse: sparse matrices and vectors over user-selectable semirings
//
// Architecture:
// - types: element types and their arithmetic
// - core: Matrix/Vector containers, semirings, registry, errors
// - ops: mxv, element-wise, dot, apply and masked assignment kernels
// - algorithms: matrix factories and the conjugate gradient solver
// - exec: launcher that runs entry functions in a worker pool
// - parallel: feature-gated worker helpers used by the kernels

pub mod algorithms;
pub mod core;
pub mod exec;
pub mod ops;
pub mod parallel;
pub mod types;

// Re-export commonly used items for convenience
pub use crate::core::{
    GraphBlasError, IOMode, Matrix, Phase, Result, Semiring, Status, Vector,
};
pub use crate::exec::{LaunchMode, Launcher};
pub use crate::ops::Descriptor;
pub use crate::types::{FloatType, GraphBLASType, NumericType, TypeCode};
