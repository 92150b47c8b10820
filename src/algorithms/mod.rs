// Algorithms built on top of the operation kernels
//
// - matrices: structured matrix factories (eye, identity)
// - cg: conjugate gradient solver

pub mod cg;
pub mod matrices;

pub use cg::{conjugate_gradient, CgConfig, CgSolution};
pub use matrices::{eye, identity};
