// Operations Module
//
// Semiring-parameterized kernels over Matrix and Vector. Every kernel takes a
// `Phase`; outputs are only written during `Phase::Execute`, and only after
// every check has passed.

pub mod apply;
pub mod assign;
pub mod descriptor;
pub mod dot;
pub mod ewise;
pub(crate) mod mask;
pub mod matmul;

// Re-exports
pub use apply::{apply_binary_left_vector, apply_binary_right_vector, apply_vector};
pub use assign::{set_matrix, set_matrix_masked, set_vector, set_vector_masked};
pub use descriptor::Descriptor;
pub use dot::dot;
pub use ewise::{ewadd_vector, ewadd_vector_masked, ewmult_vector, ewmult_vector_masked};
pub use matmul::{mxv, mxv_masked, vxm};
