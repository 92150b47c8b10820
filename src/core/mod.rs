// Core Layer: Containers, algebra and error reporting
//
// Sparse containers, the semiring registry and the error taxonomy shared by
// every operation.

pub mod binary_op;
pub mod container;
pub mod error;
pub mod iter;
pub mod matrix;
pub mod monoid;
pub mod registry;
pub mod semiring;
pub mod source;
pub mod status;
pub mod vector;

// Re-export commonly used types
pub use binary_op::BinaryOp;
pub use container::{IOMode, Phase};
pub use error::{GraphBlasError, Result};
pub use iter::{MatrixIter, VectorIter};
pub use matrix::Matrix;
pub use monoid::Monoid;
pub use semiring::Semiring;
pub use source::{CooTriples, TripleSource};
pub use status::Status;
pub use vector::Vector;
