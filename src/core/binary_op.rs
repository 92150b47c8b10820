// Core Layer: BinaryOp implementation

use crate::types::GraphBLASType;

/// Binary operator: z = f(x, y)
#[derive(Clone)]
pub struct BinaryOp<T: GraphBLASType> {
    /// Function pointer: (x, y) -> z
    op: fn(T, T) -> T,
    /// Name of operation
    name: String,
}

impl<T: GraphBLASType> BinaryOp<T> {
    /// Create a new binary operator
    pub fn new(op: fn(T, T) -> T, name: impl Into<String>) -> Self {
        Self {
            op,
            name: name.into(),
        }
    }

    /// Apply the operation
    pub fn apply(&self, x: T, y: T) -> T {
        (self.op)(x, y)
    }

    /// Get operator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: GraphBLASType> std::fmt::Debug for BinaryOp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryOp").field("name", &self.name).finish()
    }
}
