// Core Layer: Monoid implementation

use crate::types::GraphBLASType;

/// Monoid: Associative binary operation with identity element
///
/// A monoid consists of:
/// - Binary operation that is associative: (a ⊕ b) ⊕ c = a ⊕ (b ⊕ c)
/// - Identity element: a ⊕ identity = identity ⊕ a = a
#[derive(Clone)]
pub struct Monoid<T: GraphBLASType> {
    /// Binary operation function pointer
    op: fn(T, T) -> T,
    /// Identity element
    identity: T,
    /// Name of monoid
    name: String,
}

impl<T: GraphBLASType> Monoid<T> {
    /// Create a new monoid
    pub fn new(op: fn(T, T) -> T, identity: T, name: impl Into<String>) -> Self {
        Self {
            op,
            identity,
            name: name.into(),
        }
    }

    /// Apply the monoid operation
    pub fn apply(&self, a: T, b: T) -> T {
        (self.op)(a, b)
    }

    /// Get identity element
    pub fn identity(&self) -> T {
        self.identity
    }

    /// Get monoid name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fold a sequence, starting from the identity
    pub fn reduce<I: IntoIterator<Item = T>>(&self, items: I) -> T {
        items
            .into_iter()
            .fold(self.identity, |acc, x| (self.op)(acc, x))
    }
}

impl<T: GraphBLASType> std::fmt::Debug for Monoid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monoid")
            .field("name", &self.name)
            .field("identity", &self.identity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_empty_is_identity() {
        let max = Monoid::new(|a: i32, b: i32| a.max(b), i32::MIN, "max");
        assert_eq!(max.reduce(Vec::new()), i32::MIN);
        assert_eq!(max.reduce(vec![3, -1, 7]), 7);
        assert_eq!(max.name(), "max");
    }
}
