// Core Layer: Semiring implementation

use crate::core::binary_op::BinaryOp;
use crate::core::monoid::Monoid;
use crate::types::{GraphBLASType, NumericType, TypeCode};

/// Semiring: Defines addition monoid and multiplication operator
///
/// A semiring consists of:
/// - Addition monoid (associative operation + identity element)
/// - Multiplication binary operation with its own identity
/// - Distributive property: a * (b + c) = (a * b) + (a * c)
///
/// Semirings are immutable; cloning one is cheap.
#[derive(Debug, Clone)]
pub struct Semiring<T: GraphBLASType> {
    /// Additive monoid (⊕ and its identity)
    add: Monoid<T>,
    /// Multiplicative operator (⊗)
    mul: BinaryOp<T>,
    /// Identity element for ⊗
    one: T,
    /// Name of semiring
    name: String,
}

impl<T: GraphBLASType> Semiring<T> {
    /// Create a new semiring
    pub fn new(
        add_op: fn(T, T) -> T,
        mul_op: fn(T, T) -> T,
        zero: T,
        one: T,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            add: Monoid::new(add_op, zero, format!("{}.add", name)),
            mul: BinaryOp::new(mul_op, format!("{}.mul", name)),
            one,
            name,
        }
    }

    /// Apply addition operation
    pub fn add(&self, left: T, right: T) -> T {
        self.add.apply(left, right)
    }

    /// Apply multiplication operation
    pub fn multiply(&self, left: T, right: T) -> T {
        self.mul.apply(left, right)
    }

    /// Get zero element (identity of ⊕)
    pub fn zero(&self) -> T {
        self.add.identity()
    }

    /// Get one element (identity of ⊗)
    pub fn one(&self) -> T {
        self.one
    }

    /// Get the additive monoid
    pub fn additive(&self) -> &Monoid<T> {
        &self.add
    }

    /// Get the multiplicative operator
    pub fn multiplicative(&self) -> &BinaryOp<T> {
        &self.mul
    }

    /// Get semiring name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value domain of the semiring
    pub fn domain(&self) -> TypeCode {
        T::TYPE_CODE
    }
}

// Common semirings over every numeric type
impl<T: NumericType> Semiring<T> {
    /// Plus-times semiring (standard arithmetic): (+, *, 0, 1)
    pub fn plus_times() -> Self {
        Self::new(T::plus, T::times, T::ZERO, T::ONE, "plus_times")
    }

    /// Min-plus semiring (tropical): (min, +, ∞, 0)
    pub fn min_plus() -> Self {
        Self::new(T::lesser, T::plus, T::MAX_VALUE, T::ZERO, "min_plus")
    }

    /// Max-plus semiring: (max, +, -∞, 0)
    pub fn max_plus() -> Self {
        Self::new(T::greater, T::plus, T::MIN_VALUE, T::ZERO, "max_plus")
    }

    /// Max-times semiring: (max, *, -∞, 1)
    pub fn max_times() -> Self {
        Self::new(T::greater, T::times, T::MIN_VALUE, T::ONE, "max_times")
    }

    /// Plus-min semiring: (+, min, 0, ∞)
    pub fn plus_min() -> Self {
        Self::new(T::plus, T::lesser, T::ZERO, T::MAX_VALUE, "plus_min")
    }
}

impl Semiring<bool> {
    /// Logical-or / logical-and semiring: (∨, ∧, false, true)
    pub fn lor_land() -> Self {
        Self::new(|a, b| a || b, |a, b| a && b, false, true, "lor_land")
    }

    /// Logical-and / logical-or semiring: (∧, ∨, true, false)
    pub fn land_lor() -> Self {
        Self::new(|a, b| a && b, |a, b| a || b, true, false, "land_lor")
    }
}
