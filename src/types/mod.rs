// Type System: element types that can be stored in sparse containers
//
// Containers are generic over their element type. Each element type carries:
// 1. TypeCode - runtime tag, used by the semiring registry for domain checks
// 2. GraphBLASType - the trait every stored element implements
// 3. NumericType - arithmetic needed by the built-in semirings
// 4. FloatType - the extra operations iterative solvers rely on

use std::fmt::Debug;

/// Runtime type code enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCode {
    /// Boolean type
    Bool,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 8-bit integer
    Uint8,
    /// Unsigned 16-bit integer
    Uint16,
    /// Unsigned 32-bit integer
    Uint32,
    /// Unsigned 64-bit integer
    Uint64,
    /// 32-bit floating point
    Fp32,
    /// 64-bit floating point
    Fp64,
}

impl TypeCode {
    /// Get human-readable name for this type code
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Bool => "bool",
            TypeCode::Int8 => "int8",
            TypeCode::Int16 => "int16",
            TypeCode::Int32 => "int32",
            TypeCode::Int64 => "int64",
            TypeCode::Uint8 => "uint8",
            TypeCode::Uint16 => "uint16",
            TypeCode::Uint32 => "uint32",
            TypeCode::Uint64 => "uint64",
            TypeCode::Fp32 => "float32",
            TypeCode::Fp64 => "float64",
        }
    }
}

/// Trait for types that can be stored in a sparse container
///
/// The `Send + Sync` bounds let kernels read containers from worker threads.
pub trait GraphBLASType: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// The runtime type code for this type
    const TYPE_CODE: TypeCode;

    /// Interpret a stored value as a mask bit
    fn truthy(self) -> bool;
}

/// Element types with the arithmetic used by the built-in semirings
///
/// `MIN_VALUE` and `MAX_VALUE` are the identities of `greater` and `lesser`
/// respectively; for floats they are the infinities.
pub trait NumericType: GraphBLASType {
    const ZERO: Self;
    const ONE: Self;
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;

    fn plus(a: Self, b: Self) -> Self;
    fn times(a: Self, b: Self) -> Self;
    fn lesser(a: Self, b: Self) -> Self;
    fn greater(a: Self, b: Self) -> Self;
}

/// Floating point element types
pub trait FloatType: NumericType {
    fn sqrt(self) -> Self;
    fn divide(self, other: Self) -> Self;
    fn negate(self) -> Self;
    fn abs(self) -> Self;
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl GraphBLASType for bool {
    const TYPE_CODE: TypeCode = TypeCode::Bool;

    fn truthy(self) -> bool {
        self
    }
}

macro_rules! impl_integer {
    ($($ty:ty => $code:ident),* $(,)?) => {
        $(
            impl GraphBLASType for $ty {
                const TYPE_CODE: TypeCode = TypeCode::$code;

                fn truthy(self) -> bool {
                    self != 0
                }
            }

            impl NumericType for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN_VALUE: Self = <$ty>::MIN;
                const MAX_VALUE: Self = <$ty>::MAX;

                // Integer semirings saturate instead of wrapping so that the
                // infinities of min-plus and max-plus stay absorbing.
                fn plus(a: Self, b: Self) -> Self {
                    a.saturating_add(b)
                }

                fn times(a: Self, b: Self) -> Self {
                    a.saturating_mul(b)
                }

                fn lesser(a: Self, b: Self) -> Self {
                    a.min(b)
                }

                fn greater(a: Self, b: Self) -> Self {
                    a.max(b)
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ident => $code:ident),* $(,)?) => {
        $(
            impl GraphBLASType for $ty {
                const TYPE_CODE: TypeCode = TypeCode::$code;

                fn truthy(self) -> bool {
                    self != 0.0
                }
            }

            impl NumericType for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const MIN_VALUE: Self = $ty::NEG_INFINITY;
                const MAX_VALUE: Self = $ty::INFINITY;

                fn plus(a: Self, b: Self) -> Self {
                    a + b
                }

                fn times(a: Self, b: Self) -> Self {
                    a * b
                }

                fn lesser(a: Self, b: Self) -> Self {
                    a.min(b)
                }

                fn greater(a: Self, b: Self) -> Self {
                    a.max(b)
                }
            }

            impl FloatType for $ty {
                fn sqrt(self) -> Self {
                    $ty::sqrt(self)
                }

                fn divide(self, other: Self) -> Self {
                    self / other
                }

                fn negate(self) -> Self {
                    -self
                }

                fn abs(self) -> Self {
                    $ty::abs(self)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_integer!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
);

impl_float!(f32 => Fp32, f64 => Fp64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_trait() {
        assert_eq!(i32::TYPE_CODE, TypeCode::Int32);
        assert_eq!(f64::TYPE_CODE, TypeCode::Fp64);
        assert_eq!(bool::TYPE_CODE, TypeCode::Bool);
    }

    #[test]
    fn test_truthy() {
        assert!(!0.0f64.truthy());
        assert!(2.5f64.truthy());
        assert!(!0u8.truthy());
        assert!((-3i32).truthy());
        assert!(true.truthy());
        assert!(!false.truthy());
    }

    #[test]
    fn test_integer_arithmetic_saturates() {
        assert_eq!(i32::plus(i32::MAX_VALUE, 5), i32::MAX);
        assert_eq!(u8::times(200, 2), u8::MAX);
        assert_eq!(i64::lesser(3, -4), -4);
    }

    #[test]
    fn test_float_identities() {
        assert_eq!(f64::lesser(f64::MAX_VALUE, 7.0), 7.0);
        assert_eq!(f64::greater(f64::MIN_VALUE, -7.0), -7.0);
    }
}
