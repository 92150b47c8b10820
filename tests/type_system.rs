// Integration tests for the type system

use semisparse::core::registry;
use semisparse::types::{FloatType, GraphBLASType, NumericType, TypeCode};
use semisparse::{GraphBlasError, Matrix, Semiring, Vector};

#[test]
fn test_builtin_type_codes() {
    assert_eq!(bool::TYPE_CODE, TypeCode::Bool);
    assert_eq!(i8::TYPE_CODE, TypeCode::Int8);
    assert_eq!(i16::TYPE_CODE, TypeCode::Int16);
    assert_eq!(i32::TYPE_CODE, TypeCode::Int32);
    assert_eq!(i64::TYPE_CODE, TypeCode::Int64);
    assert_eq!(u8::TYPE_CODE, TypeCode::Uint8);
    assert_eq!(u16::TYPE_CODE, TypeCode::Uint16);
    assert_eq!(u32::TYPE_CODE, TypeCode::Uint32);
    assert_eq!(u64::TYPE_CODE, TypeCode::Uint64);
    assert_eq!(f32::TYPE_CODE, TypeCode::Fp32);
    assert_eq!(f64::TYPE_CODE, TypeCode::Fp64);
}

#[test]
fn test_type_names() {
    assert_eq!(TypeCode::Bool.name(), "bool");
    assert_eq!(TypeCode::Int32.name(), "int32");
    assert_eq!(TypeCode::Int64.name(), "int64");
    assert_eq!(TypeCode::Fp32.name(), "float32");
    assert_eq!(TypeCode::Fp64.name(), "float64");
}

#[test]
fn test_container_type_codes() {
    let v = Vector::<u16>::new(4).unwrap();
    assert_eq!(v.type_code(), TypeCode::Uint16);
    let m = Matrix::<f32>::new(2, 2).unwrap();
    assert_eq!(m.type_code(), TypeCode::Fp32);
}

#[test]
fn test_semiring_domain_follows_element_type() {
    assert_eq!(Semiring::<i8>::plus_times().domain(), TypeCode::Int8);
    assert_eq!(Semiring::lor_land().domain(), TypeCode::Bool);

    for name in ["plus_times", "min_plus", "max_plus", "max_times", "plus_min"] {
        assert_eq!(registry::semiring::<u64>(name).unwrap().domain(), TypeCode::Uint64);
        assert_eq!(
            registry::semiring::<bool>(name).unwrap_err(),
            GraphBlasError::DomainMismatch
        );
    }
}

#[test]
fn test_numeric_identities() {
    assert_eq!(<u8 as NumericType>::ZERO, 0);
    assert_eq!(<i16 as NumericType>::ONE, 1);
    assert_eq!(<f32 as NumericType>::MAX_VALUE, f32::INFINITY);
    assert_eq!(<i64 as NumericType>::MIN_VALUE, i64::MIN);
}

#[test]
fn test_float_helpers() {
    assert_eq!(FloatType::sqrt(9.0f64), 3.0);
    assert_eq!(FloatType::divide(1.0f32, 4.0), 0.25);
    assert_eq!(FloatType::negate(2.0f64), -2.0);
    assert_eq!(<f32 as FloatType>::from_f64(0.5), 0.5f32);
    assert_eq!(FloatType::to_f64(0.5f32), 0.5);
}
