//! Proptest strategies for generating types.
//!
//! Gated behind the `proptest` feature; consumed by the IR property tests.

use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::{Type, TypeCode};

/// Any type code, including `Handle`.
pub fn arb_code() -> impl Strategy<Value = TypeCode> {
    proptest::sample::select(TypeCode::iter().collect::<Vec<_>>())
}

/// Scalar signed integer type.
pub fn arb_int_scalar() -> impl Strategy<Value = Type> {
    proptest::sample::select(vec![Type::INT8, Type::INT16, Type::INT32, Type::INT64])
}

/// Scalar unsigned integer type.
pub fn arb_uint_scalar() -> impl Strategy<Value = Type> {
    proptest::sample::select(vec![Type::UINT8, Type::UINT16, Type::UINT32, Type::UINT64])
}

/// Scalar float type.
pub fn arb_float_scalar() -> impl Strategy<Value = Type> {
    proptest::sample::select(vec![Type::FLOAT16, Type::FLOAT32, Type::FLOAT64])
}

/// Index type: 32- or 64-bit scalar signed integer.
pub fn arb_index_type() -> impl Strategy<Value = Type> {
    proptest::sample::select(vec![Type::INT32, Type::INT64])
}

/// Any scalar type that participates in arithmetic.
pub fn arb_numeric_scalar() -> impl Strategy<Value = Type> {
    prop_oneof![arb_int_scalar(), arb_uint_scalar(), arb_float_scalar()]
}
