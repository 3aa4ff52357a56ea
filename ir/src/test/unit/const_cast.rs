//! Immediate factory and cast tests.

use std::sync::Arc;

use test_case::test_case;
use tessera_dtype::Type;

use crate::{CallKind, Error, Expr, Intrinsic, Op};

// =========================================================================
// make_const dispatch
// =========================================================================

#[test]
fn make_const_dispatches_on_type_code() {
    assert!(matches!(Expr::make_const(Type::INT32, 5).unwrap().op(), Op::IntImm(5)));
    assert!(matches!(Expr::make_const(Type::UINT32, 5).unwrap().op(), Op::UIntImm(5)));
    assert!(matches!(Expr::make_const(Type::FLOAT32, 5).unwrap().op(), Op::FloatImm(v) if *v == 5.0));
    assert!(matches!(Expr::make_const(Type::BOOL, true).unwrap().op(), Op::UIntImm(1)));
}

#[test]
fn native_const_infers_the_type() {
    let r = Expr::native_const(5i32).unwrap();
    assert_eq!(r.dtype(), Type::INT32);
    assert!(matches!(r.op(), Op::IntImm(5)));

    let r = Expr::native_const(true).unwrap();
    assert_eq!(r.dtype(), Type::BOOL);
    assert!(matches!(r.op(), Op::UIntImm(1)));

    let r = Expr::native_const(1.5f32).unwrap();
    assert_eq!(r.dtype(), Type::FLOAT32);
}

#[test]
fn make_const_of_handle_fails() {
    assert!(matches!(Expr::make_const(Type::handle(), 0), Err(Error::InvalidType { .. })));
}

#[test]
fn make_const_broadcasts_vector_types() {
    let r = Expr::make_const(Type::int(32, 4), 7).unwrap();
    assert_eq!(r.dtype(), Type::int(32, 4));
    let Op::Broadcast { value, lanes: 4 } = r.op() else {
        panic!("expected broadcast, got {:?}", r.op());
    };
    assert!(matches!(value.op(), Op::IntImm(7)));
}

#[test_case(Type::INT32, i64::from(i32::MIN), i64::from(i32::MAX); "int32")]
#[test_case(Type::INT8, -128, 127; "int8")]
#[test_case(Type::INT64, i64::MIN, i64::MAX; "int64")]
fn int_extremal_values(t: Type, min: i64, max: i64) {
    assert!(matches!(Expr::min_value(t).unwrap().op(), Op::IntImm(v) if *v == min));
    assert!(matches!(Expr::max_value(t).unwrap().op(), Op::IntImm(v) if *v == max));
}

#[test]
fn uint_extremal_values() {
    assert!(matches!(Expr::min_value(Type::UINT8).unwrap().op(), Op::UIntImm(0)));
    assert!(matches!(Expr::max_value(Type::UINT8).unwrap().op(), Op::UIntImm(255)));
    assert!(matches!(Expr::max_value(Type::UINT64).unwrap().op(), Op::UIntImm(u64::MAX)));
}

#[test]
fn float_extremal_values_are_finite() {
    let min = Expr::min_value(Type::FLOAT32).unwrap();
    let max = Expr::max_value(Type::FLOAT32).unwrap();
    assert!(matches!(min.op(), Op::FloatImm(v) if *v == -(f32::MAX as f64)));
    assert!(matches!(max.op(), Op::FloatImm(v) if *v == f32::MAX as f64));
}

#[test]
fn extremal_values_of_handle_fail() {
    assert!(Expr::min_value(Type::handle()).is_err());
    assert!(Expr::max_value(Type::handle()).is_err());
}

// =========================================================================
// cast
// =========================================================================

#[test]
fn cast_to_same_type_is_identity() {
    let x = Expr::var("x", Type::INT32);
    assert!(Arc::ptr_eq(&x.try_cast(Type::INT32).unwrap(), &x));
}

#[test]
fn cast_is_idempotent() {
    let x = Expr::var("x", Type::INT32);
    let once = x.try_cast(Type::FLOAT32).unwrap();
    let twice = once.try_cast(Type::FLOAT32).unwrap();
    assert!(Arc::ptr_eq(&once, &twice));
}

#[test]
fn cast_folds_int_immediate() {
    let r = Expr::make_const(Type::INT32, 4).unwrap().try_cast(Type::FLOAT32).unwrap();
    assert!(matches!(r.op(), Op::FloatImm(v) if *v == 4.0));
    assert_eq!(r.dtype(), Type::FLOAT32);
}

#[test]
fn cast_folds_float_immediate_toward_zero() {
    let r = Expr::make_const(Type::FLOAT32, 2.75f64).unwrap().try_cast(Type::INT32).unwrap();
    assert!(matches!(r.op(), Op::IntImm(2)));
}

#[test]
fn cast_of_unsigned_immediate_builds_node() {
    // only signed and float immediates fold through casts
    let r = Expr::make_const(Type::UINT32, 4u64).unwrap().try_cast(Type::FLOAT32).unwrap();
    assert!(matches!(r.op(), Op::Cast(_)));
    assert_eq!(r.dtype(), Type::FLOAT32);
}

#[test]
fn cast_scalar_to_vector_broadcasts() {
    let seven = Expr::make_const(Type::INT32, 7).unwrap();
    let r = seven.try_cast(Type::int(32, 4)).unwrap();
    let Op::Broadcast { value, lanes: 4 } = r.op() else {
        panic!("expected broadcast, got {:?}", r.op());
    };
    assert!(Arc::ptr_eq(value, &seven));
    assert_eq!(r.dtype(), Type::int(32, 4));
}

#[test]
fn cast_scalar_to_vector_converts_element_first() {
    let x = Expr::var("x", Type::INT32);
    let r = x.try_cast(Type::float(32, 4)).unwrap();
    let Op::Broadcast { value, lanes: 4 } = r.op() else {
        panic!("expected broadcast, got {:?}", r.op());
    };
    assert!(matches!(value.op(), Op::Cast(_)));
    assert_eq!(value.dtype(), Type::FLOAT32);
}

#[test]
fn cast_vector_to_vector_keeps_lanes() {
    let v = Expr::var("v", Type::int(32, 4));
    let r = v.try_cast(Type::float(32, 4)).unwrap();
    assert!(matches!(r.op(), Op::Cast(_)));
    assert_eq!(r.dtype(), Type::float(32, 4));
}

#[test]
fn cast_vector_lane_mismatch_fails() {
    let v = Expr::var("v", Type::int(32, 4));
    assert!(matches!(v.try_cast(Type::float(32, 8)), Err(Error::CastLaneMismatch { .. })));
}

// =========================================================================
// reinterpret
// =========================================================================

#[test]
fn reinterpret_same_type_is_identity() {
    let x = Expr::var("x", Type::FLOAT32);
    assert!(Arc::ptr_eq(&x.reinterpret(Type::FLOAT32), &x));
}

#[test]
fn reinterpret_never_folds() {
    let imm = Expr::make_const(Type::INT32, 1).unwrap();
    let r = imm.reinterpret(Type::FLOAT32);
    let Op::Call { name, kind, args } = r.op() else {
        panic!("expected call, got {:?}", r.op());
    };
    assert_eq!(*name, Intrinsic::Reinterpret);
    assert_eq!(*kind, CallKind::PureIntrinsic);
    assert_eq!(args.len(), 1);
    assert_eq!(r.dtype(), Type::FLOAT32);
}
