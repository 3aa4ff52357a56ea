//! Boolean connective tests: short-circuit folds and operand validation.

use std::sync::Arc;

use tessera_dtype::Type;

use crate::{BinaryOp, Error, Expr, Op};

#[test]
fn and_short_circuits_on_literals() {
    let t = Expr::const_true();
    let f = Expr::make_const(Type::BOOL, false).unwrap();
    let b = Expr::var("b", Type::BOOL);

    assert!(Arc::ptr_eq(&t.try_and(&b).unwrap(), &b));
    assert!(Arc::ptr_eq(&f.try_and(&b).unwrap(), &f));
    assert!(Arc::ptr_eq(&b.try_and(&t).unwrap(), &b));
    assert!(Arc::ptr_eq(&b.try_and(&f).unwrap(), &f));
}

#[test]
fn or_short_circuits_on_literals() {
    let t = Expr::const_true();
    let f = Expr::make_const(Type::BOOL, false).unwrap();
    let b = Expr::var("b", Type::BOOL);

    assert!(Arc::ptr_eq(&t.try_or(&b).unwrap(), &t));
    assert!(Arc::ptr_eq(&f.try_or(&b).unwrap(), &b));
    assert!(Arc::ptr_eq(&b.try_or(&t).unwrap(), &t));
    assert!(Arc::ptr_eq(&b.try_or(&f).unwrap(), &b));
}

#[test]
fn not_folds_literals() {
    let t = Expr::const_true();
    let f = Expr::make_const(Type::BOOL, false).unwrap();
    assert!(matches!(t.try_not().unwrap().op(), Op::UIntImm(0)));
    assert!(matches!(f.try_not().unwrap().op(), Op::UIntImm(1)));
}

#[test]
fn connectives_build_nodes_for_variables() {
    let a = Expr::var("a", Type::BOOL);
    let b = Expr::var("b", Type::BOOL);
    let r = a.try_and(&b).unwrap();
    assert!(matches!(r.op(), Op::Binary(BinaryOp::And, _, _)));
    assert_eq!(r.dtype(), Type::BOOL);

    let r = a.try_or(&b).unwrap();
    assert!(matches!(r.op(), Op::Binary(BinaryOp::Or, _, _)));

    let r = a.try_not().unwrap();
    assert!(matches!(r.op(), Op::Not(_)));
    assert_eq!(r.dtype(), Type::BOOL);
}

#[test]
fn vector_booleans_keep_lanes() {
    let a = Expr::var("a", Type::bool(4));
    let b = Expr::var("b", Type::bool(4));
    assert_eq!(a.try_and(&b).unwrap().dtype(), Type::bool(4));
    assert_eq!(a.try_not().unwrap().dtype(), Type::bool(4));
}

#[test]
fn mismatched_boolean_lanes_fail() {
    let a = Expr::var("a", Type::BOOL);
    let b = Expr::var("b", Type::bool(4));
    assert!(matches!(a.try_and(&b), Err(Error::TypeMismatch { .. })));
}

#[test]
fn non_boolean_operands_fail() {
    let x = Expr::var("x", Type::INT32);
    let y = Expr::var("y", Type::INT32);
    let b = Expr::var("b", Type::BOOL);
    assert!(matches!(x.try_and(&y), Err(Error::InvalidType { .. })));
    assert!(matches!(b.try_or(&x), Err(Error::InvalidType { .. })));
    assert!(matches!(x.try_not(), Err(Error::InvalidType { .. })));
}
