//! Reducer construction tests.

use tessera_dtype::Type;

use crate::{BinaryOp, ConstScalar, Expr, ExprRef, IterVar, Op, ReduceOp};

fn rdom_of(extent: i64) -> Vec<IterVar> {
    let min = Expr::make_zero(Type::INT32).unwrap();
    let extent = Expr::make_const(Type::INT32, extent).unwrap();
    vec![IterVar::new(min, extent, "r")]
}

#[test]
fn sum_builds_commutative_reducer() {
    let src = Expr::var("x", Type::FLOAT32);
    let rdom = rdom_of(16);
    let r = Expr::sum(&src, &rdom).unwrap();
    assert_eq!(r.dtype(), Type::FLOAT32);

    let Op::Reduce { combiner, axis, condition, value_index, source } = r.op() else {
        panic!("expected reduce, got {:?}", r.op());
    };
    assert_eq!(*value_index, 0);
    assert_eq!(axis.len(), 1);
    assert!(matches!(axis[0].var.op(), Op::Var(name) if name == "r"));
    assert!(matches!(source.op(), Op::Var(_)));

    // predicate is the literal scalar true
    assert!(matches!(condition.op(), Op::UIntImm(1)));
    assert_eq!(condition.dtype(), Type::BOOL);

    // combiner: x + y over fresh variables of the source type
    assert!(matches!(combiner.result.op(), Op::Binary(BinaryOp::Add, _, _)));
    assert_eq!(combiner.lhs.dtype(), Type::FLOAT32);
    assert_eq!(combiner.rhs.dtype(), Type::FLOAT32);
    assert!(matches!(combiner.identity.op(), Op::FloatImm(v) if *v == 0.0));
}

#[test]
fn prod_uses_mul_and_one() {
    let src = Expr::var("x", Type::INT32);
    let r = Expr::prod(&src, &rdom_of(4)).unwrap();
    let Op::Reduce { combiner, .. } = r.op() else { panic!() };
    assert!(matches!(combiner.result.op(), Op::Binary(BinaryOp::Mul, _, _)));
    assert!(matches!(combiner.identity.op(), Op::IntImm(1)));
}

#[test]
fn min_reduction_starts_from_type_max() {
    let src = Expr::var("x", Type::INT32);
    let r = Expr::reduce_min(&src, &rdom_of(4)).unwrap();
    let Op::Reduce { combiner, .. } = r.op() else { panic!() };
    assert!(matches!(combiner.result.op(), Op::Binary(BinaryOp::Min, _, _)));
    assert!(matches!(combiner.identity.op(), Op::IntImm(v) if *v == i64::from(i32::MAX)));
}

#[test]
fn max_reduction_starts_from_type_min() {
    let src = Expr::var("x", Type::INT32);
    let r = Expr::reduce_max(&src, &rdom_of(4)).unwrap();
    let Op::Reduce { combiner, .. } = r.op() else { panic!() };
    assert!(matches!(combiner.result.op(), Op::Binary(BinaryOp::Max, _, _)));
    assert!(matches!(combiner.identity.op(), Op::IntImm(v) if *v == i64::from(i32::MIN)));
}

#[test]
fn float_max_reduction_identity_is_negative_largest() {
    let src = Expr::var("x", Type::FLOAT32);
    let r = Expr::reduce_max(&src, &rdom_of(4)).unwrap();
    let Op::Reduce { combiner, .. } = r.op() else { panic!() };
    assert!(matches!(combiner.identity.op(), Op::FloatImm(v) if *v == -(f32::MAX as f64)));
}

#[test]
fn generic_reduce_matches_convenience_wrappers() {
    let src = Expr::var("x", Type::FLOAT32);
    let rdom = rdom_of(8);
    let direct = Expr::reduce(&src, &rdom, ReduceOp::Sum).unwrap();
    let Op::Reduce { combiner, .. } = direct.op() else { panic!() };
    assert!(matches!(combiner.result.op(), Op::Binary(BinaryOp::Add, _, _)));
}

#[test]
fn reduce_over_handle_source_fails() {
    let src = Expr::var("x", Type::handle());
    assert!(Expr::sum(&src, &[]).is_err());
}

// =========================================================================
// empty-domain evaluation
// =========================================================================

fn eval_empty(src: ExprRef, op: ReduceOp) -> ConstScalar {
    Expr::reduce(&src, &[], op).unwrap().eval_const().unwrap()
}

#[test]
fn empty_domain_reductions_evaluate_to_identity() {
    let f = Expr::var("x", Type::FLOAT32);
    assert_eq!(eval_empty(f.clone(), ReduceOp::Sum), ConstScalar::Float(0.0));
    assert_eq!(eval_empty(f.clone(), ReduceOp::Prod), ConstScalar::Float(1.0));

    let u = Expr::var("x", Type::UINT8);
    assert_eq!(eval_empty(u.clone(), ReduceOp::Min), ConstScalar::UInt(255));
    assert_eq!(eval_empty(u, ReduceOp::Max), ConstScalar::UInt(0));

    let i = Expr::var("x", Type::INT32);
    assert_eq!(eval_empty(i, ReduceOp::Max), ConstScalar::Int(i64::from(i32::MIN)));
}
