//! Commutative reducers over reduction domains.

use tessera_dtype::Type;

use crate::error::Result;
use crate::expr::{Expr, ExprRef};
use crate::op::{CommReducer, IterVar, Op};
use crate::types::{BinaryOp, ReduceOp};

impl ReduceOp {
    const fn binary(self) -> BinaryOp {
        match self {
            ReduceOp::Sum => BinaryOp::Add,
            ReduceOp::Prod => BinaryOp::Mul,
            ReduceOp::Min => BinaryOp::Min,
            ReduceOp::Max => BinaryOp::Max,
        }
    }

    /// Identity element of the reduction for a given source type.
    /// Min folds toward the largest representable value and vice versa.
    fn identity(self, t: Type) -> Result<ExprRef> {
        match self {
            ReduceOp::Sum => Expr::make_zero(t),
            ReduceOp::Prod => Expr::make_one(t),
            ReduceOp::Min => Expr::max_value(t),
            ReduceOp::Max => Expr::min_value(t),
        }
    }
}

impl Expr {
    /// Reduce `source` over `rdom` with a commutative combiner.
    ///
    /// The descriptor packages two fresh bound variables of the source
    /// type, the combining node, the identity element, and an always-true
    /// predicate, wrapped into a reduction node with reduction-axis
    /// index 0.
    pub fn reduce(source: &ExprRef, rdom: &[IterVar], op: ReduceOp) -> Result<ExprRef> {
        let t = source.dtype();
        let x = Expr::var("x", t);
        let y = Expr::var("y", t);
        let result = Expr::new(Op::Binary(op.binary(), x.clone(), y.clone()), t);
        let combiner = CommReducer { lhs: x, rhs: y, result, identity: op.identity(t)? };
        Ok(Expr::new(
            Op::Reduce {
                combiner,
                source: source.clone(),
                axis: rdom.iter().cloned().collect(),
                condition: Expr::const_true(),
                value_index: 0,
            },
            t,
        ))
    }

    /// Sum of `source` over `rdom`.
    pub fn sum(source: &ExprRef, rdom: &[IterVar]) -> Result<ExprRef> {
        Self::reduce(source, rdom, ReduceOp::Sum)
    }

    /// Product of `source` over `rdom`.
    pub fn prod(source: &ExprRef, rdom: &[IterVar]) -> Result<ExprRef> {
        Self::reduce(source, rdom, ReduceOp::Prod)
    }

    /// Minimum of `source` over `rdom`.
    pub fn reduce_min(source: &ExprRef, rdom: &[IterVar]) -> Result<ExprRef> {
        Self::reduce(source, rdom, ReduceOp::Min)
    }

    /// Maximum of `source` over `rdom`.
    pub fn reduce_max(source: &ExprRef, rdom: &[IterVar]) -> Result<ExprRef> {
        Self::reduce(source, rdom, ReduceOp::Max)
    }
}
