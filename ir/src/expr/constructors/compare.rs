//! Comparison builders.
//!
//! Two constant sides of the same kind fold to a scalar boolean immediate;
//! everything else becomes a node over the unified operands, boolean with
//! the operands' lane count.

use std::sync::Arc;

use tessera_dtype::Type;

use crate::error::Result;
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::BinaryOp;

macro_rules! cmp_ops {
    ($($method:ident => $op:ident, $cmp:tt),+ $(,)?) => {$(
        pub fn $method(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
            let m = Self::match_arith(self.clone(), rhs.clone())?;
            if let (Some(pa), Some(pb)) = (m.pa, m.pb) {
                return Ok(Expr::new(Op::UIntImm((pa $cmp pb) as u64), Type::BOOL));
            }
            if let (Some(fa), Some(fb)) = (m.fa, m.fb) {
                return Ok(Expr::new(Op::UIntImm((fa $cmp fb) as u64), Type::BOOL));
            }
            let lanes = m.rtype.lanes();
            Ok(Expr::new(Op::Binary(BinaryOp::$op, m.a, m.b), Type::bool(lanes)))
        }
    )+};
}

impl Expr {
    cmp_ops! {
        try_gt => Gt, >,
        try_ge => Ge, >=,
        try_lt => Lt, <,
        try_le => Le, <=,
        try_eq => Eq, ==,
        try_ne => Ne, !=,
    }
}
