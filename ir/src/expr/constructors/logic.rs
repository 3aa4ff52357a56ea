//! Boolean connectives with short-circuit constant folding.

use std::sync::Arc;

use snafu::ensure;
use tessera_dtype::Type;

use crate::error::{InvalidTypeSnafu, Result, TypeMismatchSnafu};
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::BinaryOp;

impl Expr {
    /// Logical conjunction. A literal side short-circuits before any node
    /// is allocated: `true && b` is `b`, `false && b` is `false`.
    pub fn try_and(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        if self.dtype().is_bool() && rhs.dtype().is_bool() {
            if let Some(pa) = self.as_uint_imm() {
                return Ok(if pa != 0 { rhs.clone() } else { self.clone() });
            }
            if let Some(pb) = rhs.as_uint_imm() {
                return Ok(if pb != 0 { self.clone() } else { rhs.clone() });
            }
        }
        let (ta, tb) = (self.dtype(), rhs.dtype());
        ensure!(ta.is_bool(), InvalidTypeSnafu { operation: "logical and", dtype: ta });
        ensure!(tb.is_bool(), InvalidTypeSnafu { operation: "logical and", dtype: tb });
        ensure!(ta == tb, TypeMismatchSnafu { lhs: ta, rhs: tb });
        Ok(Expr::new(Op::Binary(BinaryOp::And, self.clone(), rhs.clone()), ta))
    }

    /// Logical disjunction, dual of [`try_and`](Self::try_and).
    pub fn try_or(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        if self.dtype().is_bool() && rhs.dtype().is_bool() {
            if let Some(pa) = self.as_uint_imm() {
                return Ok(if pa != 0 { self.clone() } else { rhs.clone() });
            }
            if let Some(pb) = rhs.as_uint_imm() {
                return Ok(if pb != 0 { rhs.clone() } else { self.clone() });
            }
        }
        let (ta, tb) = (self.dtype(), rhs.dtype());
        ensure!(ta.is_bool(), InvalidTypeSnafu { operation: "logical or", dtype: ta });
        ensure!(tb.is_bool(), InvalidTypeSnafu { operation: "logical or", dtype: tb });
        ensure!(ta == tb, TypeMismatchSnafu { lhs: ta, rhs: tb });
        Ok(Expr::new(Op::Binary(BinaryOp::Or, self.clone(), rhs.clone()), ta))
    }

    /// Logical negation. Literal booleans fold to a scalar immediate.
    pub fn try_not(self: &Arc<Self>) -> Result<ExprRef> {
        if let Some(pa) = self.as_uint_imm() {
            return Ok(Expr::new(Op::UIntImm((pa == 0) as u64), Type::BOOL));
        }
        let t = self.dtype();
        ensure!(t.is_bool(), InvalidTypeSnafu { operation: "logical not", dtype: t });
        Ok(Expr::new(Op::Not(self.clone()), t))
    }
}
