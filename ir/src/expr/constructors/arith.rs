//! Arithmetic builders: `+ - * / %`, unary minus, and elementwise min/max.
//!
//! Rule order within each builder is load-bearing: the first matching fold
//! wins, and identity results are reconciled to the unified type with a
//! non-folding cast.

use std::sync::Arc;

use snafu::ensure;

use crate::error::{DivisionByZeroSnafu, Result};
use crate::expr::constructors::index_imms;
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::BinaryOp;

/// Elementwise minimum/maximum share one skeleton: unify, fold when both
/// sides are immediates of the same kind, otherwise allocate the node.
macro_rules! minmax_ops {
    ($($method:ident => $op:ident, $f:ident),+ $(,)?) => {$(
        pub fn $method(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
            let m = Self::match_arith(self.clone(), rhs.clone())?;
            if let (Some(pa), Some(pb)) = (m.pa, m.pb) {
                return Ok(Expr::new(Op::IntImm(pa.$f(pb)), m.rtype));
            }
            if let (Some(fa), Some(fb)) = (m.fa, m.fb) {
                return Ok(Expr::new(Op::FloatImm(fa.$f(fb)), m.rtype));
            }
            Ok(Expr::new(Op::Binary(BinaryOp::$op, m.a, m.b), m.rtype))
        }
    )+};
}

impl Expr {
    /// Addition with constant folding and zero elimination.
    pub fn try_add(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let m = Self::match_arith(self.clone(), rhs.clone())?;
        if let (Some(pa), Some(pb)) = (m.pa, m.pb) {
            return Ok(Expr::new(Op::IntImm(pa.wrapping_add(pb)), m.rtype));
        }
        if m.pa == Some(0) {
            return Ok(Self::simple_cast(m.rtype, &m.b));
        }
        if m.pb == Some(0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        if let (Some(fa), Some(fb)) = (m.fa, m.fb) {
            return Ok(Expr::new(Op::FloatImm(fa + fb), m.rtype));
        }
        if m.fa == Some(0.0) {
            return Ok(Self::simple_cast(m.rtype, &m.b));
        }
        if m.fb == Some(0.0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        Ok(Expr::new(Op::Binary(BinaryOp::Add, m.a, m.b), m.rtype))
    }

    /// Unary minus.
    ///
    /// Immediates negate in place; everything else becomes `0 - x`. There
    /// is no mirror rule in [`try_sub`](Self::try_sub) rewriting `0 - x`
    /// back to a negation, which keeps the pair loop-free.
    pub fn try_neg(self: &Arc<Self>) -> Result<ExprRef> {
        if let Some(v) = self.as_int_imm() {
            return Ok(Expr::new(Op::IntImm(v.wrapping_neg()), self.dtype()));
        }
        if let Some(v) = self.as_float_imm() {
            return Ok(Expr::new(Op::FloatImm(-v), self.dtype()));
        }
        Self::make_zero(self.dtype())?.try_sub(self)
    }

    /// Subtraction. Only the right-hand zero is an identity.
    pub fn try_sub(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let m = Self::match_arith(self.clone(), rhs.clone())?;
        if let (Some(pa), Some(pb)) = (m.pa, m.pb) {
            return Ok(Expr::new(Op::IntImm(pa.wrapping_sub(pb)), m.rtype));
        }
        if m.pb == Some(0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        if let (Some(fa), Some(fb)) = (m.fa, m.fb) {
            return Ok(Expr::new(Op::FloatImm(fa - fb), m.rtype));
        }
        if m.fb == Some(0.0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        Ok(Expr::new(Op::Binary(BinaryOp::Sub, m.a, m.b), m.rtype))
    }

    /// Multiplication with constant folding, unit elimination, and zero
    /// absorption on either side.
    pub fn try_mul(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let m = Self::match_arith(self.clone(), rhs.clone())?;
        if let (Some(pa), Some(pb)) = (m.pa, m.pb) {
            return Ok(Expr::new(Op::IntImm(pa.wrapping_mul(pb)), m.rtype));
        }
        if let Some(pa) = m.pa {
            if pa == 1 {
                return Ok(Self::simple_cast(m.rtype, &m.b));
            }
            if pa == 0 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
        }
        if let Some(pb) = m.pb {
            if pb == 1 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
            if pb == 0 {
                return Ok(Self::simple_cast(m.rtype, &m.b));
            }
        }
        if let (Some(fa), Some(fb)) = (m.fa, m.fb) {
            return Ok(Expr::new(Op::FloatImm(fa * fb), m.rtype));
        }
        if let Some(fa) = m.fa {
            if fa == 1.0 {
                return Ok(Self::simple_cast(m.rtype, &m.b));
            }
            if fa == 0.0 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
        }
        if let Some(fb) = m.fb {
            if fb == 1.0 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
            if fb == 0.0 {
                return Ok(Self::simple_cast(m.rtype, &m.b));
            }
        }
        Ok(Expr::new(Op::Binary(BinaryOp::Mul, m.a, m.b), m.rtype))
    }

    /// Division.
    ///
    /// Integer folding is restricted to a non-negative numerator and a
    /// positive denominator: rounding of the other quadrants differs
    /// across target languages and hardware, so those are deferred to
    /// lowering. A literal zero divisor fails construction.
    pub fn try_div(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let m = Self::match_arith(self.clone(), rhs.clone())?;
        if let (Some(pa), Some(pb)) = (m.pa, m.pb)
            && pa >= 0
            && pb > 0
        {
            return Ok(Expr::new(Op::IntImm(pa / pb), m.rtype));
        }
        if m.pa == Some(0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        if let Some(pb) = m.pb {
            if pb == 1 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
            ensure!(pb != 0, DivisionByZeroSnafu);
        }
        if let (Some(fa), Some(fb)) = (m.fa, m.fb)
            && fb != 0.0
        {
            return Ok(Expr::new(Op::FloatImm(fa / fb), m.rtype));
        }
        if m.fa == Some(0.0) {
            return Ok(Self::simple_cast(m.rtype, &m.a));
        }
        if let Some(fb) = m.fb {
            if fb == 1.0 {
                return Ok(Self::simple_cast(m.rtype, &m.a));
            }
            ensure!(fb != 0.0, DivisionByZeroSnafu);
        }
        Ok(Expr::new(Op::Binary(BinaryOp::Div, m.a, m.b), m.rtype))
    }

    /// Modulo.
    ///
    /// Takes only the index fast path: non-index operands still unify but
    /// build the node without folding. The quadrant restriction matches
    /// [`try_div`](Self::try_div).
    pub fn try_mod(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        if let Some(ix) = index_imms(self, rhs) {
            if let (Some(pa), Some(pb)) = (ix.pa, ix.pb)
                && pa >= 0
                && pb > 0
            {
                return Ok(Expr::new(Op::IntImm(pa % pb), ix.rtype));
            }
            if ix.pa == Some(0) {
                return Ok(Self::simple_cast(ix.rtype, self));
            }
            if let Some(pb) = ix.pb {
                if pb == 1 {
                    return Self::make_zero(ix.rtype);
                }
                ensure!(pb != 0, DivisionByZeroSnafu);
            }
        }
        let (a, b) = Self::match_binary_types(self.clone(), rhs.clone())?;
        let rtype = a.dtype();
        Ok(Expr::new(Op::Binary(BinaryOp::Mod, a, b), rtype))
    }

    minmax_ops! {
        try_min => Min, min,
        try_max => Max, max,
    }
}
