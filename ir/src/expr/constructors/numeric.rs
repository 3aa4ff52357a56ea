//! Numeric intrinsics: power, absolute value, float remainder, rounding,
//! branch prediction, and conditional selection.

use std::sync::Arc;

use smallvec::smallvec;
use snafu::ensure;
use tessera_dtype::Type;

use crate::error::{ConditionNotScalarBoolSnafu, InvalidTypeSnafu, Result};
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::Intrinsic;

/// Rounding builders fold float immediates with the matching `f64`
/// primitive and otherwise lower to the intrinsic of the same name.
macro_rules! rounding_ops {
    ($($method:ident => $intrin:ident, $f:ident),+ $(,)?) => {$(
        pub fn $method(self: &Arc<Self>) -> ExprRef {
            if let Some(fx) = self.as_float_imm() {
                return Expr::new(Op::FloatImm(fx.$f()), self.dtype());
            }
            Self::pure_call(self.dtype(), Intrinsic::$intrin, smallvec![self.clone()])
        }
    )+};
}

impl Expr {
    /// Power. Float operands only.
    pub fn try_pow(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let (x, y) = Self::match_binary_types(self.clone(), rhs.clone())?;
        let t = x.dtype();
        ensure!(t.is_float(), InvalidTypeSnafu { operation: "pow", dtype: t });
        Ok(Self::pure_call(t, Intrinsic::Pow, smallvec![x, y]))
    }

    /// Floating-point remainder. Float operands only.
    pub fn try_fmod(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
        let (x, y) = Self::match_binary_types(self.clone(), rhs.clone())?;
        let t = x.dtype();
        ensure!(t.is_float(), InvalidTypeSnafu { operation: "fmod", dtype: t });
        Ok(Self::pure_call(t, Intrinsic::Fmod, smallvec![x, y]))
    }

    /// Absolute value.
    ///
    /// Signed integers select between `x` and `-x`; floats lower to
    /// `fabs`; unsigned values are already their own magnitude.
    pub fn try_abs(self: &Arc<Self>) -> Result<ExprRef> {
        let t = self.dtype();
        if t.is_int() {
            if let Some(v) = self.as_int_imm() {
                return Ok(Expr::new(Op::IntImm(v.wrapping_abs()), t));
            }
            let non_negative = self.try_ge(&Self::make_zero(t)?)?;
            let negated = self.try_neg()?;
            return Ok(Expr::new(
                Op::Select { condition: non_negative, true_value: self.clone(), false_value: negated },
                t,
            ));
        }
        if t.is_float() {
            if let Some(v) = self.as_float_imm() {
                return Ok(Expr::new(Op::FloatImm(v.abs()), t));
            }
            return Ok(Self::pure_call(t, Intrinsic::Fabs, smallvec![self.clone()]));
        }
        if t.is_uint() {
            return Ok(self.clone());
        }
        InvalidTypeSnafu { operation: "abs", dtype: t }.fail()
    }

    rounding_ops! {
        floor => Floor, floor,
        ceil => Ceil, ceil,
        round => Round, round_ties_even,
        trunc => Trunc, trunc,
    }

    /// Branch-prediction hint. Constants pass through untouched.
    pub fn likely(self: &Arc<Self>) -> ExprRef {
        if self.is_const() {
            return self.clone();
        }
        Self::pure_call(self.dtype(), Intrinsic::Likely, smallvec![self.clone()])
    }

    /// Conditional selection over unified branches.
    ///
    /// The condition must be exactly a scalar boolean; a literal condition
    /// returns the corresponding branch directly.
    pub fn try_if_then_else(cond: &ExprRef, true_value: &ExprRef, false_value: &ExprRef) -> Result<ExprRef> {
        ensure!(cond.dtype() == Type::BOOL, ConditionNotScalarBoolSnafu { actual: cond.dtype() });
        let (t, f) = Self::match_binary_types(true_value.clone(), false_value.clone())?;
        if let Some(v) = cond.as_uint_imm() {
            return Ok(if v != 0 { t } else { f });
        }
        if let Some(v) = cond.as_int_imm() {
            return Ok(if v != 0 { t } else { f });
        }
        let dtype = t.dtype();
        Ok(Self::pure_call(dtype, Intrinsic::IfThenElse, smallvec![cond.clone(), t, f]))
    }
}
