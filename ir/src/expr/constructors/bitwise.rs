//! Bitwise and shift builders.
//!
//! These have no dedicated node variants: anything that does not fold on
//! the index fast path becomes a pure intrinsic call over the unified
//! operands. Folding applies only to scalar 32/64-bit signed integers;
//! vector, unsigned, and narrow operands are left for lowering.

use std::sync::Arc;

use smallvec::smallvec;
use snafu::ensure;

use crate::error::{InvalidTypeSnafu, Result};
use crate::expr::constructors::index_imms;
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::Intrinsic;

macro_rules! bitwise_ops {
    ($($method:ident => $intrin:ident, $op:tt),+ $(,)?) => {$(
        pub fn $method(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
            if let Some(ix) = index_imms(self, rhs)
                && let (Some(pa), Some(pb)) = (ix.pa, ix.pb)
            {
                return Ok(Expr::new(Op::IntImm(pa $op pb), ix.rtype));
            }
            let (a, b) = Self::match_binary_types(self.clone(), rhs.clone())?;
            let t = a.dtype();
            Ok(Self::pure_call(t, Intrinsic::$intrin, smallvec![a, b]))
        }
    )+};
}

/// Shifts additionally collapse a literal zero shift amount, and only fold
/// amounts inside the value width.
macro_rules! shift_ops {
    ($($method:ident => $intrin:ident, $f:ident),+ $(,)?) => {$(
        pub fn $method(self: &Arc<Self>, rhs: &Arc<Self>) -> Result<ExprRef> {
            if let Some(ix) = index_imms(self, rhs) {
                if let (Some(pa), Some(pb)) = (ix.pa, ix.pb)
                    && (0..64).contains(&pb)
                {
                    return Ok(Expr::new(Op::IntImm(pa.$f(pb as u32)), ix.rtype));
                }
                if ix.pb == Some(0) {
                    return Ok(Self::simple_cast(ix.rtype, self));
                }
            }
            let (a, b) = Self::match_binary_types(self.clone(), rhs.clone())?;
            let t = a.dtype();
            Ok(Self::pure_call(t, Intrinsic::$intrin, smallvec![a, b]))
        }
    )+};
}

impl Expr {
    bitwise_ops! {
        try_bit_and => BitwiseAnd, &,
        try_bit_or => BitwiseOr, |,
        try_bit_xor => BitwiseXor, ^,
    }

    shift_ops! {
        try_shl => ShiftLeft, wrapping_shl,
        try_shr => ShiftRight, wrapping_shr,
    }

    /// Bitwise complement. Integer operands only; never folds.
    pub fn try_bit_not(self: &Arc<Self>) -> Result<ExprRef> {
        let t = self.dtype();
        ensure!(t.is_int() || t.is_uint(), InvalidTypeSnafu { operation: "bitwise not", dtype: t });
        Ok(Self::pure_call(t, Intrinsic::BitwiseNot, smallvec![self.clone()]))
    }
}
