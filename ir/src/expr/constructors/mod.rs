//! Builder entry points for expression construction.
//!
//! Every builder unifies its operand types, applies local constant folding
//! and identity elimination, and only then allocates a node. Later passes
//! rely on these rewrites having happened: a builder must never produce a
//! node a trivial rule could have collapsed.
//!
//! - [`data`] - immediates, variables, casts, broadcast
//! - [`arith`] - `+ - * / %`, unary minus, elementwise min/max
//! - [`compare`] - ordering and equality
//! - [`logic`] - boolean connectives
//! - [`bitwise`] - bitwise and shift intrinsics
//! - [`numeric`] - pow/abs/fmod, rounding, conditional intrinsics
//! - [`reduce`] - commutative reducers over iteration domains

use snafu::ensure;
use tessera_dtype::Type;

use crate::error::{Result, TypeMismatchSnafu};
use crate::expr::{Expr, ExprRef};
use crate::op::Op;

pub mod arith;
pub mod bitwise;
pub mod compare;
pub mod data;
pub mod logic;
pub mod numeric;
pub mod reduce;

/// A type is an index type when it is a scalar 32- or 64-bit signed
/// integer. Index types dominate shape arithmetic, and downstream passes
/// require shape expressions to arrive fully folded, so the integer-only
/// operators give them a dedicated constant-propagation fast path.
pub(crate) fn is_index_type(t: &Type) -> bool {
    t.is_int() && t.lanes() == 1 && (t.bits() == 32 || t.bits() == 64)
}

/// Operand views for the index fast path: immediate values where literal,
/// and the wider of the two operand types.
pub(crate) struct IndexImms {
    pub pa: Option<i64>,
    pub pb: Option<i64>,
    pub rtype: Type,
}

/// Probe the index fast path. Applies only when both operand types are
/// index types; inspects the original, un-unified operands.
pub(crate) fn index_imms(a: &ExprRef, b: &ExprRef) -> Option<IndexImms> {
    let (ta, tb) = (a.dtype(), b.dtype());
    if !is_index_type(&ta) || !is_index_type(&tb) {
        return None;
    }
    let rtype = if ta.bits() >= tb.bits() { ta } else { tb };
    Some(IndexImms { pa: a.as_int_imm(), pb: b.as_int_imm(), rtype })
}

/// Operands after unification, with their immediate views extracted.
pub(crate) struct Matched {
    pub a: ExprRef,
    pub b: ExprRef,
    pub rtype: Type,
    pub pa: Option<i64>,
    pub pb: Option<i64>,
    pub fa: Option<f64>,
    pub fb: Option<f64>,
}

impl Expr {
    /// Bring two operands to a common type.
    ///
    /// A scalar operand is broadcast to the other side's lane count; two
    /// vectors must agree on lanes. Element types then promote: the
    /// non-float side casts toward a float side, same-signedness integers
    /// widen, and a signed/unsigned mix moves both sides into the wider
    /// signed type. Anything else is a mismatch the caller must resolve
    /// with an explicit cast, so hidden conversions cannot degrade
    /// precision in generated kernels.
    pub fn match_binary_types(mut a: ExprRef, mut b: ExprRef) -> Result<(ExprRef, ExprRef)> {
        if a.dtype() == b.dtype() {
            return Ok((a, b));
        }
        let ltype = a.dtype();
        let rtype = b.dtype();
        if ltype.lanes() == 1 && rtype.lanes() != 1 {
            a = Expr::broadcast(&a, rtype.lanes());
        } else if rtype.lanes() == 1 && ltype.lanes() != 1 {
            b = Expr::broadcast(&b, ltype.lanes());
        } else {
            ensure!(ltype.lanes() == rtype.lanes(), TypeMismatchSnafu { lhs: ltype, rhs: rtype });
        }
        if a.dtype() == b.dtype() {
            return Ok((a, b));
        }
        let (ta, tb) = (a.dtype(), b.dtype());
        // handles carry no arithmetic; nothing promotes into or out of them
        ensure!(!ta.is_handle() && !tb.is_handle(), TypeMismatchSnafu { lhs: ltype, rhs: rtype });
        if !ta.is_float() && tb.is_float() {
            a = a.try_cast(tb)?;
        } else if ta.is_float() && !tb.is_float() {
            b = b.try_cast(ta)?;
        } else if (ta.is_int() && tb.is_int()) || (ta.is_uint() && tb.is_uint()) {
            if ta.bits() < tb.bits() {
                a = a.try_cast(tb)?;
            } else {
                b = b.try_cast(ta)?;
            }
        } else if (ta.is_int() && tb.is_uint()) || (ta.is_uint() && tb.is_int()) {
            let bits = ta.bits().max(tb.bits());
            a = Self::simple_cast(Type::int(bits, ta.lanes()), &a);
            b = Self::simple_cast(Type::int(bits, tb.lanes()), &b);
        } else {
            return TypeMismatchSnafu { lhs: ltype, rhs: rtype }.fail();
        }
        tracing::trace!(lhs = %ltype, rhs = %rtype, unified = %a.dtype(), "implicit operand promotion");
        Ok((a, b))
    }

    /// Unify and extract the immediate views the arithmetic fold rules
    /// work on.
    pub(crate) fn match_arith(a: ExprRef, b: ExprRef) -> Result<Matched> {
        let (a, b) = Self::match_binary_types(a, b)?;
        let rtype = a.dtype();
        Ok(Matched {
            pa: a.as_int_imm(),
            pb: b.as_int_imm(),
            fa: a.as_float_imm(),
            fb: b.as_float_imm(),
            a,
            b,
            rtype,
        })
    }

    /// Cast that only reconciles the type tag: returns the value unchanged
    /// when types already match, otherwise wraps it in a cast node without
    /// folding.
    pub(crate) fn simple_cast(t: Type, value: &ExprRef) -> ExprRef {
        if value.dtype() == t { value.clone() } else { Expr::new(Op::Cast(value.clone()), t) }
    }
}
