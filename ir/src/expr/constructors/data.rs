//! Immediates, variables, casts, and broadcast.

use std::sync::Arc;

use smallvec::smallvec;
use snafu::ensure;
use tessera_dtype::ext::HasType;
use tessera_dtype::{Type, TypeCode};

use crate::error::{CastLaneMismatchSnafu, InvalidTypeSnafu, Result};
use crate::expr::{Expr, ExprRef};
use crate::op::Op;
use crate::types::{CallKind, Intrinsic};

/// Scalar value convertible into a typed immediate.
///
/// [`Expr::make_const`] dispatches on the target type's code, so the same
/// source value can seed an `IntImm`, `UIntImm`, or `FloatImm`.
pub trait IntoImm {
    fn into_imm(self, t: Type) -> Result<ExprRef>;
}

impl IntoImm for i64 {
    fn into_imm(self, t: Type) -> Result<ExprRef> {
        debug_assert!(t.is_scalar());
        let op = match t.code() {
            TypeCode::Int => Op::IntImm(self),
            TypeCode::UInt => Op::UIntImm(self as u64),
            TypeCode::Bool => Op::UIntImm((self != 0) as u64),
            TypeCode::Float => Op::FloatImm(self as f64),
            TypeCode::Handle => return InvalidTypeSnafu { operation: "make_const", dtype: t }.fail(),
        };
        Ok(Expr::new(op, t))
    }
}

impl IntoImm for u64 {
    fn into_imm(self, t: Type) -> Result<ExprRef> {
        debug_assert!(t.is_scalar());
        let op = match t.code() {
            TypeCode::Int => Op::IntImm(self as i64),
            TypeCode::UInt => Op::UIntImm(self),
            TypeCode::Bool => Op::UIntImm((self != 0) as u64),
            TypeCode::Float => Op::FloatImm(self as f64),
            TypeCode::Handle => return InvalidTypeSnafu { operation: "make_const", dtype: t }.fail(),
        };
        Ok(Expr::new(op, t))
    }
}

impl IntoImm for f64 {
    fn into_imm(self, t: Type) -> Result<ExprRef> {
        debug_assert!(t.is_scalar());
        let op = match t.code() {
            TypeCode::Int => Op::IntImm(self as i64),
            TypeCode::UInt => Op::UIntImm(self as u64),
            TypeCode::Bool => Op::UIntImm((self != 0.0) as u64),
            TypeCode::Float => Op::FloatImm(self),
            TypeCode::Handle => return InvalidTypeSnafu { operation: "make_const", dtype: t }.fail(),
        };
        Ok(Expr::new(op, t))
    }
}

impl IntoImm for f32 {
    fn into_imm(self, t: Type) -> Result<ExprRef> {
        (self as f64).into_imm(t)
    }
}

macro_rules! impl_into_imm_int {
    ($($ty:ty),+ $(,)?) => {$(
        impl IntoImm for $ty {
            fn into_imm(self, t: Type) -> Result<ExprRef> {
                (self as i64).into_imm(t)
            }
        }
    )+};
}

impl_into_imm_int!(bool, i8, i16, i32, u8, u16, u32);

impl Expr {
    /// Typed immediate of `t`, broadcast when `t` is a vector.
    pub fn make_const<V: IntoImm>(t: Type, value: V) -> Result<ExprRef> {
        if t.lanes() > 1 {
            let elem = value.into_imm(t.element_of())?;
            return Ok(Self::broadcast(&elem, t.lanes()));
        }
        value.into_imm(t)
    }

    /// Immediate from a Rust native value, with the type inferred.
    pub fn native_const<V: HasType + IntoImm>(value: V) -> Result<ExprRef> {
        Self::make_const(V::TYPE, value)
    }

    /// Additive identity of `t`.
    pub fn make_zero(t: Type) -> Result<ExprRef> {
        Self::make_const(t, 0i64)
    }

    /// Multiplicative identity of `t`.
    pub fn make_one(t: Type) -> Result<ExprRef> {
        Self::make_const(t, 1i64)
    }

    /// The literal scalar boolean `true`.
    pub fn const_true() -> ExprRef {
        Expr::new(Op::UIntImm(1), Type::BOOL)
    }

    /// Smallest representable value of `t` (elementwise for vectors).
    pub fn min_value(t: Type) -> Result<ExprRef> {
        let elem = t.element_of();
        match elem.code() {
            TypeCode::Int => {
                let v = if elem.bits() >= 64 { i64::MIN } else { -(1i64 << (elem.bits() - 1)) };
                Self::make_const(t, v)
            }
            TypeCode::UInt | TypeCode::Bool => Self::make_const(t, 0i64),
            TypeCode::Float => Self::make_const(t, -float_max(elem.bits())),
            TypeCode::Handle => InvalidTypeSnafu { operation: "min_value", dtype: t }.fail(),
        }
    }

    /// Largest representable value of `t` (elementwise for vectors).
    pub fn max_value(t: Type) -> Result<ExprRef> {
        let elem = t.element_of();
        match elem.code() {
            TypeCode::Int => {
                let v = if elem.bits() >= 64 { i64::MAX } else { (1i64 << (elem.bits() - 1)) - 1 };
                Self::make_const(t, v)
            }
            TypeCode::UInt => {
                let v = if elem.bits() >= 64 { u64::MAX } else { (1u64 << elem.bits()) - 1 };
                Self::make_const(t, v)
            }
            TypeCode::Bool => Self::make_const(t, 1i64),
            TypeCode::Float => Self::make_const(t, float_max(elem.bits())),
            TypeCode::Handle => InvalidTypeSnafu { operation: "max_value", dtype: t }.fail(),
        }
    }

    /// Named variable of type `t`.
    pub fn var(name: impl Into<String>, t: Type) -> ExprRef {
        Expr::new(Op::Var(name.into()), t)
    }

    /// Replicate a scalar across `lanes`.
    pub fn broadcast(value: &ExprRef, lanes: u16) -> ExprRef {
        debug_assert!(value.dtype().is_scalar());
        let t = value.dtype().with_lanes(lanes);
        Expr::new(Op::Broadcast { value: value.clone(), lanes }, t)
    }

    /// Value-preserving conversion to `t`.
    ///
    /// Immediate integers and floats fold directly into an immediate of the
    /// target type; a scalar cast to a vector type converts the element
    /// first and then broadcasts it. Vector-to-vector casts require equal
    /// lane counts.
    ///
    /// ```rust
    /// use tessera_ir::{Expr, Op, Type};
    ///
    /// let four = Expr::make_const(Type::INT32, 4).unwrap();
    /// let cast = four.try_cast(Type::FLOAT32).unwrap();
    /// assert!(matches!(cast.op(), Op::FloatImm(v) if *v == 4.0));
    /// ```
    pub fn try_cast(self: &Arc<Self>, t: Type) -> Result<ExprRef> {
        if self.dtype() == t {
            return Ok(self.clone());
        }
        if t.lanes() == 1 {
            if let Some(v) = self.as_int_imm() {
                return Self::make_const(t, v);
            }
            if let Some(v) = self.as_float_imm() {
                return Self::make_const(t, v);
            }
            return Ok(Expr::new(Op::Cast(self.clone()), t));
        }
        if self.dtype().lanes() == 1 {
            // Unrolled by hand: convert the element, then broadcast it.
            let vtype = t.element_of();
            let value = if self.dtype() == vtype {
                self.clone()
            } else if let Some(v) = self.as_int_imm() {
                Self::make_const(vtype, v)?
            } else if let Some(v) = self.as_float_imm() {
                Self::make_const(vtype, v)?
            } else {
                Expr::new(Op::Cast(self.clone()), vtype)
            };
            return Ok(Self::broadcast(&value, t.lanes()));
        }
        ensure!(self.dtype().lanes() == t.lanes(), CastLaneMismatchSnafu { from: self.dtype(), to: t });
        Ok(Expr::new(Op::Cast(self.clone()), t))
    }

    /// Reinterpret the bit pattern as `t` without converting the value.
    ///
    /// Never folds: an immediate's bit representation is not reconstructed
    /// here.
    pub fn reinterpret(self: &Arc<Self>, t: Type) -> ExprRef {
        if self.dtype() == t {
            return self.clone();
        }
        Self::pure_call(t, Intrinsic::Reinterpret, smallvec![self.clone()])
    }

    /// Side-effect-free intrinsic call node.
    pub(crate) fn pure_call(t: Type, name: Intrinsic, args: smallvec::SmallVec<[ExprRef; 3]>) -> ExprRef {
        Expr::new(Op::Call { name, args, kind: CallKind::PureIntrinsic }, t)
    }
}

fn float_max(bits: u8) -> f64 {
    match bits {
        16 => 65504.0,
        32 => f32::MAX as f64,
        _ => f64::MAX,
    }
}
