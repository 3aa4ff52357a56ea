//! Core expression handle and immediate views.

use std::sync::Arc;

use tessera_dtype::Type;

use crate::op::Op;

/// Shared, immutable expression handle.
///
/// Common subexpressions naturally alias, so handles are reference-counted
/// and cheap to copy across threads.
pub type ExprRef = Arc<Expr>;

/// An IR expression: a node paired with its result type.
///
/// Expressions never change after construction. Builders either return a
/// fresh handle or hand back one of their operands unchanged.
#[derive(Debug)]
pub struct Expr {
    op: Op,
    dtype: Type,
}

impl Expr {
    pub fn new(op: Op, dtype: Type) -> ExprRef {
        Arc::new(Self { op, dtype })
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn dtype(&self) -> Type {
        self.dtype
    }

    /// Integer-immediate view.
    pub fn as_int_imm(&self) -> Option<i64> {
        match self.op {
            Op::IntImm(v) => Some(v),
            _ => None,
        }
    }

    /// Unsigned-immediate view. Boolean literals are carried this way.
    pub fn as_uint_imm(&self) -> Option<u64> {
        match self.op {
            Op::UIntImm(v) => Some(v),
            _ => None,
        }
    }

    /// Float-immediate view.
    pub fn as_float_imm(&self) -> Option<f64> {
        match self.op {
            Op::FloatImm(v) => Some(v),
            _ => None,
        }
    }

    /// True for immediates and broadcast immediates.
    pub fn is_const(&self) -> bool {
        match &self.op {
            Op::IntImm(_) | Op::UIntImm(_) | Op::FloatImm(_) => true,
            Op::Broadcast { value, .. } => value.is_const(),
            _ => false,
        }
    }

    /// The shift amount when this expression is a positive power-of-two
    /// integer immediate.
    pub fn as_const_power_of_two(&self) -> Option<u32> {
        let v = match self.op {
            Op::IntImm(v) if v > 0 => v as u64,
            Op::UIntImm(v) => v,
            _ => return None,
        };
        v.is_power_of_two().then(|| v.trailing_zeros())
    }
}
