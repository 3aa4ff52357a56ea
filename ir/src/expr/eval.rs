//! Best-effort constant evaluation.
//!
//! Reduces an expression to a scalar when every leaf it depends on is an
//! immediate. Callers that need fully-materialized shape arithmetic use
//! this after building; anything non-constant yields `None`. Integer
//! semantics are wrapping, division is C-style truncation, and a division
//! by zero evaluates to `None` rather than failing.

use tessera_dtype::{Type, TypeCode};

use crate::expr::Expr;
use crate::op::Op;
use crate::types::BinaryOp;

/// Evaluated scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstScalar {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl ConstScalar {
    fn truthy(self) -> bool {
        match self {
            ConstScalar::Int(v) => v != 0,
            ConstScalar::UInt(v) => v != 0,
            ConstScalar::Float(v) => v != 0.0,
        }
    }
}

impl Expr {
    /// Evaluate to a scalar when the expression is closed over immediates.
    ///
    /// A reduction over an empty domain evaluates to its combiner's
    /// identity element.
    pub fn eval_const(&self) -> Option<ConstScalar> {
        match self.op() {
            Op::IntImm(v) => Some(ConstScalar::Int(*v)),
            Op::UIntImm(v) => Some(ConstScalar::UInt(*v)),
            Op::FloatImm(v) => Some(ConstScalar::Float(*v)),
            Op::Broadcast { value, .. } => value.eval_const(),
            Op::Cast(src) => cast_scalar(src.eval_const()?, self.dtype()),
            Op::Not(a) => Some(ConstScalar::UInt(!a.eval_const()?.truthy() as u64)),
            Op::Binary(op, a, b) => eval_binary(*op, a.eval_const()?, b.eval_const()?),
            Op::Select { condition, true_value, false_value } => {
                if condition.eval_const()?.truthy() {
                    true_value.eval_const()
                } else {
                    false_value.eval_const()
                }
            }
            Op::Reduce { combiner, axis, .. } if axis.is_empty() => combiner.identity.eval_const(),
            _ => None,
        }
    }
}

/// Convert an evaluated scalar to the storage kind of `t`, truncating to
/// the type's bit width the way a cast node would.
fn cast_scalar(v: ConstScalar, t: Type) -> Option<ConstScalar> {
    use ConstScalar::*;
    Some(match t.code() {
        TypeCode::Int => {
            let x = match v {
                Int(x) => x,
                UInt(x) => x as i64,
                Float(x) => x as i64,
            };
            Int(truncate_int(x, t.bits()))
        }
        TypeCode::UInt => {
            let x = match v {
                Int(x) => x as u64,
                UInt(x) => x,
                Float(x) => x as i64 as u64,
            };
            UInt(truncate_uint(x, t.bits()))
        }
        TypeCode::Bool => UInt(v.truthy() as u64),
        TypeCode::Float => {
            let x = match v {
                Int(x) => x as f64,
                UInt(x) => x as f64,
                Float(x) => x,
            };
            Float(if t.bits() <= 32 { x as f32 as f64 } else { x })
        }
        TypeCode::Handle => return None,
    })
}

fn truncate_int(v: i64, bits: u8) -> i64 {
    match bits {
        8 => v as i8 as i64,
        16 => v as i16 as i64,
        32 => v as i32 as i64,
        _ => v,
    }
}

fn truncate_uint(v: u64, bits: u8) -> u64 {
    match bits {
        1 => (v != 0) as u64,
        8 => v as u8 as u64,
        16 => v as u16 as u64,
        32 => v as u32 as u64,
        _ => v,
    }
}

fn eval_binary(op: BinaryOp, a: ConstScalar, b: ConstScalar) -> Option<ConstScalar> {
    use ConstScalar::*;
    match (a, b) {
        (Int(a), Int(b)) => eval_int(op, a, b),
        (UInt(a), UInt(b)) => eval_uint(op, a, b),
        (Float(a), Float(b)) => eval_float(op, a, b),
        _ => None,
    }
}

fn eval_int(op: BinaryOp, a: i64, b: i64) -> Option<ConstScalar> {
    use BinaryOp::*;
    Some(match op {
        Add => ConstScalar::Int(a.wrapping_add(b)),
        Sub => ConstScalar::Int(a.wrapping_sub(b)),
        Mul => ConstScalar::Int(a.wrapping_mul(b)),
        Div => {
            if b == 0 {
                return None;
            }
            ConstScalar::Int(a.wrapping_div(b))
        }
        Mod => {
            if b == 0 {
                return None;
            }
            ConstScalar::Int(a.wrapping_rem(b))
        }
        Min => ConstScalar::Int(a.min(b)),
        Max => ConstScalar::Int(a.max(b)),
        Gt => ConstScalar::UInt((a > b) as u64),
        Ge => ConstScalar::UInt((a >= b) as u64),
        Lt => ConstScalar::UInt((a < b) as u64),
        Le => ConstScalar::UInt((a <= b) as u64),
        Eq => ConstScalar::UInt((a == b) as u64),
        Ne => ConstScalar::UInt((a != b) as u64),
        // boolean connectives live on uint immediates
        And | Or => return None,
    })
}

fn eval_uint(op: BinaryOp, a: u64, b: u64) -> Option<ConstScalar> {
    use BinaryOp::*;
    Some(match op {
        Add => ConstScalar::UInt(a.wrapping_add(b)),
        Sub => ConstScalar::UInt(a.wrapping_sub(b)),
        Mul => ConstScalar::UInt(a.wrapping_mul(b)),
        Div => {
            if b == 0 {
                return None;
            }
            ConstScalar::UInt(a / b)
        }
        Mod => {
            if b == 0 {
                return None;
            }
            ConstScalar::UInt(a % b)
        }
        Min => ConstScalar::UInt(a.min(b)),
        Max => ConstScalar::UInt(a.max(b)),
        Gt => ConstScalar::UInt((a > b) as u64),
        Ge => ConstScalar::UInt((a >= b) as u64),
        Lt => ConstScalar::UInt((a < b) as u64),
        Le => ConstScalar::UInt((a <= b) as u64),
        Eq => ConstScalar::UInt((a == b) as u64),
        Ne => ConstScalar::UInt((a != b) as u64),
        And => ConstScalar::UInt((a != 0 && b != 0) as u64),
        Or => ConstScalar::UInt((a != 0 || b != 0) as u64),
    })
}

fn eval_float(op: BinaryOp, a: f64, b: f64) -> Option<ConstScalar> {
    use BinaryOp::*;
    Some(match op {
        Add => ConstScalar::Float(a + b),
        Sub => ConstScalar::Float(a - b),
        Mul => ConstScalar::Float(a * b),
        Div => {
            if b == 0.0 {
                return None;
            }
            ConstScalar::Float(a / b)
        }
        Mod => ConstScalar::Float(a % b),
        Min => ConstScalar::Float(a.min(b)),
        Max => ConstScalar::Float(a.max(b)),
        Gt => ConstScalar::UInt((a > b) as u64),
        Ge => ConstScalar::UInt((a >= b) as u64),
        Lt => ConstScalar::UInt((a < b) as u64),
        Le => ConstScalar::UInt((a <= b) as u64),
        Eq => ConstScalar::UInt((a == b) as u64),
        Ne => ConstScalar::UInt((a != b) as u64),
        And | Or => return None,
    })
}
