//! Expression layer of the tessera tensor-compiler IR.
//!
//! This crate provides the smart constructors ("builders") that assemble
//! arithmetic, comparison, logical, bitwise, cast, intrinsic, and reduction
//! expression nodes. Every builder performs three intertwined jobs on each
//! call:
//!
//! 1. unifies operand types (lane broadcast + numeric promotion),
//! 2. folds constants and drops identity elements, and
//! 3. allocates the concrete node, or a pure intrinsic call when no
//!    dedicated variant exists.
//!
//! Later passes assume the trivial rewrites already happened, so builders
//! are the only sanctioned way to create these nodes.
//!
//! ```rust
//! use tessera_ir::{Expr, Op, Type};
//!
//! let a = Expr::make_const(Type::INT32, 2).unwrap();
//! let b = Expr::make_const(Type::INT32, 3).unwrap();
//! let sum = a.try_add(&b).unwrap();
//! assert!(matches!(sum.op(), Op::IntImm(5)));
//! ```

pub mod error;
pub mod expr;
pub mod op;
pub mod prelude;
pub mod types;

#[cfg(test)]
mod test;

pub use error::{Error, Result};
pub use expr::eval::ConstScalar;
pub use expr::{Expr, ExprRef};
pub use op::{CommReducer, IterVar, Op};
pub use types::{BinaryOp, CallKind, Intrinsic, ReduceOp};

pub use tessera_dtype::{Type, TypeCode};
