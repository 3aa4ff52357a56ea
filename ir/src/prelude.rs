//! Common imports for building expressions.
//!
//! ```rust,ignore
//! use tessera_ir::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::expr::constructors::data::IntoImm;
pub use crate::expr::eval::ConstScalar;
pub use crate::expr::{Expr, ExprRef};
pub use crate::op::{CommReducer, IterVar, Op};
pub use crate::types::{BinaryOp, CallKind, Intrinsic, ReduceOp};

pub use tessera_dtype::{Type, TypeCode};
