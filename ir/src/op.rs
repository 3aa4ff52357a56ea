//! Expression node variants.
//!
//! [`Op`] is a closed set: every pass over the IR dispatches by exhaustive
//! pattern match, so adding a variant is a compiler-wide decision.

use smallvec::SmallVec;

use crate::expr::{Expr, ExprRef};
use crate::types::{BinaryOp, CallKind, Intrinsic};

/// Commutative reducer: a binary combining function over two bound
/// variables together with its identity element.
#[derive(Debug, Clone)]
pub struct CommReducer {
    pub lhs: ExprRef,
    pub rhs: ExprRef,
    pub result: ExprRef,
    pub identity: ExprRef,
}

/// Iteration variable of a reduction domain.
#[derive(Debug, Clone)]
pub struct IterVar {
    pub var: ExprRef,
    pub min: ExprRef,
    pub extent: ExprRef,
}

impl IterVar {
    /// A fresh iteration variable ranging over `[min, min + extent)`.
    pub fn new(min: ExprRef, extent: ExprRef, name: impl Into<String>) -> Self {
        let var = Expr::var(name, min.dtype());
        Self { var, min, extent }
    }
}

/// Expression node. The node's result [`Type`](tessera_dtype::Type) lives
/// on [`Expr`].
#[derive(Debug, Clone)]
pub enum Op {
    IntImm(i64),
    UIntImm(u64),
    FloatImm(f64),
    Var(String),

    /// Value conversion to the node's type.
    Cast(ExprRef),
    /// Scalar replicated across `lanes`.
    Broadcast { value: ExprRef, lanes: u16 },

    Binary(BinaryOp, ExprRef, ExprRef),
    Not(ExprRef),
    Select {
        condition: ExprRef,
        true_value: ExprRef,
        false_value: ExprRef,
    },

    /// Operation without a dedicated variant, dispatched by name.
    Call {
        name: Intrinsic,
        args: SmallVec<[ExprRef; 3]>,
        kind: CallKind,
    },

    /// Commutative reduction of `source` over `axis`.
    Reduce {
        combiner: CommReducer,
        source: ExprRef,
        axis: SmallVec<[IterVar; 2]>,
        condition: ExprRef,
        value_index: usize,
    },
}
