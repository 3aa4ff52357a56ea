use snafu::Snafu;
use tessera_dtype::Type;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Operand types cannot be reconciled by broadcast and promotion.
    #[snafu(display("cannot match type {lhs} vs {rhs}"))]
    TypeMismatch { lhs: Type, rhs: Type },

    /// Vector-to-vector cast with differing lane counts.
    #[snafu(display("cannot cast {from} to {to}: lane counts differ"))]
    CastLaneMismatch { from: Type, to: Type },

    /// Operand type unsupported by the operation.
    #[snafu(display("type {dtype} not supported by {operation}"))]
    InvalidType { operation: &'static str, dtype: Type },

    /// Conditional intrinsics take a single scalar boolean condition.
    #[snafu(display("condition must be a scalar bool, got {actual}"))]
    ConditionNotScalarBool { actual: Type },

    /// Literal zero divisor at construction time.
    #[snafu(display("divide by zero"))]
    DivisionByZero,
}
