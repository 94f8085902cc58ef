//! Errors raised while building or evaluating expressions.

use thiserror::Error;

/// Failure of a condition, effect, or arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// A comparison condition was declared without a value to compare against.
    #[error("condition on `{variable}` uses comparison `{operation}` but has no value")]
    MissingValue { variable: String, operation: String },

    /// A `+`, `-` or `=` effect was declared without an operand.
    #[error("effect on `{variable}` uses `{operation}` but has no value")]
    MissingOperand { variable: String, operation: String },

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("cannot parse arithmetic `{expression}`: {message}")]
    Parse { expression: String, message: String },

    #[error("division by zero in `{expression}`")]
    DivisionByZero { expression: String },

    #[error("integer overflow in `{expression}`")]
    Overflow { expression: String },
}
