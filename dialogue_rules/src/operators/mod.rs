//! Operators: comparisons for conditions and mutations for effects.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ExpressionError;

/// Operators a condition can test a variable with.
///
/// Serialized as its symbol. Deserialization goes through [`FromStr`], so `==` is
/// accepted for `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConditionOp {
    Greater,
    Less,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    /// Variable equals 1.
    Set,
    /// Variable equals 0.
    Unset,
}

impl ConditionOp {
    /// Whether this operator compares against a literal value.
    pub fn is_comparison(&self) -> bool {
        !matches!(self, ConditionOp::Set | ConditionOp::Unset)
    }

    /// Evaluate the operator against the value read from the store.
    ///
    /// `operand` is only consulted for comparisons; a comparison with no operand is false.
    pub fn test(&self, current: i64, operand: Option<i64>) -> bool {
        match (self, operand) {
            (ConditionOp::Set, _) => current == 1,
            (ConditionOp::Unset, _) => current == 0,
            (ConditionOp::Greater, Some(v)) => current > v,
            (ConditionOp::Less, Some(v)) => current < v,
            (ConditionOp::Equal, Some(v)) => current == v,
            (ConditionOp::GreaterOrEqual, Some(v)) => current >= v,
            (ConditionOp::LessOrEqual, Some(v)) => current <= v,
            (_, None) => false,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionOp::Greater => ">",
            ConditionOp::Less => "<",
            ConditionOp::Equal => "=",
            ConditionOp::GreaterOrEqual => ">=",
            ConditionOp::LessOrEqual => "<=",
            ConditionOp::Set => "set",
            ConditionOp::Unset => "unset",
        }
    }
}

impl FromStr for ConditionOp {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(ConditionOp::Greater),
            "<" => Ok(ConditionOp::Less),
            "=" | "==" => Ok(ConditionOp::Equal),
            ">=" => Ok(ConditionOp::GreaterOrEqual),
            "<=" => Ok(ConditionOp::LessOrEqual),
            "set" => Ok(ConditionOp::Set),
            "unset" => Ok(ConditionOp::Unset),
            other => Err(ExpressionError::UnknownOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for ConditionOp {
    type Error = ExpressionError;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        symbol.parse()
    }
}

impl From<ConditionOp> for String {
    fn from(op: ConditionOp) -> Self {
        op.symbol().to_string()
    }
}

impl std::fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Operators an effect can mutate a variable with. Serialized as its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EffectOp {
    Add,
    Subtract,
    Assign,
    /// Force to 1.
    Set,
    /// Force to 0.
    Unset,
}

impl EffectOp {
    /// Whether this operator consumes the effect's operand.
    pub fn uses_operand(&self) -> bool {
        matches!(self, EffectOp::Add | EffectOp::Subtract | EffectOp::Assign)
    }

    /// Compute the new value of a variable. Returns `None` on overflow.
    pub fn mutate(&self, current: i64, operand: i64) -> Option<i64> {
        match self {
            EffectOp::Add => current.checked_add(operand),
            EffectOp::Subtract => current.checked_sub(operand),
            EffectOp::Assign => Some(operand),
            EffectOp::Set => Some(1),
            EffectOp::Unset => Some(0),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EffectOp::Add => "+",
            EffectOp::Subtract => "-",
            EffectOp::Assign => "=",
            EffectOp::Set => "set",
            EffectOp::Unset => "unset",
        }
    }
}

impl FromStr for EffectOp {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(EffectOp::Add),
            "-" => Ok(EffectOp::Subtract),
            "=" => Ok(EffectOp::Assign),
            "set" => Ok(EffectOp::Set),
            "unset" => Ok(EffectOp::Unset),
            other => Err(ExpressionError::UnknownOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for EffectOp {
    type Error = ExpressionError;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        symbol.parse()
    }
}

impl From<EffectOp> for String {
    fn from(op: EffectOp) -> Self {
        op.symbol().to_string()
    }
}

impl std::fmt::Display for EffectOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
