//! Condition definitions.

use serde::{Deserialize, Serialize};

use crate::error::ExpressionError;
use crate::globals::Globals;
use crate::operators::ConditionOp;

/// A boolean test of one store variable.
///
/// Comparison operators always carry a value; [`Condition::new`] rejects those that don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConditionDef", into = "ConditionDef")]
pub struct Condition {
    variable: String,
    operation: ConditionOp,
    value: Option<i64>,
}

impl Condition {
    /// Create a condition, checking that comparisons have a value.
    pub fn new(
        variable: impl Into<String>,
        operation: ConditionOp,
        value: Option<i64>,
    ) -> Result<Self, ExpressionError> {
        let variable = variable.into();
        if operation.is_comparison() && value.is_none() {
            return Err(ExpressionError::MissingValue {
                variable,
                operation: operation.symbol().to_string(),
            });
        }
        Ok(Self {
            variable,
            operation,
            value,
        })
    }

    /// Create a comparison against a literal.
    pub fn compare(variable: impl Into<String>, operation: ConditionOp, value: i64) -> Self {
        Self {
            variable: variable.into(),
            operation,
            value: Some(value),
        }
    }

    /// Create a test that the variable equals 1.
    pub fn set(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            operation: ConditionOp::Set,
            value: None,
        }
    }

    /// Create a test that the variable equals 0.
    pub fn unset(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            operation: ConditionOp::Unset,
            value: None,
        }
    }

    /// Evaluate the condition. Missing variables read as zero.
    pub fn apply(&self, globals: &Globals) -> bool {
        self.operation.test(globals.get(&self.variable), self.value)
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn operation(&self) -> ConditionOp {
        self.operation
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) if self.operation.is_comparison() => {
                write!(f, "{} {} {}", self.variable, self.operation, value)
            }
            _ => write!(f, "{} {}", self.variable, self.operation),
        }
    }
}

/// Serialized form of a condition as written by authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDef {
    pub variable: String,
    pub operation: ConditionOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl TryFrom<ConditionDef> for Condition {
    type Error = ExpressionError;

    fn try_from(def: ConditionDef) -> Result<Self, Self::Error> {
        Condition::new(def.variable, def.operation, def.value)
    }
}

impl From<Condition> for ConditionDef {
    fn from(condition: Condition) -> Self {
        Self {
            variable: condition.variable,
            operation: condition.operation,
            value: condition.value,
        }
    }
}

/// Check that every condition holds. Vacuously true for an empty slice.
pub fn all_hold(conditions: &[Condition], globals: &Globals) -> bool {
    conditions.iter().all(|c| c.apply(globals))
}
