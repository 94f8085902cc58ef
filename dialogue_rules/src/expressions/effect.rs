//! Effect definitions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arithmetic::Arithmetic;
use crate::error::ExpressionError;
use crate::globals::Globals;
use crate::operators::EffectOp;

/// Marker that introduces arithmetic in an effect value.
pub const EVAL_PREFIX: &str = "eval:";

/// The right-hand side of an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    /// Copy of another variable, read when the effect first fires.
    Variable(String),
    /// `eval:` arithmetic, evaluated when the effect first fires.
    Arithmetic(Arithmetic),
}

impl Operand {
    /// Interpret an author string: `eval:<expr>` is arithmetic, anything else names a variable.
    pub fn from_text(text: &str) -> Result<Self, ExpressionError> {
        match text.strip_prefix(EVAL_PREFIX) {
            Some(source) => Ok(Operand::Arithmetic(Arithmetic::parse(source)?)),
            None => Ok(Operand::Variable(text.to_string())),
        }
    }

    /// Whether the operand is already a fixed number.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Operand::Literal(_))
    }

    fn evaluate(&self, globals: &Globals) -> Result<i64, ExpressionError> {
        match self {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) => Ok(globals.get(name)),
            Operand::Arithmetic(expr) => expr.evaluate(globals),
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Literal(value)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Variable(name) => write!(f, "{}", name),
            Operand::Arithmetic(expr) => write!(f, "{}{}", EVAL_PREFIX, expr),
        }
    }
}

/// A mutation of one store variable.
///
/// A non-literal operand is resolved the first time the effect is applied and the
/// resulting number is kept for every later application of the same instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    variable: String,
    operation: EffectOp,
    operand: Option<Operand>,
}

impl Effect {
    /// Create an effect, checking that `+`, `-` and `=` have an operand.
    pub fn new(
        variable: impl Into<String>,
        operation: EffectOp,
        operand: Option<Operand>,
    ) -> Result<Self, ExpressionError> {
        let variable = variable.into();
        if operation.uses_operand() && operand.is_none() {
            return Err(ExpressionError::MissingOperand {
                variable,
                operation: operation.symbol().to_string(),
            });
        }
        Ok(Self {
            variable,
            operation,
            operand,
        })
    }

    /// Create an effect with a literal operand.
    pub fn literal(variable: impl Into<String>, operation: EffectOp, value: i64) -> Self {
        Self {
            variable: variable.into(),
            operation,
            operand: Some(Operand::Literal(value)),
        }
    }

    /// Create an effect that forces the variable to 1.
    pub fn set(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            operation: EffectOp::Set,
            operand: None,
        }
    }

    /// Create an effect that forces the variable to 0.
    pub fn unset(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            operation: EffectOp::Unset,
            operand: None,
        }
    }

    /// Apply the effect to the store.
    ///
    /// On error the store is left untouched.
    pub fn apply(&mut self, globals: &mut Globals) -> Result<(), ExpressionError> {
        let operand = if self.operation.uses_operand() {
            self.resolve_operand(globals)?
        } else {
            0
        };

        let current = globals.get(&self.variable);
        let next = self
            .operation
            .mutate(current, operand)
            .ok_or_else(|| ExpressionError::Overflow {
                expression: format!("{} {} {}", self.variable, self.operation, operand),
            })?;

        debug!(
            variable = %self.variable,
            operation = %self.operation,
            from = current,
            to = next,
            "applied effect"
        );
        globals.set(self.variable.clone(), next);
        Ok(())
    }

    fn resolve_operand(&mut self, globals: &Globals) -> Result<i64, ExpressionError> {
        match &self.operand {
            Some(Operand::Literal(value)) => Ok(*value),
            Some(operand) => {
                let value = operand.evaluate(globals)?;
                debug!(variable = %self.variable, operand = %operand, value, "resolved operand");
                self.operand = Some(Operand::Literal(value));
                Ok(value)
            }
            None => Err(ExpressionError::MissingOperand {
                variable: self.variable.clone(),
                operation: self.operation.symbol().to_string(),
            }),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn operation(&self) -> EffectOp {
        self.operation
    }

    pub fn operand(&self) -> Option<&Operand> {
        self.operand.as_ref()
    }
}

/// Effect value as written by authors: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Number(i64),
    Text(String),
}

/// Serialized form of an effect as written by authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDef {
    pub variable: String,
    pub operation: EffectOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EffectValue>,
}

impl TryFrom<EffectDef> for Effect {
    type Error = ExpressionError;

    fn try_from(def: EffectDef) -> Result<Self, Self::Error> {
        let operand = match def.value {
            Some(EffectValue::Number(value)) => Some(Operand::Literal(value)),
            Some(EffectValue::Text(text)) => Some(Operand::from_text(&text)?),
            None => None,
        };
        Effect::new(def.variable, def.operation, operand)
    }
}
