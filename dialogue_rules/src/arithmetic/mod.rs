//! Sandboxed integer arithmetic for `eval:` effect values.
//!
//! The grammar accepts integer literals, variable names (read from [`Globals`]),
//! the binary operators `+ - * /`, unary minus and parentheses. Nothing else can be
//! expressed, so evaluating author text can never reach anything but the store.
//!
//! Division is floor division: `7/2` is `3` and `-7/2` is `-4`.
//!
//! A run of unary minus signs collapses to one negation or none. Trees deeper than
//! [`MAX_DEPTH`] are rejected as parse errors, which bounds a long chain like
//! `1+1+...+1` as well.

use lazy_static::lazy_static;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;

use crate::error::ExpressionError;
use crate::globals::Globals;

mod grammar {
    #[derive(pest_derive::Parser)]
    #[grammar = "arithmetic/arithmetic.pest"]
    pub(super) struct ArithmeticParser;
}

use grammar::{ArithmeticParser, Rule};

/// Deepest syntax tree accepted, counting parentheses as a level.
pub const MAX_DEPTH: usize = 256;

lazy_static! {
    // Lowest precedence first.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::subtract, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
        .op(Op::prefix(Rule::negate));
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Parsed arithmetic syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithExpr {
    Number(i64),
    /// Store lookup, zero when unset.
    Variable(String),
    Negate(Box<ArithExpr>),
    Binary {
        op: BinaryOp,
        lhs: Box<ArithExpr>,
        rhs: Box<ArithExpr>,
    },
}

/// An arithmetic expression together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arithmetic {
    source: String,
    expr: ArithExpr,
}

impl Arithmetic {
    /// Parse arithmetic text.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let mut pairs = ArithmeticParser::parse(Rule::arithmetic, source).map_err(|e| {
            ExpressionError::Parse {
                expression: source.to_string(),
                message: e.variant.message().to_string(),
            }
        })?;

        let expr_pair = pairs
            .next()
            .and_then(|arithmetic| arithmetic.into_inner().next())
            .ok_or_else(|| parse_error(source, "empty expression"))?;

        let expr = build_expr(expr_pair.into_inner(), source)?;

        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// The original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed syntax tree.
    pub fn expr(&self) -> &ArithExpr {
        &self.expr
    }

    /// Evaluate against the current store.
    pub fn evaluate(&self, globals: &Globals) -> Result<i64, ExpressionError> {
        evaluate(&self.expr, globals, &self.source)
    }
}

impl std::fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn parse_error(source: &str, message: impl Into<String>) -> ExpressionError {
    ExpressionError::Parse {
        expression: source.to_string(),
        message: message.into(),
    }
}

fn overflow(source: &str) -> ExpressionError {
    ExpressionError::Overflow {
        expression: source.to_string(),
    }
}

/// Syntax tree under construction, with its height.
struct Node {
    expr: ArithExpr,
    depth: usize,
}

impl Node {
    fn leaf(expr: ArithExpr) -> Self {
        Self { expr, depth: 1 }
    }

    fn wrap(expr: ArithExpr, depth: usize, source: &str) -> Result<Self, ExpressionError> {
        if depth > MAX_DEPTH {
            return Err(parse_error(source, "expression nested too deeply"));
        }
        Ok(Self { expr, depth })
    }
}

fn build_expr(pairs: Pairs<Rule>, source: &str) -> Result<ArithExpr, ExpressionError> {
    build_node(pairs, source).map(|node| node.expr)
}

fn build_node(pairs: Pairs<Rule>, source: &str) -> Result<Node, ExpressionError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::number => primary
                .as_str()
                .parse::<i64>()
                .map(|n| Node::leaf(ArithExpr::Number(n)))
                .map_err(|_| overflow(source)),
            Rule::identifier => Ok(Node::leaf(ArithExpr::Variable(primary.as_str().to_string()))),
            Rule::expr => {
                let inner = build_node(primary.into_inner(), source)?;
                Node::wrap(inner.expr, inner.depth + 1, source)
            }
            rule => Err(parse_error(source, format!("unexpected {:?}", rule))),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            Rule::negate => {
                let rhs = rhs?;
                let signs = op.as_str().matches('-').count();
                if signs % 2 == 0 {
                    Ok(rhs)
                } else {
                    Node::wrap(ArithExpr::Negate(Box::new(rhs.expr)), rhs.depth + 1, source)
                }
            }
            rule => Err(parse_error(source, format!("unexpected prefix {:?}", rule))),
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::subtract => BinaryOp::Subtract,
                Rule::multiply => BinaryOp::Multiply,
                Rule::divide => BinaryOp::Divide,
                rule => return Err(parse_error(source, format!("unexpected operator {:?}", rule))),
            };
            let (lhs, rhs) = (lhs?, rhs?);
            let depth = lhs.depth.max(rhs.depth) + 1;
            Node::wrap(
                ArithExpr::Binary {
                    op,
                    lhs: Box::new(lhs.expr),
                    rhs: Box::new(rhs.expr),
                },
                depth,
                source,
            )
        })
        .parse(pairs)
}

fn evaluate(expr: &ArithExpr, globals: &Globals, source: &str) -> Result<i64, ExpressionError> {
    match expr {
        ArithExpr::Number(n) => Ok(*n),
        ArithExpr::Variable(name) => Ok(globals.get(name)),
        ArithExpr::Negate(inner) => evaluate(inner, globals, source)?
            .checked_neg()
            .ok_or_else(|| overflow(source)),
        ArithExpr::Binary { op, lhs, rhs } => {
            let lhs = evaluate(lhs, globals, source)?;
            let rhs = evaluate(rhs, globals, source)?;
            let result = match op {
                BinaryOp::Add => lhs.checked_add(rhs),
                BinaryOp::Subtract => lhs.checked_sub(rhs),
                BinaryOp::Multiply => lhs.checked_mul(rhs),
                BinaryOp::Divide => {
                    if rhs == 0 {
                        return Err(ExpressionError::DivisionByZero {
                            expression: source.to_string(),
                        });
                    }
                    floor_div(lhs, rhs)
                }
            };
            result.ok_or_else(|| overflow(source))
        }
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && ((remainder < 0) != (rhs < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}
