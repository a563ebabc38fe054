//! Formula evaluation.
//!
//! A single left-to-right scan over the validated tokens with a value stack
//! and an operator stack, both local to the call. `*` and `/` are applied as
//! soon as their right operand arrives; `+` and `-` are applied when the next
//! additive operator or closing parenthesis shows up, which keeps equal
//! precedence operators left-associative.
//!
//! Evaluation never panics and never raises: every failure comes back as an
//! [`EvalError`] value that the cell store caches like any other value.

use thiserror::Error;

use super::formula::Formula;
use super::token::{Operator, Token};

/// A runtime evaluation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Divide by zero")]
    DivideByZero,

    #[error("Unmatched parenthesis")]
    UnmatchedParenthesis,

    #[error("Malformed expression")]
    MalformedExpression,

    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Variable {0} does not hold a number")]
    NotANumber(String),

    #[error("Variable {name} holds an error: {reason}")]
    ErrorValue { name: String, reason: String },
}

/// Why a variable lookup could not produce a number.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupFailure {
    /// Nothing is defined under that name.
    Undefined,
    /// The name holds something other than a number.
    NotANumber,
    /// The name holds an evaluation error.
    Error(EvalError),
}

impl LookupFailure {
    fn into_eval_error(self, name: &str) -> EvalError {
        match self {
            LookupFailure::Undefined => EvalError::UndefinedVariable(name.to_string()),
            LookupFailure::NotANumber => EvalError::NotANumber(name.to_string()),
            // Keep the root cause so long chains don't nest messages.
            LookupFailure::Error(EvalError::ErrorValue { reason, .. }) => EvalError::ErrorValue {
                name: name.to_string(),
                reason,
            },
            LookupFailure::Error(inner) => EvalError::ErrorValue {
                name: name.to_string(),
                reason: inner.to_string(),
            },
        }
    }
}

/// Entries on the operator stack.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Open,
    Op(Operator),
}

impl Formula {
    /// Evaluate the formula, resolving variables through `lookup`.
    pub fn evaluate<F>(&self, mut lookup: F) -> Result<f64, EvalError>
    where
        F: FnMut(&str) -> Result<f64, LookupFailure>,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut operators: Vec<Pending> = Vec::new();

        for token in self.tokens() {
            match token {
                Token::LParen => operators.push(Pending::Open),
                Token::Op(op @ (Operator::Mul | Operator::Div)) => operators.push(Pending::Op(*op)),
                Token::Op(op) => {
                    apply_additive(&mut operators, &mut values)?;
                    operators.push(Pending::Op(*op));
                }
                Token::Number(n) => push_value(*n, &mut operators, &mut values)?,
                Token::Variable(name) => {
                    let value = lookup(name).map_err(|failure| failure.into_eval_error(name))?;
                    push_value(value, &mut operators, &mut values)?;
                }
                Token::RParen => {
                    apply_additive(&mut operators, &mut values)?;
                    if operators.pop() != Some(Pending::Open) {
                        return Err(EvalError::UnmatchedParenthesis);
                    }
                    let inner = values.pop().ok_or(EvalError::MalformedExpression)?;
                    push_value(inner, &mut operators, &mut values)?;
                }
            }
        }

        match (operators.as_slice(), values.as_slice()) {
            ([], [value]) => Ok(*value),
            ([Pending::Op(Operator::Add)], [lhs, rhs]) => Ok(lhs + rhs),
            ([Pending::Op(Operator::Sub)], [lhs, rhs]) => Ok(lhs - rhs),
            _ => Err(EvalError::MalformedExpression),
        }
    }
}

/// Push a value, first folding it into a pending `*` or `/`.
fn push_value(
    value: f64,
    operators: &mut Vec<Pending>,
    values: &mut Vec<f64>,
) -> Result<(), EvalError> {
    match operators.last() {
        Some(Pending::Op(Operator::Mul)) => {
            operators.pop();
            let lhs = values.pop().ok_or(EvalError::MalformedExpression)?;
            values.push(lhs * value);
        }
        Some(Pending::Op(Operator::Div)) => {
            if value == 0.0 {
                return Err(EvalError::DivideByZero);
            }
            operators.pop();
            let lhs = values.pop().ok_or(EvalError::MalformedExpression)?;
            values.push(lhs / value);
        }
        _ => values.push(value),
    }
    Ok(())
}

/// Resolve a pending `+` or `-` against the two topmost values.
fn apply_additive(operators: &mut Vec<Pending>, values: &mut Vec<f64>) -> Result<(), EvalError> {
    let Some(Pending::Op(op @ (Operator::Add | Operator::Sub))) = operators.last().copied() else {
        return Ok(());
    };
    operators.pop();
    let rhs = values.pop().ok_or(EvalError::MalformedExpression)?;
    let lhs = values.pop().ok_or(EvalError::MalformedExpression)?;
    values.push(if op == Operator::Add { lhs + rhs } else { lhs - rhs });
    Ok(())
}
