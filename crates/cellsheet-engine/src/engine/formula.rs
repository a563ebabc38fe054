//! Formula construction and validation.
//!
//! A [`Formula`] is an immutable, validated token sequence. Construction
//! normalizes every variable through a caller-supplied function and checks it
//! against the basic name pattern plus a caller-supplied predicate, then
//! enforces the grammar of infix arithmetic with parentheses:
//!
//! - parentheses balance and never close more than were opened
//! - no value directly after a value or `)` (no juxtaposition)
//! - no `(` directly after a value or `)`
//! - no operator at the start, after another operator, or after `(`
//! - no `)` directly after an operator or `(`
//! - no operator at the end
//!
//! Equality and hashing use the canonical token string, so `1 + 3` and
//! `1+3.0` are the same formula.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

use super::cell_name::{identity, is_basic_name};
use super::token::{Token, tokenize};

/// Errors raised while parsing a formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("The formula is empty")]
    Empty,

    #[error("Unrecognized token: {0}")]
    Unrecognized(String),

    #[error("Number out of range: {0}")]
    NumberOutOfRange(String),

    #[error("Unexpected ')' with no matching '('")]
    UnexpectedClosingParen,

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("'{token}' cannot follow '{previous}'")]
    Misplaced { token: String, previous: String },

    #[error("A formula cannot start with an operator: {0}")]
    LeadingOperator(String),

    #[error("A formula cannot end with an operator: {0}")]
    TrailingOperator(String),

    #[error("Invalid variable: {0}")]
    InvalidVariable(String),
}

/// An algebraic formula over numbers, variables, `+ - * /` and parentheses.
#[derive(Clone, Debug)]
pub struct Formula {
    tokens: Vec<Token>,
    variables: HashSet<String>,
    canonical: String,
}

impl Formula {
    /// Parse a formula with no normalization and no extra variable checks.
    pub fn parse(source: &str) -> Result<Formula, FormatError> {
        Formula::new(source, identity, |_| true)
    }

    /// Parse a formula, normalizing each variable and validating the result.
    pub fn new<N, V>(source: &str, normalize: N, is_valid: V) -> Result<Formula, FormatError>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let mut tokens = Vec::new();
        let mut variables = HashSet::new();
        let mut depth = 0usize;

        for token in tokenize(source)? {
            check_placement(&token, tokens.last())?;

            let token = match token {
                Token::LParen => {
                    depth += 1;
                    Token::LParen
                }
                Token::RParen => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(FormatError::UnexpectedClosingParen)?;
                    Token::RParen
                }
                Token::Variable(raw) => {
                    let name = normalize(&raw);
                    if !is_basic_name(&name) || !is_valid(&name) {
                        return Err(FormatError::InvalidVariable(raw));
                    }
                    variables.insert(name.clone());
                    Token::Variable(name)
                }
                other => other,
            };
            tokens.push(token);
        }

        match tokens.last() {
            None => return Err(FormatError::Empty),
            Some(Token::Op(op)) => return Err(FormatError::TrailingOperator(op.symbol().to_string())),
            Some(_) => {}
        }
        if depth != 0 {
            return Err(FormatError::UnbalancedParens);
        }

        let canonical = tokens.iter().map(Token::to_string).collect();
        Ok(Formula {
            tokens,
            variables,
            canonical,
        })
    }

    /// The distinct normalized variables, in no particular order.
    pub fn variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(String::as_str)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Reject a token that cannot follow `previous`.
fn check_placement(token: &Token, previous: Option<&Token>) -> Result<(), FormatError> {
    let misplaced = || FormatError::Misplaced {
        token: token.to_string(),
        previous: previous.map(Token::to_string).unwrap_or_default(),
    };

    match (token, previous) {
        (Token::Op(op), None) => Err(FormatError::LeadingOperator(op.symbol().to_string())),
        (Token::Op(_), Some(Token::Op(_) | Token::LParen)) => Err(misplaced()),
        (Token::LParen, Some(prev)) if prev.is_value() || *prev == Token::RParen => Err(misplaced()),
        (Token::RParen, Some(Token::Op(_) | Token::LParen)) => Err(misplaced()),
        (value, Some(prev)) if value.is_value() && (prev.is_value() || *prev == Token::RParen) => {
            Err(misplaced())
        }
        _ => Ok(()),
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Formula {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}
