//! Formula tokenizer.
//!
//! Splits formula text into parentheses, the four arithmetic operators,
//! variables (a letter or underscore followed by letters, digits or
//! underscores) and numeric literals (integer, decimal or scientific).
//! Whitespace separates tokens and is otherwise dropped. Anything else is
//! reported as an unrecognized token.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::formula::FormatError;

/// One of the four arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }
}

/// A formula token.
///
/// Numbers hold their parsed value; their display form is the canonical
/// re-serialization, so `2.0`, `2` and `2e0` all display as `2`.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Op(Operator),
    Number(f64),
    Variable(String),
}

impl Token {
    /// True for tokens that produce a value (numbers and variables).
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => write!(f, "{}", name),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?<space>\s+)|(?<lparen>\()|(?<rparen>\))|(?<op>[-+*/])|(?<var>[A-Za-z_][A-Za-z0-9_]*)|(?<num>(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+-]?[0-9]+)?))",
        )
        .expect("formula token regex must compile")
    })
}

/// Split formula text into tokens.
///
/// Variables are returned exactly as written; normalization happens during
/// formula construction.
pub fn tokenize(source: &str) -> Result<Vec<Token>, FormatError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        let Some(caps) = token_re().captures(rest) else {
            return Err(FormatError::Unrecognized(unrecognized_prefix(rest)));
        };
        let len = caps.get(0).map_or(0, |m| m.end());

        if caps.name("space").is_some() {
            // Separator only.
        } else if caps.name("lparen").is_some() {
            tokens.push(Token::LParen);
        } else if caps.name("rparen").is_some() {
            tokens.push(Token::RParen);
        } else if let Some(op) = caps.name("op").and_then(|m| Operator::from_symbol(m.as_str())) {
            tokens.push(Token::Op(op));
        } else if let Some(var) = caps.name("var") {
            tokens.push(Token::Variable(var.as_str().to_string()));
        } else if let Some(num) = caps.name("num") {
            let text = num.as_str();
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => tokens.push(Token::Number(n)),
                _ => return Err(FormatError::NumberOutOfRange(text.to_string())),
            }
        }

        if len == 0 {
            return Err(FormatError::Unrecognized(unrecognized_prefix(rest)));
        }
        rest = &rest[len..];
    }

    Ok(tokens)
}

/// The run of characters up to the next separator, for error messages.
fn unrecognized_prefix(rest: &str) -> String {
    let end = rest
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_whitespace() || "()+-*/".contains(*c))
        .map_or(rest.len(), |(i, _)| i);
    rest[..end].to_string()
}
