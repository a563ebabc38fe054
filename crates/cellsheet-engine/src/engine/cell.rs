//! Cell content and value types.
//!
//! - [`CellContent`] - What the user entered (empty, text, number, or formula)
//! - [`CellValue`] - What the cell shows (text, number, or an evaluation error)

use super::eval::EvalError;
use super::formula::{FormatError, Formula};

/// The content entered into a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Empty,
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContent {
    /// Classify raw user input.
    /// - Empty string -> Empty
    /// - Parses as a finite number -> Number
    /// - Starts with '=' -> Formula (without the '=')
    /// - Otherwise -> Text, verbatim
    ///
    /// Leading whitespace is kept, so `" =A1"` is text rather than a formula.
    pub fn from_input<N, V>(input: &str, normalize: N, is_valid: V) -> Result<CellContent, FormatError>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        if input.is_empty() {
            return Ok(CellContent::Empty);
        }

        if let Ok(n) = input.parse::<f64>()
            && n.is_finite()
        {
            return Ok(CellContent::Number(n));
        }

        if let Some(formula) = input.strip_prefix('=') {
            return Formula::new(formula, normalize, is_valid).map(CellContent::Formula);
        }

        Ok(CellContent::Text(input.to_string()))
    }

    /// Get the string a user would type to recreate this content.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => n.to_string(),
            CellContent::Formula(f) => format!("={}", f),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContent::Formula(f) => Some(f),
            _ => None,
        }
    }
}

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(EvalError),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{identity, uppercase};

    fn classify(input: &str) -> CellContent {
        CellContent::from_input(input, uppercase, |_| true).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(""), CellContent::Empty);
        assert!(classify("").is_empty());
    }

    #[test]
    fn test_number_input() {
        assert_eq!(classify("42"), CellContent::Number(42.0));
        assert_eq!(classify("-1.5"), CellContent::Number(-1.5));
        assert_eq!(classify("2e3"), CellContent::Number(2000.0));
    }

    #[test]
    fn test_non_finite_numbers_are_text() {
        assert_eq!(classify("inf"), CellContent::Text("inf".to_string()));
        assert_eq!(classify("NaN"), CellContent::Text("NaN".to_string()));
        assert_eq!(classify("1e400"), CellContent::Text("1e400".to_string()));
    }

    #[test]
    fn test_formula_input() {
        let content = classify("=a1 + 2");
        let formula = content.as_formula().unwrap();
        assert_eq!(formula.to_string(), "A1+2");
        assert_eq!(content.to_input_string(), "=A1+2");
    }

    #[test]
    fn test_formula_input_with_bad_syntax() {
        let err = CellContent::from_input("=1 +", identity, |_| true).unwrap_err();
        assert_eq!(err, FormatError::TrailingOperator("+".to_string()));
    }

    #[test]
    fn test_text_is_verbatim() {
        assert_eq!(classify("  hello "), CellContent::Text("  hello ".to_string()));
        assert_eq!(classify(" =A1"), CellContent::Text(" =A1".to_string()));
        assert_eq!(classify(" 5"), CellContent::Text(" 5".to_string()));
    }

    #[test]
    fn test_to_input_string() {
        assert_eq!(CellContent::Number(2.0).to_input_string(), "2");
        assert_eq!(CellContent::Text("x".to_string()).to_input_string(), "x");
        assert_eq!(CellContent::Empty.to_input_string(), "");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(CellValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(CellValue::Text("3".to_string()).as_number(), None);
        assert!(CellValue::Error(EvalError::DivideByZero).is_error());
    }
}
