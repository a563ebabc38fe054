//! Cell and variable name checks.
//!
//! Every cell name and every formula variable must match the basic pattern:
//! a letter or underscore followed by letters, digits or underscores. Hosts
//! narrow this further with their own validity predicate (e.g. "one capital
//! letter then a row number").
//!
//! # Examples
//!
//! ```ignore
//! assert!(is_basic_name("A1"));
//! assert!(is_basic_name("_tmp"));
//! assert!(!is_basic_name("1A"));
//! ```

use regex::Regex;
use std::sync::OnceLock;

fn basic_name_re() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("basic cell name regex must compile")
    })
}

/// Check a name against the basic name pattern.
pub fn is_basic_name(name: &str) -> bool {
    basic_name_re().is_match(name)
}

/// Normalizer that leaves names unchanged.
pub fn identity(name: &str) -> String {
    name.to_string()
}

/// Normalizer that uppercases names (`a1` and `A1` are the same cell).
pub fn uppercase(name: &str) -> String {
    name.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert!(is_basic_name("A1"));
        assert!(is_basic_name("a"));
        assert!(is_basic_name("_"));
        assert!(is_basic_name("AA100"));
        assert!(is_basic_name("x_2_y"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_basic_name(""));
        assert!(!is_basic_name("1A"));
        assert!(!is_basic_name("A 1"));
        assert!(!is_basic_name("A1 "));
        assert!(!is_basic_name("A-1"));
        assert!(!is_basic_name("Ä1"));
    }

    #[test]
    fn test_normalizers() {
        assert_eq!(identity("a1"), "a1");
        assert_eq!(uppercase("a1"), "A1");
        assert_eq!(uppercase("aA_1"), "AA_1");
    }
}
