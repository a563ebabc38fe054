//! Spreadsheet engine API.
//!
//! This module provides the leaf pieces of the spreadsheet core:
//!
//! - [`Formula`] - Parsing, validation and evaluation of algebraic formulas
//! - [`Token`], [`tokenize`] - Formula tokenizer
//! - [`EvalError`] - Evaluation failures, carried as values
//! - [`DependencyGraph`] - Bidirectional "t depends on s" index
//! - [`CellContent`], [`CellValue`] - What a cell holds and what it shows
//! - [`is_basic_name`] - The basic cell/variable name pattern
//! - [`format_value`] - Format values for display

mod cell;
mod cell_name;
mod deps;
mod eval;
mod format;
mod formula;
mod token;

pub use cell::{CellContent, CellValue};
pub use cell_name::{identity, is_basic_name, uppercase};
pub use deps::DependencyGraph;
pub use eval::{EvalError, LookupFailure};
pub use format::{format_number, format_value};
pub use formula::{FormatError, Formula};
pub use token::{Operator, Token, tokenize};
