//! Error types for Cellsheet core.

use thiserror::Error;

use cellsheet_engine::engine::FormatError;

/// Errors signaled by spreadsheet operations.
///
/// Evaluation failures are not here: they are cached as
/// [`CellValue::Error`](cellsheet_engine::engine::CellValue::Error) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Invalid cell name: {0:?}")]
    InvalidName(String),

    #[error("Cell contents are missing")]
    ArgumentNull,

    #[error("Invalid formula: {0}")]
    Format(#[from] FormatError),

    #[error("Circular dependency detected at {0}")]
    CircularDependency(String),

    #[error("Spreadsheet read/write error: {0}")]
    ReadWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
