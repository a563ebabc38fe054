//! cellsheet-core - Dependency-tracked cell store + storage.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{NameCase, SheetConfig};
pub use document::{Normalizer, Spreadsheet, Validator};
pub use error::{Result, SheetError};
pub use storage::{SavedCell, SavedSheet};

pub use cellsheet_engine::engine::{CellContent, CellValue, EvalError, FormatError, Formula};
