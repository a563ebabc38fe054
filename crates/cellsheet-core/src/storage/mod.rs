//! File format support.
//!
//! Spreadsheets are saved as a small XML document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <spreadsheet version="default">
//!   <cell>
//!     <name>A1</name>
//!     <contents>=B1+2</contents>
//!   </cell>
//! </spreadsheet>
//! ```
//!
//! `contents` holds what a user would type to recreate the cell: a number,
//! verbatim text, or a formula prefixed with `=`.

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};

/// One saved cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCell {
    pub name: String,
    pub contents: String,
}

/// A saved spreadsheet document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSheet {
    pub version: String,
    pub cells: Vec<SavedCell>,
}

fn xml_error(err: impl std::fmt::Display) -> crate::error::SheetError {
    crate::error::SheetError::ReadWrite(format!("Malformed spreadsheet file: {}", err))
}
