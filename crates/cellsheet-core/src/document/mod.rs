//! Spreadsheet cell store (UI-agnostic).

mod eval;
mod io;
mod ops;
mod state;

pub use state::{Normalizer, Spreadsheet, Validator};
