use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use cellsheet_engine::engine::{CellContent, CellValue, DependencyGraph, identity, is_basic_name};
use std::collections::HashMap;
use std::fmt;

/// Maps a raw cell or variable name to its canonical form.
pub type Normalizer = Box<dyn Fn(&str) -> String>;

/// Extra check every normalized name must pass.
pub type Validator = Box<dyn Fn(&str) -> bool>;

/// A non-empty cell: what was entered and what it currently shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cell {
    pub contents: CellContent,
    pub value: CellValue,
}

/// The spreadsheet cell store.
///
/// Owns every non-empty cell and the single dependency graph between them.
/// An edge `(A, B)` in the graph means B's formula references A, so A must
/// be recomputed before B. Single-threaded: callers sharing a store across
/// threads synchronize externally.
pub struct Spreadsheet {
    /// Non-empty cells by normalized name
    pub(crate) cells: HashMap<String, Cell>,
    /// Formula references: (variable, formula cell)
    pub(crate) graph: DependencyGraph,
    pub(crate) normalize: Normalizer,
    pub(crate) is_valid: Validator,
    /// Version label checked on load
    pub(crate) version: String,
    /// Whether visible content changed since construction or the last save
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with unchanged names, no extra validity
    /// rule and version "default".
    pub fn new() -> Self {
        Self::with_options(identity, |_: &str| true, "default")
    }

    /// Create an empty spreadsheet with the given name handling and version.
    pub fn with_options<N, V>(normalize: N, is_valid: V, version: impl Into<String>) -> Self
    where
        N: Fn(&str) -> String + 'static,
        V: Fn(&str) -> bool + 'static,
    {
        Self::from_parts(Box::new(normalize), Box::new(is_valid), version.into())
    }

    /// Create an empty spreadsheet from a sheet configuration.
    pub fn from_config(config: &SheetConfig) -> Result<Self> {
        Ok(Self::from_parts(
            config.normalizer(),
            config.validator()?,
            config.version.clone(),
        ))
    }

    pub(crate) fn from_parts(normalize: Normalizer, is_valid: Validator, version: String) -> Self {
        Spreadsheet {
            cells: HashMap::new(),
            graph: DependencyGraph::new(),
            normalize,
            is_valid,
            version,
            changed: false,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// True iff a committed change altered visible content since
    /// construction or the last save.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Normalize a cell name and check it against the basic pattern and the
    /// validity predicate.
    pub(crate) fn normalize_name(&self, name: &str) -> Result<String> {
        let normalized = (self.normalize)(name);
        if is_basic_name(&normalized) && (self.is_valid)(&normalized) {
            Ok(normalized)
        } else {
            Err(SheetError::InvalidName(name.to_string()))
        }
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Spreadsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spreadsheet")
            .field("cells", &self.cells.len())
            .field("dependencies", &self.graph.len())
            .field("version", &self.version)
            .field("changed", &self.changed)
            .finish()
    }
}
