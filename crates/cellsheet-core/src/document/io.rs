use super::Spreadsheet;
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::storage::{SavedCell, SavedSheet, parse_sheet, write_sheet};
use cellsheet_engine::engine::identity;
use std::path::Path;

impl Spreadsheet {
    /// Read a saved spreadsheet, checking its version against `version`.
    pub fn load<N, V>(path: &Path, normalize: N, is_valid: V, version: impl Into<String>) -> Result<Self>
    where
        N: Fn(&str) -> String + 'static,
        V: Fn(&str) -> bool + 'static,
    {
        let mut sheet = Self::with_options(normalize, is_valid, version);
        sheet.load_file(path)?;
        Ok(sheet)
    }

    /// Read a saved spreadsheet using a sheet configuration.
    pub fn load_with_config(path: &Path, config: &SheetConfig) -> Result<Self> {
        let mut sheet = Self::from_config(config)?;
        sheet.load_file(path)?;
        Ok(sheet)
    }

    /// Version label stored in a saved spreadsheet.
    pub fn get_saved_version(path: &Path) -> Result<String> {
        Ok(parse_sheet(path)?.version)
    }

    /// Save every non-empty cell and clear the changed flag.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let cells: Vec<SavedCell> = self
            .cells
            .iter()
            .map(|(name, cell)| SavedCell {
                name: name.clone(),
                contents: cell.contents.to_input_string(),
            })
            .collect();
        let count = cells.len();
        let sheet = SavedSheet {
            version: self.version.clone(),
            cells,
        };

        write_sheet(path, &sheet)?;
        self.changed = false;
        log::info!("Saved {} cells to {}", count, path.display());
        Ok(())
    }

    /// Replace this spreadsheet's cells with a saved file's.
    ///
    /// Each saved cell is re-entered through [`Spreadsheet::set_contents_of_cell`],
    /// so dependencies and values are rebuilt rather than copied. Nothing
    /// changes unless the whole file loads.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let saved = parse_sheet(path)?;
        if saved.version != self.version {
            return Err(SheetError::ReadWrite(format!(
                "{}: version mismatch (file has {:?}, expected {:?})",
                path.display(),
                saved.version,
                self.version
            )));
        }

        // Build into a fresh store first so a bad cell leaves us untouched.
        let mut fresh = Spreadsheet::from_parts(
            std::mem::replace(&mut self.normalize, Box::new(identity)),
            std::mem::replace(&mut self.is_valid, Box::new(|_: &str| true)),
            self.version.clone(),
        );
        if let Err(err) = fresh.apply_saved(&saved.cells) {
            self.normalize = fresh.normalize;
            self.is_valid = fresh.is_valid;
            return Err(err);
        }

        fresh.changed = false;
        *self = fresh;
        log::info!("Loaded {} cells from {}", self.cells.len(), path.display());
        Ok(())
    }

    fn apply_saved(&mut self, cells: &[SavedCell]) -> Result<()> {
        for cell in cells {
            self.set_contents_of_cell(&cell.name, &cell.contents)
                .map_err(|e| SheetError::ReadWrite(format!("cell {}: {}", cell.name, e)))?;
        }
        Ok(())
    }
}
