use super::Spreadsheet;
use cellsheet_engine::engine::{CellContent, CellValue, LookupFailure};

impl Spreadsheet {
    /// Recompute cached values in `order`. Every name a cell reads must
    /// already be up to date when that cell is reached.
    pub(crate) fn recompute(&mut self, order: &[String]) {
        for name in order {
            let Some(cell) = self.cells.get(name) else {
                // Removed cell or a reference to nothing.
                continue;
            };
            let value = self.compute_value(&cell.contents);
            log::trace!("Recomputed {} = {:?}", name, value);
            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    fn compute_value(&self, contents: &CellContent) -> CellValue {
        match contents {
            CellContent::Empty => CellValue::Text(String::new()),
            CellContent::Text(s) => CellValue::Text(s.clone()),
            CellContent::Number(n) => CellValue::Number(*n),
            CellContent::Formula(formula) => match formula.evaluate(|var| self.lookup(var)) {
                Ok(n) => CellValue::Number(n),
                Err(e) => CellValue::Error(e),
            },
        }
    }

    /// Numeric value of another cell for formula evaluation.
    fn lookup(&self, name: &str) -> Result<f64, LookupFailure> {
        match self.cells.get(name).map(|cell| &cell.value) {
            Some(CellValue::Number(n)) => Ok(*n),
            Some(CellValue::Text(_)) => Err(LookupFailure::NotANumber),
            Some(CellValue::Error(e)) => Err(LookupFailure::Error(e.clone())),
            None => Err(LookupFailure::Undefined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsheet_engine::engine::EvalError;

    #[test]
    fn test_lookup_kinds() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "3").unwrap();
        sheet.set_contents_of_cell("A2", "words").unwrap();
        sheet.set_contents_of_cell("A3", "=A1/0").unwrap();

        assert_eq!(sheet.lookup("A1"), Ok(3.0));
        assert_eq!(sheet.lookup("A2"), Err(LookupFailure::NotANumber));
        assert_eq!(
            sheet.lookup("A3"),
            Err(LookupFailure::Error(EvalError::DivideByZero))
        );
        assert_eq!(sheet.lookup("A4"), Err(LookupFailure::Undefined));
    }

    #[test]
    fn test_recompute_skips_absent_names() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=2*4").unwrap();
        sheet.recompute(&["Z1".to_string(), "A1".to_string()]);
        assert_eq!(sheet.get_cell_value("A1").unwrap(), CellValue::Number(8.0));
    }

    #[test]
    fn test_formula_reading_formula() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=(1+2)*3").unwrap();
        sheet.set_contents_of_cell("B1", "=A1 - 4 / 2").unwrap();
        assert_eq!(sheet.get_cell_value("B1").unwrap(), CellValue::Number(7.0));
    }
}
