use super::Spreadsheet;
use super::state::Cell;
use crate::error::{Result, SheetError};
use cellsheet_engine::engine::{CellContent, CellValue};
use std::collections::HashSet;

impl Spreadsheet {
    /// Names of every non-empty cell, in no particular order.
    pub fn get_names_of_all_nonempty_cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    /// Contents of a cell. Empty cells report empty text.
    pub fn get_cell_contents(&self, name: &str) -> Result<CellContent> {
        let name = self.normalize_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map_or_else(|| CellContent::Text(String::new()), |cell| cell.contents.clone()))
    }

    /// Cached value of a cell. Empty cells report empty text.
    pub fn get_cell_value(&self, name: &str) -> Result<CellValue> {
        let name = self.normalize_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map_or_else(|| CellValue::Text(String::new()), |cell| cell.value.clone()))
    }

    /// Names whose formulas reference `name` directly.
    pub fn direct_dependents(&self, name: &str) -> Result<Vec<String>> {
        let name = self.normalize_name(name)?;
        let mut dependents: Vec<String> = self.graph.dependents(&name).map(String::from).collect();
        dependents.sort();
        Ok(dependents)
    }

    /// Set cell contents from raw input.
    ///
    /// Returns the cell and every cell that (transitively) depends on it, in
    /// an order where each cell comes after everything it reads. On any error
    /// the spreadsheet is left exactly as it was.
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> Result<Vec<String>> {
        let name = self.normalize_name(name)?;
        let content = CellContent::from_input(content, &self.normalize, &self.is_valid)?;
        self.set_cell_contents(name, content)
    }

    /// Apply a `NAME=CONTENT` assignment, splitting at the first `=`.
    /// `A1==B1+2` sets A1 to the formula `B1+2`; a bare `A1` has no content.
    pub fn set_from_assignment(&mut self, assignment: &str) -> Result<Vec<String>> {
        match assignment.split_once('=') {
            Some((name, content)) => self.set_contents_of_cell(name.trim(), content),
            None => {
                self.normalize_name(assignment.trim())?;
                Err(SheetError::ArgumentNull)
            }
        }
    }

    fn set_cell_contents(&mut self, name: String, content: CellContent) -> Result<Vec<String>> {
        let previous = self.cells.get(&name).map(|cell| cell.contents.clone());

        // Swap the cell's incoming edges for the new formula's.
        if let Some(old) = previous.as_ref().and_then(CellContent::as_formula) {
            for var in old.variables() {
                self.graph.remove_dependency(var, &name);
            }
        }
        if let Some(new) = content.as_formula() {
            for var in new.variables() {
                self.graph.add_dependency(var, &name);
            }
        }

        let order = match self.recalculation_order(&name) {
            Ok(order) => order,
            Err(err) => {
                if let Some(new) = content.as_formula() {
                    for var in new.variables() {
                        self.graph.remove_dependency(var, &name);
                    }
                }
                if let Some(old) = previous.as_ref().and_then(CellContent::as_formula) {
                    for var in old.variables() {
                        self.graph.add_dependency(var, &name);
                    }
                }
                log::warn!("Rejected update to {}: {}", name, err);
                return Err(err);
            }
        };

        // Compare what a user would see, so 0 -> -0 still counts.
        let unchanged = match &previous {
            Some(old) => old.to_input_string() == content.to_input_string(),
            None => content.is_empty(),
        };

        if content.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells.insert(
                name.clone(),
                Cell {
                    contents: content,
                    value: CellValue::Text(String::new()),
                },
            );
        }

        self.recompute(&order);
        if !unchanged {
            self.changed = true;
        }

        log::debug!("Set {} ({} cells recalculated)", name, order.len());
        Ok(order)
    }

    /// Order in which `start` and its transitive dependents must be
    /// recomputed: `start` first, every cell after all the cells it reads.
    /// Fails if the walk comes back around to `start`.
    pub(crate) fn recalculation_order(&self, start: &str) -> Result<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();

        // Explicit stack of (cell, its unvisited dependents) frames so long
        // chains don't grow the call stack.
        visited.insert(start);
        let mut stack = vec![(start, self.graph.dependents(start))];

        while let Some((current, dependents)) = stack.last_mut() {
            match dependents.next() {
                Some(dependent) if dependent == start => {
                    return Err(SheetError::CircularDependency(start.to_string()));
                }
                Some(dependent) => {
                    if visited.insert(dependent) {
                        stack.push((dependent, self.graph.dependents(dependent)));
                    }
                }
                None => {
                    order.push((*current).to_string());
                    stack.pop();
                }
            }
        }

        order.reverse();
        Ok(order)
    }
}
