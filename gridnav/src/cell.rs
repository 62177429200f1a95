//! Resolving a focused element to the grid cell that holds it.

use griddom::Document;

/// Where focus currently is inside a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedCell {
    /// The element holding native focus.
    pub element: String,
    /// The cell enclosing `element` (may be `element` itself).
    pub cell_element: String,
    /// True when focus sits on a widget nested inside the cell.
    pub widget: bool,
}

impl FocusedCell {
    /// Focus on the cell itself.
    pub fn on_cell(cell: impl Into<String>) -> Self {
        let cell = cell.into();
        Self {
            element: cell.clone(),
            cell_element: cell,
            widget: false,
        }
    }
}

/// Describe the cell holding `target`, or `None` if `target` is not inside a
/// cell of `table`.
///
/// The cell is the first cell-role element on the path down from `table`.
/// A table-role element met before that belongs to a nested table, which
/// this grid does not own.
pub fn resolve_focus_target(doc: &Document, table: &str, target: &str) -> Option<FocusedCell> {
    let path = doc.path_to(target)?;
    let table_pos = path.iter().position(|id| id == table)?;

    for id in &path[table_pos + 1..] {
        let element = doc.get(id)?;
        if element.role.is_some_and(|role| role.is_table()) {
            return None;
        }
        if element.is_cell() {
            return Some(FocusedCell {
                element: target.to_string(),
                cell_element: id.clone(),
                widget: id != target,
            });
        }
    }

    None
}
