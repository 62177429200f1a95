//! Logical row/column layout of a table and the index metadata stamped on it.

use std::collections::HashMap;

use griddom::{Document, DomError, Element, Role};

use crate::cell::FocusedCell;

/// 1-based row position, on rows and cells.
pub const ROW_INDEX: &str = "aria-rowindex";
/// 1-based column position, on cells.
pub const COL_INDEX: &str = "aria-colindex";
pub const ROW_COUNT: &str = "aria-rowcount";
pub const COL_COUNT: &str = "aria-colcount";

/// Logical (row, column) coordinate, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinate stamped on a cell by [`refresh_index_metadata`].
    /// Works on detached cells too.
    pub fn read(cell: &Element) -> Option<Self> {
        let row = read_index(cell, ROW_INDEX)?;
        let col = read_index(cell, COL_INDEX)?;
        Some(Self { row, col })
    }
}

fn read_index(element: &Element, key: &str) -> Option<usize> {
    element.get_data(key)?.parse::<usize>().ok()?.checked_sub(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// Rows and cells of one table, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    rows: Vec<GridRow>,
}

impl GridLayout {
    /// Walk `table` collecting rows (through any row groups) and their cells.
    /// Cells are not descended into, so tables nested inside cells stay separate.
    pub fn scan(table: &Element) -> Self {
        let mut rows = Vec::new();
        scan_rows(table, &mut rows);
        Self { rows }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, index: CellIndex) -> Option<&str> {
        self.rows
            .get(index.row)?
            .cells
            .get(index.col)
            .map(String::as_str)
    }

    pub fn position(&self, cell: &str) -> Option<CellIndex> {
        self.rows.iter().enumerate().find_map(|(row, r)| {
            r.cells
                .iter()
                .position(|id| id == cell)
                .map(|col| CellIndex { row, col })
        })
    }
}

fn scan_rows(element: &Element, rows: &mut Vec<GridRow>) {
    for child in element.child_elements() {
        if child.is_role(Role::Row) {
            let mut cells = Vec::new();
            scan_cells(child, &mut cells);
            rows.push(GridRow {
                id: child.id.clone(),
                cells,
            });
        } else if !child.is_cell() && !child.role.is_some_and(Role::is_table) {
            scan_rows(child, rows);
        }
    }
}

fn scan_cells(element: &Element, cells: &mut Vec<String>) {
    for child in element.child_elements() {
        if child.is_cell() {
            cells.push(child.id.clone());
        } else if !child.is_role(Role::Row) && !child.role.is_some_and(Role::is_table) {
            scan_cells(child, cells);
        }
    }
}

/// Live coordinate of `cell` within `table`.
pub fn cell_index(doc: &Document, table: &str, cell: &str) -> Option<CellIndex> {
    GridLayout::scan(doc.get(table)?).position(cell)
}

/// Stamp row/column index attributes across `table` and return the
/// coordinate of `reference`, if it is still in the grid.
///
/// Only values that differ are written. A table that has left the document
/// is skipped.
pub fn refresh_index_metadata(
    doc: &mut Document,
    table: &str,
    reference: Option<&FocusedCell>,
) -> Result<Option<CellIndex>, DomError> {
    let Some(table_el) = doc.get(table) else {
        log::debug!("[grid-nav] index refresh skipped, {table} is not in the document");
        return Ok(None);
    };
    let layout = GridLayout::scan(table_el);

    let mut updates: HashMap<String, Vec<(&str, String)>> = HashMap::new();
    for (r, row) in layout.rows().iter().enumerate() {
        let row_index = (r + 1).to_string();
        updates.insert(row.id.clone(), vec![(ROW_INDEX, row_index.clone())]);
        for (c, cell) in row.cells.iter().enumerate() {
            updates.insert(
                cell.clone(),
                vec![(ROW_INDEX, row_index.clone()), (COL_INDEX, (c + 1).to_string())],
            );
        }
    }
    updates.insert(
        table.to_string(),
        vec![
            (ROW_COUNT, layout.row_count().to_string()),
            (COL_COUNT, layout.col_count().to_string()),
        ],
    );
    let changed = doc.set_data_within(table, updates)?;

    let anchor = reference.and_then(|cell| layout.position(&cell.cell_element));
    log::trace!(
        "[grid-nav] index metadata on {table}: {changed} change(s), reference at {anchor:?}"
    );
    Ok(anchor)
}
