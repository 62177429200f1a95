//! Moving native focus between cells by a logical offset.

use griddom::{Document, first_focusable_descendant};

use crate::cell::FocusedCell;
use crate::grid::{self, CellIndex, GridLayout};

/// One axis of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Relative offset, clamped to the grid edge.
    By(isize),
    /// Jump to the first row/column.
    First,
    /// Jump to the last row/column.
    Last,
}

impl Step {
    /// Resolve against a position `from` on an axis of `len` (> 0) slots.
    pub fn apply(self, from: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Step::First => 0,
            Step::Last => last,
            Step::By(n) => from.saturating_add_signed(n).min(last),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub rows: Step,
    pub cols: Step,
}

impl Delta {
    /// Stay on the same coordinate. Re-applies focus to the cell element.
    pub const ZERO: Delta = Delta {
        rows: Step::By(0),
        cols: Step::By(0),
    };

    pub fn new(rows: Step, cols: Step) -> Self {
        Self { rows, cols }
    }

    pub fn rows(n: isize) -> Self {
        Self {
            rows: Step::By(n),
            cols: Step::By(0),
        }
    }

    pub fn cols(n: isize) -> Self {
        Self {
            rows: Step::By(0),
            cols: Step::By(n),
        }
    }
}

/// Destination of `delta` from `origin`. The column is clamped to the
/// destination row's own length. `None` for an empty grid or an empty row.
pub fn destination(layout: &GridLayout, origin: CellIndex, delta: Delta) -> Option<CellIndex> {
    if layout.is_empty() {
        return None;
    }
    let row = delta.rows.apply(origin.row, layout.row_count());
    let len = layout.rows()[row].cells.len();
    if len == 0 {
        return None;
    }
    let col = delta.cols.apply(origin.col, len);
    Some(CellIndex { row, col })
}

/// Move focus from the cell described by `from` by `delta`.
/// Returns true if focus ends up on the destination.
pub fn move_by(doc: &mut Document, table: &str, from: &FocusedCell, delta: Delta) -> bool {
    let origin = grid::cell_index(doc, table, &from.cell_element).or_else(|| {
        doc.get(&from.cell_element)
            .and_then(CellIndex::read)
    });
    let Some(origin) = origin else {
        log::trace!("[grid-nav] move_by: {} has no coordinate", from.cell_element);
        return false;
    };
    move_from(doc, table, origin, delta)
}

/// Move focus from the coordinate `origin` by `delta`.
/// Returns true if focus ends up on the destination.
pub fn move_from(doc: &mut Document, table: &str, origin: CellIndex, delta: Delta) -> bool {
    let Some(table_el) = doc.get(table) else {
        return false;
    };
    let layout = GridLayout::scan(table_el);
    let Some(dest) = destination(&layout, origin, delta) else {
        log::trace!("[grid-nav] move_from {origin:?}: no destination in {table}");
        return false;
    };
    let Some(cell) = layout.cell(dest) else {
        return false;
    };
    log::debug!("[grid-nav] move {origin:?} by {delta:?} -> {dest:?} ({cell})");
    focus_cell(doc, cell)
}

/// Focus a cell, or its first focusable descendant if the cell itself can't
/// take focus.
fn focus_cell(doc: &mut Document, cell: &str) -> bool {
    let Some(cell_el) = doc.get(cell) else {
        return false;
    };
    let target = if cell_el.can_focus() {
        cell_el.id.clone()
    } else {
        match first_focusable_descendant(cell_el) {
            Some(el) => el.id.clone(),
            None => return false,
        }
    };
    doc.focus(&target) || doc.focused() == Some(target.as_str())
}

/// Focus the first focusable element inside the cell's widget.
/// Returns false if the cell has none.
pub fn move_into_widget(doc: &mut Document, from: &FocusedCell) -> bool {
    let widget = doc
        .get(&from.cell_element)
        .and_then(first_focusable_descendant)
        .map(|el| el.id.clone());
    match widget {
        Some(id) => doc.focus(&id),
        None => false,
    }
}
