//! Key bindings for grid navigation.

use griddom::{Key, Modifiers};

use crate::movement::{Delta, Step};

/// A recognized navigation key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Home: first cell of the current row.
    RowStart,
    /// End: last cell of the current row.
    RowEnd,
    /// Ctrl+Home: first cell of the grid.
    GridStart,
    /// Ctrl+End: last cell of the grid.
    GridEnd,
    /// Enter: from the cell into its widget.
    EnterWidget,
    /// Escape: from the widget back to its cell.
    ExitWidget,
    /// F2: toggle between cell and widget.
    ToggleWidget,
}

impl Command {
    /// Map a key press to a command.
    ///
    /// Only unmodified keys and Ctrl+Home / Ctrl+End are commands; every
    /// other modifier combination is left alone.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        if modifiers.none() {
            let command = match key {
                Key::Up => Command::Up,
                Key::Down => Command::Down,
                Key::Left => Command::Left,
                Key::Right => Command::Right,
                Key::PageUp => Command::PageUp,
                Key::PageDown => Command::PageDown,
                Key::Home => Command::RowStart,
                Key::End => Command::RowEnd,
                Key::Enter => Command::EnterWidget,
                Key::Escape => Command::ExitWidget,
                Key::F(2) => Command::ToggleWidget,
                _ => return None,
            };
            Some(command)
        } else if modifiers.ctrl_only() {
            match key {
                Key::Home => Some(Command::GridStart),
                Key::End => Some(Command::GridEnd),
                _ => None,
            }
        } else {
            None
        }
    }

    /// The focus move this command performs, if it is a move.
    pub fn delta(self, page_size: usize) -> Option<Delta> {
        let page = isize::try_from(page_size).unwrap_or(isize::MAX);
        let delta = match self {
            Command::Up => Delta::rows(-1),
            Command::Down => Delta::rows(1),
            Command::Left => Delta::cols(-1),
            Command::Right => Delta::cols(1),
            Command::PageUp => Delta::rows(-page),
            Command::PageDown => Delta::rows(page),
            Command::RowStart => Delta::new(Step::By(0), Step::First),
            Command::RowEnd => Delta::new(Step::By(0), Step::Last),
            Command::GridStart => Delta::new(Step::First, Step::First),
            Command::GridEnd => Delta::new(Step::Last, Step::Last),
            Command::EnterWidget | Command::ExitWidget | Command::ToggleWidget => return None,
        };
        Some(delta)
    }

    /// Commands still intercepted while a nested widget has focus.
    pub fn allowed_in_widget(self) -> bool {
        matches!(self, Command::ExitWidget | Command::ToggleWidget)
    }
}
