/// Semantic role of an element, following the ARIA grid and table patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Grid,
    TreeGrid,
    Table,
    RowGroup,
    Row,
    GridCell,
    Cell,
    ColumnHeader,
    RowHeader,
    Button,
    TextBox,
    Generic,
}

impl Role {
    /// Roles that occupy a single logical grid position.
    pub fn is_cell(self) -> bool {
        matches!(
            self,
            Role::GridCell | Role::Cell | Role::ColumnHeader | Role::RowHeader
        )
    }

    /// Roles that start their own row/column coordinate space.
    pub fn is_table(self) -> bool {
        matches!(self, Role::Grid | Role::TreeGrid | Role::Table)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Grid => "grid",
            Role::TreeGrid => "treegrid",
            Role::Table => "table",
            Role::RowGroup => "rowgroup",
            Role::Row => "row",
            Role::GridCell => "gridcell",
            Role::Cell => "cell",
            Role::ColumnHeader => "columnheader",
            Role::RowHeader => "rowheader",
            Role::Button => "button",
            Role::TextBox => "textbox",
            Role::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
