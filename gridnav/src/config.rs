//! Navigation configuration types.

/// Rows skipped by Page Up / Page Down when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings read by the key dispatcher. Can change at any time without
/// touching the attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Rows skipped per Page Up / Page Down.
    pub page_size: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl NavigationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Role the hosting table renders with. Only grids are navigable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableRole {
    #[default]
    Grid,
    TreeGrid,
    Table,
}

/// Options accepted by [`GridNavigation`](crate::GridNavigation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridNavigationOptions {
    pub table_role: TableRole,
    pub page_size: usize,
}

impl Default for GridNavigationOptions {
    fn default() -> Self {
        Self {
            table_role: TableRole::Grid,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridNavigationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_role(mut self, role: TableRole) -> Self {
        self.table_role = role;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl From<GridNavigationOptions> for NavigationConfig {
    fn from(options: GridNavigationOptions) -> Self {
        Self {
            page_size: options.page_size,
        }
    }
}
